// src/subst.rs
//
// Substitution: a finite map from parameter/variable names to terms,
// applied uniformly over a term. Application preserves structural sharing:
// a term comes back with the same id unless something inside it changed.

use rustc_hash::FxHashMap;

use crate::arena::{Ty, TypeArena, TypeId, TypeIdVec};
use crate::intern::Symbol;

#[derive(Debug, Clone, Default)]
pub struct Substitution {
    map: FxHashMap<Symbol, TypeId>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(name: Symbol, ty: TypeId) -> Self {
        let mut subst = Self::new();
        subst.insert(name, ty);
        subst
    }

    pub fn insert(&mut self, name: Symbol, ty: TypeId) {
        self.map.insert(name, ty);
    }

    pub fn get(&self, name: Symbol) -> Option<TypeId> {
        self.map.get(&name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Merge another substitution in; its bindings win on overlap.
    pub fn extend(&mut self, other: &Substitution) {
        for (&name, &ty) in &other.map {
            self.map.insert(name, ty);
        }
    }
}

/// Apply a substitution over a term. Type variables and bare names both
/// substitute: generic parameters arrive from the parser as plain named
/// terms, not variables.
pub fn apply(arena: &mut TypeArena, subst: &Substitution, id: TypeId) -> TypeId {
    if subst.is_empty() {
        return id;
    }

    let ty = arena.get(id).clone();
    match ty {
        Ty::Var(name) => subst.get(name).unwrap_or(id),
        Ty::Basic { name, .. } => subst.get(name).unwrap_or(id),

        Ty::Pointer { pointee, unique } => {
            let new_pointee = apply(arena, subst, pointee);
            if new_pointee == pointee {
                id
            } else {
                arena.pointer(new_pointee, unique)
            }
        }

        Ty::Reference { referent, mutable } => {
            let new_referent = apply(arena, subst, referent);
            if new_referent == referent {
                id
            } else {
                arena.reference(new_referent, mutable)
            }
        }

        Ty::Array { element, len } => {
            let new_element = apply(arena, subst, element);
            if new_element == element {
                id
            } else {
                arena.array(new_element, len)
            }
        }

        Ty::Function { params, ret } => {
            let mut changed = false;
            let mut new_params = TypeIdVec::with_capacity(params.len());
            for &param in &params {
                let new_param = apply(arena, subst, param);
                changed |= new_param != param;
                new_params.push(new_param);
            }
            let new_ret = apply(arena, subst, ret);
            changed |= new_ret != ret;
            if changed {
                arena.function(new_params, new_ret)
            } else {
                id
            }
        }

        Ty::Generic { name, args } => {
            let mut changed = false;
            let mut new_args = TypeIdVec::with_capacity(args.len());
            for &arg in &args {
                let new_arg = apply(arena, subst, arg);
                changed |= new_arg != arg;
                new_args.push(new_arg);
            }
            if changed {
                arena.generic(name, new_args)
            } else {
                id
            }
        }

        Ty::Class(_) | Ty::Trait(_) => id,
    }
}
