// src/compat.rs
//
// Relational predicates over pairs of terms: equality, subtyping,
// assignment compatibility, and the copy/move/nullable questions.
// These are pure reads; nothing here interns new terms.

use crate::arena::{Ty, TypeId};
use crate::errors::TypeError;
use crate::registry::TypeRegistry;

/// Structural equality. Interning canonicalizes terms, so two present terms
/// are equal iff their ids are; absent terms are equal only to each other.
pub fn types_equal(a: Option<TypeId>, b: Option<TypeId>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Subtyping. Rules are evaluated in order and the first matching rule
/// decides:
///
/// 1. `null` is a subtype of every pointer type.
/// 2. Reflexivity.
/// 3. Nominal class widening along the superclass chain.
/// 4. A type is a subtype of a trait it has a registered impl for.
/// 5. Generics are invariant: same constructor, same arity, equal arguments.
/// 6. Functions: contravariant parameters, covariant return.
pub fn is_subtype(reg: &TypeRegistry, sub: TypeId, sup: TypeId) -> bool {
    // Rule 1: null flows into any pointer
    if sub == reg.arena.null() && reg.arena.is_pointer(sup) {
        return true;
    }

    // Rule 2: reflexivity
    if sub == sup {
        return true;
    }

    // Rule 3: walk the superclass chain
    if let (Ty::Class(sub_name), Ty::Class(sup_name)) = (reg.arena.get(sub), reg.arena.get(sup)) {
        let mut current = reg.class_info(*sub_name);
        while let Some(info) = current {
            match info.superclass {
                Some(parent) if parent == *sup_name => return true,
                Some(parent) => current = reg.class_info(parent),
                None => break,
            }
        }
    }

    // Rule 4: trait implementation
    if let Ty::Trait(trait_name) = reg.arena.get(sup)
        && reg.trait_impl(*trait_name, sub).is_some()
    {
        return true;
    }

    // Rule 5: invariant generics
    if let (
        Ty::Generic {
            name: sub_name,
            args: sub_args,
        },
        Ty::Generic {
            name: sup_name,
            args: sup_args,
        },
    ) = (reg.arena.get(sub), reg.arena.get(sup))
        && sub_name == sup_name
        && sub_args.len() == sup_args.len()
    {
        return sub_args == sup_args;
    }

    // Rule 6: function subtyping
    if let (
        Ty::Function {
            params: sub_params,
            ret: sub_ret,
        },
        Ty::Function {
            params: sup_params,
            ret: sup_ret,
        },
    ) = (reg.arena.get(sub), reg.arena.get(sup))
    {
        if sub_params.len() != sup_params.len() {
            return false;
        }
        for (&sub_param, &sup_param) in sub_params.iter().zip(sup_params.iter()) {
            if !is_subtype(reg, sup_param, sub_param) {
                return false;
            }
        }
        return is_subtype(reg, *sub_ret, *sup_ret);
    }

    false
}

/// Does a value of type `from` flow into a context expecting `to`?
/// Exact match first, then subtyping. Absent operands are an error.
pub fn check_compatibility(
    reg: &TypeRegistry,
    from: Option<TypeId>,
    to: Option<TypeId>,
) -> Result<bool, TypeError> {
    let (Some(from), Some(to)) = (from, to) else {
        return Err(TypeError::NullOperand {
            context: "compatibility check",
        });
    };
    if from == to {
        return Ok(true);
    }
    Ok(is_subtype(reg, from, to))
}

/// A term is copyable unless it is a unique pointer, a move-only class, or
/// one of the resource primitives.
pub fn is_copyable(reg: &TypeRegistry, id: TypeId) -> bool {
    match reg.arena.get(id) {
        Ty::Pointer { unique, .. } => !unique,
        Ty::Class(name) => reg
            .class_info(*name)
            .map(|info| !info.move_only)
            .unwrap_or(true),
        Ty::Basic { name, .. } => !reg.well_known.is_resource(*name),
        _ => true,
    }
}

/// Every term is movable.
pub fn is_movable(_reg: &TypeRegistry, _id: TypeId) -> bool {
    true
}

/// Exactly pointer terms are nullable; option-wrapped terms are a distinct
/// shape checked by constructor name.
pub fn is_nullable(reg: &TypeRegistry, id: TypeId) -> bool {
    reg.arena.is_pointer(id)
}

/// Is this term an `Option<...>` application?
pub fn is_option(reg: &TypeRegistry, id: TypeId) -> bool {
    matches!(reg.arena.get(id), Ty::Generic { name, .. } if *name == reg.well_known.option)
}

/// Array-shaped terms: the structural array or the standard constructors.
pub fn is_array_like(reg: &TypeRegistry, id: TypeId) -> bool {
    match reg.arena.get(id) {
        Ty::Array { .. } => true,
        Ty::Generic { name, .. } => reg.well_known.is_array_ctor(*name),
        _ => false,
    }
}
