// src/unify.rs
//
// Robinson-style unification with the occurs check, threaded through a
// mutable substitution. Two deliberate departures from pure structural
// unification: int and float unify to float (so mixed arithmetic needs no
// cast), and incompatible nominal terms fall back to the subtype lattice,
// unifying at the nearer common super-term.

use tracing::trace;

use crate::arena::{Ty, TypeArena, TypeId, TypeIdVec};
use crate::compat;
use crate::errors::TypeError;
use crate::intern::Symbol;
use crate::registry::TypeRegistry;
use crate::subst::{self, Substitution};

/// Does `var` occur syntactically in the term? Bare named terms count: a
/// generic parameter may arrive as a plain name rather than a variable.
pub fn occurs_in(arena: &TypeArena, var: Symbol, id: TypeId) -> bool {
    match arena.get(id) {
        Ty::Var(name) | Ty::Basic { name, .. } => *name == var,
        Ty::Pointer { pointee, .. } => occurs_in(arena, var, *pointee),
        Ty::Reference { referent, .. } => occurs_in(arena, var, *referent),
        Ty::Array { element, .. } => occurs_in(arena, var, *element),
        Ty::Function { params, ret } => {
            occurs_in(arena, var, *ret) || params.iter().any(|&p| occurs_in(arena, var, p))
        }
        Ty::Generic { name, args } => {
            *name == var || args.iter().any(|&a| occurs_in(arena, var, a))
        }
        Ty::Class(_) | Ty::Trait(_) => false,
    }
}

/// Unify two terms, recording variable bindings in `bindings`.
/// Returns the unified term; the caller applies `bindings` to anything else
/// it inferred alongside.
pub fn unify(
    reg: &mut TypeRegistry,
    t1: TypeId,
    t2: TypeId,
    bindings: &mut Substitution,
) -> Result<TypeId, TypeError> {
    // Look through anything already bound
    let t1 = subst::apply(&mut reg.arena, bindings, t1);
    let t2 = subst::apply(&mut reg.arena, bindings, t2);

    if t1 == t2 {
        return Ok(t1);
    }

    let ty1 = reg.arena.get(t1).clone();
    let ty2 = reg.arena.get(t2).clone();

    // Variable binding, with the occurs check
    if let Ty::Var(var) = &ty1 {
        return bind(reg, bindings, *var, t2);
    }
    if let Ty::Var(var) = &ty2 {
        return bind(reg, bindings, *var, t1);
    }

    // Numeric widening: float absorbs int
    if reg.arena.is_numeric(t1) && reg.arena.is_numeric(t2) {
        let unified = if reg.arena.is_floating(t1) || reg.arena.is_floating(t2) {
            reg.arena.float()
        } else {
            reg.arena.int()
        };
        return Ok(unified);
    }

    if let (
        Ty::Function {
            params: params1,
            ret: ret1,
        },
        Ty::Function {
            params: params2,
            ret: ret2,
        },
    ) = (&ty1, &ty2)
    {
        if params1.len() != params2.len() {
            return Err(TypeError::WrongArgumentCount {
                what: "parameters",
                expected: params1.len(),
                found: params2.len(),
            });
        }
        let mut params = TypeIdVec::with_capacity(params1.len());
        for (&p1, &p2) in params1.iter().zip(params2.iter()) {
            params.push(unify(reg, p1, p2, bindings)?);
        }
        let ret = unify(reg, *ret1, *ret2, bindings)?;
        return Ok(reg.arena.function(params, ret));
    }

    if let (
        Ty::Array {
            element: elem1,
            len: len1,
        },
        Ty::Array {
            element: elem2,
            len: len2,
        },
    ) = (&ty1, &ty2)
    {
        let element = unify(reg, *elem1, *elem2, bindings)?;
        // Lengths must agree to stay fixed; otherwise the result is dynamic
        let len = if len1 == len2 { *len1 } else { 0 };
        return Ok(reg.arena.array(element, len));
    }

    if let (
        Ty::Generic {
            name: name1,
            args: args1,
        },
        Ty::Generic {
            name: name2,
            args: args2,
        },
    ) = (&ty1, &ty2)
    {
        if name1 != name2 || args1.len() != args2.len() {
            return Err(incompatible(reg, t1, t2));
        }
        let mut args = TypeIdVec::with_capacity(args1.len());
        for (&a1, &a2) in args1.iter().zip(args2.iter()) {
            args.push(unify(reg, a1, a2, bindings)?);
        }
        return Ok(reg.arena.generic(*name1, args));
    }

    // Fall back to the nominal lattice: unify at the common super-term
    if compat::is_subtype(reg, t1, t2) {
        return Ok(t2);
    }
    if compat::is_subtype(reg, t2, t1) {
        return Ok(t1);
    }

    Err(incompatible(reg, t1, t2))
}

fn bind(
    reg: &mut TypeRegistry,
    bindings: &mut Substitution,
    var: Symbol,
    other: TypeId,
) -> Result<TypeId, TypeError> {
    if occurs_in(&reg.arena, var, other) {
        return Err(TypeError::InfiniteType {
            var: reg.names.resolve(var).to_string(),
            ty: reg.display(other),
        });
    }
    bindings.insert(var, other);
    Ok(other)
}

fn incompatible(reg: &TypeRegistry, t1: TypeId, t2: TypeId) -> TypeError {
    trace!(left = %reg.display(t1), right = %reg.display(t2), "unification failed");
    TypeError::Incompatible {
        left: reg.display(t1),
        right: reg.display(t2),
    }
}
