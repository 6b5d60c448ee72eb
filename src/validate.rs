// src/validate.rs
//
// Well-formedness checks: the circular-dependency guard and whole-term
// validation. A non-pointer type must not transitively contain itself;
// pointers and references break cycles legally.

use rustc_hash::FxHashSet;

use crate::arena::{Ty, TypeId};
use crate::errors::TypeError;
use crate::generics;
use crate::intern::Symbol;
use crate::registry::TypeRegistry;

/// Validate a term: present, acyclic, names known, generic applications
/// well-formed. Returns the term unchanged on success.
pub fn validate_type(reg: &TypeRegistry, ty: Option<TypeId>) -> Result<TypeId, TypeError> {
    let Some(id) = ty else {
        return Err(TypeError::NullOperand {
            context: "type validation",
        });
    };

    check_circular(reg, id)?;

    match reg.arena.get(id) {
        Ty::Basic { name, .. } => {
            if reg.lookup_type(*name).is_none() && reg.resolve_alias(*name).is_none() {
                return Err(TypeError::UnknownType {
                    name: reg.names.resolve(*name).to_string(),
                });
            }
            Ok(id)
        }

        Ty::Generic { name, args } => {
            for &arg in args {
                validate_type(reg, Some(arg))?;
            }
            generics::validate_generic_instantiation(reg, *name, args)?;
            Ok(id)
        }

        _ => Ok(id),
    }
}

/// Walk the term looking for a name that reaches back to itself through
/// value fields, alias definitions, array elements, or generic arguments.
pub fn check_circular(reg: &TypeRegistry, id: TypeId) -> Result<(), TypeError> {
    let mut visited = FxHashSet::default();
    check_circular_inner(reg, id, &mut visited)
}

fn check_circular_inner(
    reg: &TypeRegistry,
    id: TypeId,
    visited: &mut FxHashSet<Symbol>,
) -> Result<(), TypeError> {
    match reg.arena.get(id) {
        Ty::Basic { name, .. } => {
            if visited.contains(name) {
                return Err(TypeError::CircularDependency {
                    name: reg.names.resolve(*name).to_string(),
                });
            }
            visited.insert(*name);
            let result = match reg.resolve_alias(*name) {
                Some(definition) => check_circular_inner(reg, definition, visited),
                None => Ok(()),
            };
            visited.remove(name);
            result
        }

        Ty::Class(name) => {
            if visited.contains(name) {
                return Err(TypeError::CircularDependency {
                    name: reg.names.resolve(*name).to_string(),
                });
            }
            visited.insert(*name);
            let mut result = Ok(());
            if let Some(info) = reg.class_info(*name) {
                for &(_, field_ty) in &info.fields {
                    if let Err(err) = check_circular_inner(reg, field_ty, visited) {
                        result = Err(err);
                        break;
                    }
                }
            }
            // Pop on every exit path so siblings never see a stale entry
            visited.remove(name);
            result
        }

        Ty::Array { element, .. } => check_circular_inner(reg, *element, visited),

        Ty::Generic { args, .. } => {
            for &arg in args {
                check_circular_inner(reg, arg, visited)?;
            }
            Ok(())
        }

        // Pointers and references break cycles
        Ty::Pointer { .. } | Ty::Reference { .. } => Ok(()),

        Ty::Function { .. } | Ty::Trait(_) | Ty::Var(_) => Ok(()),
    }
}
