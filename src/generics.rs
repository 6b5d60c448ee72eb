// src/generics.rs
//
// Generic instantiation and trait-bound checking. Instantiation validates
// the application (constructor known, arity right, every bound satisfied),
// then substitutes arguments for parameters through the defining term.

use crate::arena::{Ty, TypeId};
use crate::errors::TypeError;
use crate::intern::Symbol;
use crate::registry::{TypeConstraint, TypeRegistry};
use crate::subst::{self, Substitution};

/// Is there a registered impl of `trait_name` whose target is exactly `ty`?
/// Traits are referenced by name; an unknown trait is an error, not `false`.
pub fn does_type_implement_trait(
    reg: &TypeRegistry,
    ty: TypeId,
    trait_name: Symbol,
) -> Result<bool, TypeError> {
    if reg.trait_def(trait_name).is_none() {
        return Err(TypeError::UnknownTrait {
            name: reg.names.resolve(trait_name).to_string(),
        });
    }
    Ok(reg.trait_impl(trait_name, ty).is_some())
}

/// Check an argument against every bound on its parameter.
pub fn check_trait_constraints(
    reg: &TypeRegistry,
    ty: TypeId,
    constraints: &[TypeConstraint],
) -> Result<(), TypeError> {
    for constraint in constraints {
        if !does_type_implement_trait(reg, ty, constraint.trait_name)? {
            return Err(TypeError::UnsatisfiedBound {
                ty: reg.display(ty),
                trait_name: reg.names.resolve(constraint.trait_name).to_string(),
            });
        }
    }
    Ok(())
}

/// Validate an application of the generic `name` to `args`: the registry
/// must know the constructor, arity must match, and each argument must
/// satisfy each bound on its parameter.
pub fn validate_generic_instantiation(
    reg: &TypeRegistry,
    name: Symbol,
    args: &[TypeId],
) -> Result<(), TypeError> {
    let Some(params) = reg.type_parameters(name) else {
        return Err(TypeError::UnknownType {
            name: reg.names.resolve(name).to_string(),
        });
    };

    if params.len() != args.len() {
        return Err(TypeError::WrongArgumentCount {
            what: "type arguments",
            expected: params.len(),
            found: args.len(),
        });
    }

    for (param, &arg) in params.iter().zip(args.iter()) {
        check_trait_constraints(reg, arg, &param.constraints)?;
    }
    Ok(())
}

/// Instantiate a generic term with concrete arguments: validate, build the
/// parameter-to-argument substitution, and apply it over the generic's
/// defining term.
pub fn instantiate_generic(
    reg: &mut TypeRegistry,
    generic: TypeId,
    args: &[TypeId],
) -> Result<TypeId, TypeError> {
    let Ty::Generic { name, .. } = reg.arena.get(generic) else {
        return Err(TypeError::NotGeneric {
            ty: reg.display(generic),
        });
    };
    let name = *name;

    validate_generic_instantiation(reg, name, args)?;

    let mut substitution = Substitution::new();
    // Arity was checked above, so the zip is exact
    let params = reg.type_parameters(name).expect("validated above");
    for (param, &arg) in params.iter().zip(args.iter()) {
        substitution.insert(param.name, arg);
    }

    let definition = reg
        .generic_def(name)
        .expect("validated above")
        .definition;
    Ok(subst::apply(&mut reg.arena, &substitution, definition))
}
