// src/resolve.rs
//
// Type resolution: converts TypeExpr (the parser's syntactic form) to an
// interned TypeId. Names resolve against the registry, aliases eagerly;
// a name the registry has never seen is an error here, not later.

use crate::arena::{TypeId, TypeIdVec};
use crate::ast::TypeExpr;
use crate::errors::TypeError;
use crate::registry::TypeRegistry;

pub fn resolve_type(reg: &mut TypeRegistry, ty: &TypeExpr) -> Result<TypeId, TypeError> {
    match ty {
        TypeExpr::Named(name) => {
            if let Some(id) = reg.lookup_type(*name) {
                return Ok(id);
            }
            if let Some(id) = reg.resolve_alias(*name) {
                return Ok(id);
            }
            if reg.trait_def(*name).is_some() {
                return Ok(reg.arena.trait_ty(*name));
            }
            Err(TypeError::UnknownType {
                name: reg.names.resolve(*name).to_string(),
            })
        }

        TypeExpr::Generic { name, args } => {
            let mut resolved = TypeIdVec::with_capacity(args.len());
            for arg in args {
                resolved.push(resolve_type(reg, arg)?);
            }
            Ok(reg.arena.generic(*name, resolved))
        }

        TypeExpr::Pointer { pointee, unique } => {
            let pointee = resolve_type(reg, pointee)?;
            Ok(reg.arena.pointer(pointee, *unique))
        }

        TypeExpr::Reference { referent, mutable } => {
            let referent = resolve_type(reg, referent)?;
            Ok(reg.arena.reference(referent, *mutable))
        }

        TypeExpr::Array { element, len } => {
            let element = resolve_type(reg, element)?;
            Ok(reg.arena.array(element, *len))
        }

        TypeExpr::Function {
            params,
            return_type,
        } => {
            let mut resolved = TypeIdVec::with_capacity(params.len());
            for param in params {
                resolved.push(resolve_type(reg, param)?);
            }
            let ret = resolve_type(reg, return_type)?;
            Ok(reg.arena.function(resolved, ret))
        }
    }
}
