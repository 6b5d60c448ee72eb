// src/layout.rs
//
// Size and alignment queries for a 64-bit target. Size is partial: type
// variables, traits, unapplied generics, and the null sentinel have no
// size. Alignment is total and defaults to 1 for unsized terms.
//
// Classes lay out as C-style structs: fields in declared order, each
// padded to its alignment, the total rounded up to the largest field
// alignment.

use crate::arena::{Ty, TypeId};
use crate::registry::TypeRegistry;

const POINTER_SIZE: usize = 8;

pub fn size_of(reg: &TypeRegistry, id: TypeId) -> Option<usize> {
    match reg.arena.get(id) {
        Ty::Basic { name, .. } => match reg.names.resolve(*name) {
            "bool" | "i8" | "u8" => Some(1),
            "i16" | "u16" => Some(2),
            "i32" | "u32" | "f32" | "int" | "float" | "uint32" => Some(4),
            "i64" | "u64" | "f64" | "int64" | "uint64" | "float64" => Some(8),
            "void" => Some(0),
            _ => None,
        },

        Ty::Pointer { .. } | Ty::Reference { .. } | Ty::Function { .. } => Some(POINTER_SIZE),

        Ty::Array { element, len } => {
            if *len > 0 {
                let element_size = size_of(reg, *element)?;
                Some(element_size * len)
            } else {
                // Dynamic arrays are a pointer-sized handle
                Some(POINTER_SIZE)
            }
        }

        Ty::Class(name) => {
            let info = reg.class_info(*name)?;
            let mut total = 0usize;
            let mut max_align = 1usize;
            for &(_, field_ty) in &info.fields {
                let field_size = size_of(reg, field_ty)?;
                let field_align = align_of(reg, field_ty);
                max_align = max_align.max(field_align);
                if total % field_align != 0 {
                    total += field_align - total % field_align;
                }
                total += field_size;
            }
            if total % max_align != 0 {
                total += max_align - total % max_align;
            }
            Some(total)
        }

        Ty::Generic { .. } | Ty::Trait(_) | Ty::Var(_) => None,
    }
}

pub fn align_of(reg: &TypeRegistry, id: TypeId) -> usize {
    match reg.arena.get(id) {
        Ty::Basic { .. } => match size_of(reg, id) {
            Some(0) | None => 1,
            Some(size) => size.min(POINTER_SIZE),
        },

        Ty::Pointer { .. } | Ty::Reference { .. } | Ty::Function { .. } => POINTER_SIZE,

        Ty::Array { element, len } => {
            if *len > 0 {
                align_of(reg, *element)
            } else {
                POINTER_SIZE
            }
        }

        Ty::Class(name) => match reg.class_info(*name) {
            Some(info) => info
                .fields
                .iter()
                .map(|&(_, field_ty)| align_of(reg, field_ty))
                .max()
                .unwrap_or(1),
            None => 1,
        },

        Ty::Generic { .. } | Ty::Trait(_) | Ty::Var(_) => 1,
    }
}
