// src/mangle.rs
//
// Itanium-shaped name mangling. The subsystem emits no code itself; these
// strings exist so the code generator can form unique linkable symbols.
//
// Grammar: primitives use the single-letter Itanium codes, pointers are
// `P<inner>`, references `R<inner>`, sized arrays `A<n>_<inner>`, dynamic
// arrays `PA<inner>`, functions `F<ret><params...>E`, generic applications
// `<len><name>I<args...>E`, and nominal names `<len><name>`.

use crate::arena::{Ty, TypeArena, TypeId};
use crate::intern::Interner;

pub fn mangled_name(names: &Interner, arena: &TypeArena, id: TypeId) -> String {
    let mut out = String::new();
    mangle_into(names, arena, id, &mut out);
    out
}

fn mangle_into(names: &Interner, arena: &TypeArena, id: TypeId, out: &mut String) {
    match arena.get(id) {
        Ty::Basic { name, .. } => match names.resolve(*name) {
            "void" => out.push('v'),
            "bool" => out.push('b'),
            "char" => out.push('c'),
            "int" | "int32" => out.push('i'),
            "int64" => out.push('l'),
            "uint32" => out.push('j'),
            "uint64" => out.push('m'),
            "float" | "float32" => out.push('f'),
            "float64" | "double" => out.push('d'),
            "string" => out.push_str("Ss"),
            other => push_source_name(other, out),
        },

        Ty::Pointer { pointee, .. } => {
            out.push('P');
            mangle_into(names, arena, *pointee, out);
        }

        Ty::Reference { referent, .. } => {
            out.push('R');
            mangle_into(names, arena, *referent, out);
        }

        Ty::Array { element, len } => {
            if *len > 0 {
                out.push('A');
                out.push_str(&len.to_string());
                out.push('_');
            } else {
                // Dynamic arrays mangle as pointer-to-array
                out.push_str("PA");
            }
            mangle_into(names, arena, *element, out);
        }

        Ty::Function { params, ret } => {
            out.push('F');
            mangle_into(names, arena, *ret, out);
            for &param in params {
                mangle_into(names, arena, param, out);
            }
            out.push('E');
        }

        Ty::Generic { name, args } => {
            push_source_name(names.resolve(*name), out);
            if !args.is_empty() {
                out.push('I');
                for &arg in args {
                    mangle_into(names, arena, arg, out);
                }
                out.push('E');
            }
        }

        Ty::Class(name) | Ty::Trait(name) | Ty::Var(name) => {
            push_source_name(names.resolve(*name), out);
        }
    }
}

fn push_source_name(name: &str, out: &mut String) {
    out.push_str(&name.len().to_string());
    out.push_str(name);
}
