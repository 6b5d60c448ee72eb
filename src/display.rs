// src/display.rs
//! Human-readable type rendering for diagnostics.
//!
//! Pure function of the term: the printer walks the arena and resolves
//! names, nothing else. Output is deterministic across runs.

use std::fmt;

use crate::arena::{Ty, TypeArena, TypeId};
use crate::intern::Interner;

/// A wrapper implementing `fmt::Display` for a term with name resolution.
pub struct DisplayTy<'a> {
    id: TypeId,
    names: &'a Interner,
    arena: &'a TypeArena,
}

impl<'a> DisplayTy<'a> {
    pub fn new(names: &'a Interner, arena: &'a TypeArena, id: TypeId) -> Self {
        Self { id, names, arena }
    }

    fn format_type(&self, id: TypeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arena.get(id) {
            Ty::Basic { name, .. } => write!(f, "{}", self.names.resolve(*name)),

            Ty::Pointer { pointee, unique } => {
                if *unique {
                    write!(f, "*uniq ")?;
                } else {
                    write!(f, "*")?;
                }
                self.format_type(*pointee, f)
            }

            Ty::Reference { referent, mutable } => {
                if *mutable {
                    write!(f, "&mut ")?;
                } else {
                    write!(f, "&")?;
                }
                self.format_type(*referent, f)
            }

            Ty::Array { element, len } => {
                write!(f, "[")?;
                self.format_type(*element, f)?;
                if *len > 0 {
                    write!(f, "; {len}")?;
                }
                write!(f, "]")
            }

            Ty::Function { params, ret } => {
                write!(f, "fn(")?;
                for (i, &param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.format_type(param, f)?;
                }
                write!(f, ") -> ")?;
                self.format_type(*ret, f)
            }

            Ty::Generic { name, args } => {
                write!(f, "{}", self.names.resolve(*name))?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        self.format_type(arg, f)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }

            Ty::Class(name) | Ty::Trait(name) | Ty::Var(name) => {
                write!(f, "{}", self.names.resolve(*name))
            }
        }
    }
}

impl fmt::Display for DisplayTy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_type(self.id, f)
    }
}

pub fn type_to_string(names: &Interner, arena: &TypeArena, id: TypeId) -> String {
    DisplayTy::new(names, arena, id).to_string()
}

/// Debug rendering; currently the same as the human form.
pub fn type_to_debug_string(names: &Interner, arena: &TypeArena, id: TypeId) -> String {
    type_to_string(names, arena, id)
}
