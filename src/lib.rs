// src/lib.rs
//! Static type subsystem of the Stoat compiler.
//!
//! Answers three questions for the rest of the compiler: is this type
//! well-formed, does a value of type A flow into a context expecting B,
//! and what type does this expression have. Terms are hash-consed into a
//! [`arena::TypeArena`]; the [`registry::TypeRegistry`] is the naming
//! authority for declared entities; [`infer::TypeChecker`] ties the
//! pieces together for drivers.
//!
//! Everything is synchronous and single-threaded per instance; parallel
//! compilation uses independent registries per module.

pub mod arena;
pub mod ast;
pub mod compat;
pub mod display;
pub mod errors;
pub mod generics;
pub mod infer;
pub mod intern;
pub mod layout;
pub mod mangle;
pub mod registry;
pub mod resolve;
pub mod subst;
pub mod unify;
pub mod validate;
pub mod well_known;

#[cfg(test)]
mod prop_tests;

pub use arena::{BasicKind, Ty, TypeArena, TypeId, TypeIdVec};
pub use errors::TypeError;
pub use infer::TypeChecker;
pub use intern::{Interner, Symbol};
pub use registry::{
    ClassInfo, GenericDef, TraitDef, TraitImpl, TypeConstraint, TypeParam, TypeRegistry,
};
pub use subst::Substitution;
pub use well_known::WellKnown;
