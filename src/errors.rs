// src/errors.rs
//! Type-subsystem diagnostics (E21xx).
//!
//! Every fallible operation returns the first error it encounters; nothing
//! here panics. Diagnostics name the offending entity so a driver can attach
//! source spans when rendering.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum TypeError {
    #[error("unknown type '{name}'")]
    #[diagnostic(code(E2101))]
    UnknownType { name: String },

    #[error("unknown variable '{name}'")]
    #[diagnostic(code(E2102))]
    UnknownVariable { name: String },

    #[error("unknown trait '{name}'")]
    #[diagnostic(code(E2103))]
    UnknownTrait { name: String },

    #[error("{kind} '{name}' is already registered")]
    #[diagnostic(code(E2104))]
    DuplicateRegistration {
        kind: &'static str,
        name: String,
    },

    #[error("expected {expected} {what}, found {found}")]
    #[diagnostic(code(E2105))]
    WrongArgumentCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("type '{ty}' does not satisfy trait bound '{trait_name}'")]
    #[diagnostic(code(E2106))]
    UnsatisfiedBound { ty: String, trait_name: String },

    #[error("implementation of trait '{trait_name}' is missing method '{method}'")]
    #[diagnostic(code(E2107))]
    MissingMethod {
        trait_name: String,
        method: String,
    },

    #[error("method '{method}' is not declared by trait '{trait_name}'")]
    #[diagnostic(code(E2108))]
    UndeclaredMethod {
        trait_name: String,
        method: String,
    },

    #[error("method '{method}' has signature {found}, trait declares {expected}")]
    #[diagnostic(code(E2109))]
    MethodSignatureMismatch {
        method: String,
        expected: String,
        found: String,
    },

    #[error("circular type dependency detected: '{name}'")]
    #[diagnostic(
        code(E2110),
        help("break the cycle with a pointer or reference field")
    )]
    CircularDependency { name: String },

    #[error("Cannot unify incompatible types")]
    #[diagnostic(code(E2111), help("no common type for {left} and {right}"))]
    Incompatible { left: String, right: String },

    #[error("cannot construct infinite type: '{var}' occurs in {ty}")]
    #[diagnostic(code(E2112))]
    InfiniteType { var: String, ty: String },

    #[error("null type in {context}")]
    #[diagnostic(code(E2113))]
    NullOperand { context: &'static str },

    #[error("cannot call non-function type '{ty}'")]
    #[diagnostic(code(E2114))]
    NotCallable { ty: String },

    #[error("expected a generic type, found '{ty}'")]
    #[diagnostic(code(E2115))]
    NotGeneric { ty: String },

    #[error("cannot infer the element type of an empty list")]
    #[diagnostic(code(E2116), help("annotate the expected element type"))]
    EmptyList,
}
