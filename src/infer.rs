// src/infer.rs
//
// Expression typing: one rule per expression variant. The checker owns the
// registry; inference reads declarations, interns new terms, and never
// mutates declared entities. Rules return the first diagnostic they hit;
// the driver re-enters on the next independent subtree.

use crate::arena::{Ty, TypeId, TypeIdVec};
use crate::ast::{Expr, ExprKind, Literal};
use crate::compat;
use crate::errors::TypeError;
use crate::generics;
use crate::intern::Symbol;
use crate::layout;
use crate::registry::TypeRegistry;
use crate::resolve;
use crate::subst::{self, Substitution};
use crate::unify;
use crate::validate;
use crate::{display, mangle};

pub struct TypeChecker {
    pub registry: TypeRegistry,
    next_var: u32,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            next_var: 0,
        }
    }

    /// Mint a fresh inference variable. Fresh variables exist only during
    /// unification; a successful result never contains one.
    pub fn fresh_var(&mut self) -> TypeId {
        let name = self
            .registry
            .names
            .intern(&format!("${}", self.next_var));
        self.next_var += 1;
        self.registry.arena.var(name)
    }

    /// Infer the type of an expression.
    pub fn infer(&mut self, expr: &Expr) -> Result<TypeId, TypeError> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(self.literal_type(lit)),

            ExprKind::Identifier(name) => {
                self.registry.lookup_variable(*name).ok_or_else(|| {
                    TypeError::UnknownVariable {
                        name: self.registry.names.resolve(*name).to_string(),
                    }
                })
            }

            ExprKind::Unary(unary) => {
                let operand = self.infer(&unary.operand)?;
                match unary.op {
                    // Logical not is bool no matter what it negates
                    crate::ast::UnaryOp::Not => Ok(self.registry.bool_ty()),
                    _ => Ok(operand),
                }
            }

            ExprKind::Binary(binary) => {
                let left = self.infer(&binary.left)?;
                let right = self.infer(&binary.right)?;
                let unified = self.unify_types(left, right)?;
                if binary.op.is_comparison() {
                    Ok(self.registry.bool_ty())
                } else {
                    Ok(unified)
                }
            }

            ExprKind::Call(call) => {
                let callee = self.infer(&call.callee)?;
                // Argument-parameter checking is a higher-level concern
                // built on subtyping; partial inference proceeds without it.
                match self.registry.arena.get(callee) {
                    Ty::Function { ret, .. } => Ok(*ret),
                    _ => Err(TypeError::NotCallable {
                        ty: self.registry.display(callee),
                    }),
                }
            }

            ExprKind::Lambda(lambda) => {
                let mut params = TypeIdVec::with_capacity(lambda.params.len());
                for param in &lambda.params {
                    params.push(resolve::resolve_type(&mut self.registry, &param.ty)?);
                }
                let ret = resolve::resolve_type(&mut self.registry, &lambda.return_type)?;
                Ok(self.registry.arena.function(params, ret))
            }

            ExprKind::List(elements) => {
                let Some(first) = elements.first() else {
                    return Err(TypeError::EmptyList);
                };
                let mut element = self.infer(first)?;
                let mut bindings = Substitution::new();
                for elem in &elements[1..] {
                    let ty = self.infer(elem)?;
                    element = unify::unify(&mut self.registry, element, ty, &mut bindings)?;
                }
                let element = subst::apply(&mut self.registry.arena, &bindings, element);
                Ok(self.registry.arena.array(element, 0))
            }

            ExprKind::Grouping(inner) => self.infer(inner),

            // Statement-like expressions carry no value
            _ => Ok(self.registry.void_ty()),
        }
    }

    fn literal_type(&self, lit: &Literal) -> TypeId {
        match lit {
            // The token's spelling decides: a decimal point means float
            Literal::Number(text) => {
                if text.contains('.') {
                    self.registry.float_ty()
                } else {
                    self.registry.int_ty()
                }
            }
            Literal::Str(_) => self.registry.string_ty(),
            Literal::Bool(_) => self.registry.bool_ty(),
        }
    }

    // ========================================================================
    // Facade over the rest of the subsystem
    // ========================================================================

    /// Unify two terms under a fresh substitution and return the unified
    /// term with all bindings applied.
    pub fn unify_types(&mut self, t1: TypeId, t2: TypeId) -> Result<TypeId, TypeError> {
        let mut bindings = Substitution::new();
        let unified = unify::unify(&mut self.registry, t1, t2, &mut bindings)?;
        Ok(subst::apply(&mut self.registry.arena, &bindings, unified))
    }

    /// Unify under a caller-managed substitution, for drivers that thread
    /// bindings across several queries.
    pub fn unify_with(
        &mut self,
        t1: TypeId,
        t2: TypeId,
        bindings: &mut Substitution,
    ) -> Result<TypeId, TypeError> {
        unify::unify(&mut self.registry, t1, t2, bindings)
    }

    pub fn validate_type(&self, ty: Option<TypeId>) -> Result<TypeId, TypeError> {
        validate::validate_type(&self.registry, ty)
    }

    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        compat::is_subtype(&self.registry, sub, sup)
    }

    pub fn check_compatibility(
        &self,
        from: Option<TypeId>,
        to: Option<TypeId>,
    ) -> Result<bool, TypeError> {
        compat::check_compatibility(&self.registry, from, to)
    }

    pub fn instantiate_generic(
        &mut self,
        generic: TypeId,
        args: &[TypeId],
    ) -> Result<TypeId, TypeError> {
        generics::instantiate_generic(&mut self.registry, generic, args)
    }

    pub fn does_type_implement_trait(
        &self,
        ty: TypeId,
        trait_name: Symbol,
    ) -> Result<bool, TypeError> {
        generics::does_type_implement_trait(&self.registry, ty, trait_name)
    }

    pub fn size_of(&self, ty: TypeId) -> Option<usize> {
        layout::size_of(&self.registry, ty)
    }

    pub fn align_of(&self, ty: TypeId) -> usize {
        layout::align_of(&self.registry, ty)
    }

    pub fn is_copyable(&self, ty: TypeId) -> bool {
        compat::is_copyable(&self.registry, ty)
    }

    pub fn is_movable(&self, ty: TypeId) -> bool {
        compat::is_movable(&self.registry, ty)
    }

    pub fn is_nullable(&self, ty: TypeId) -> bool {
        compat::is_nullable(&self.registry, ty)
    }

    pub fn display(&self, ty: TypeId) -> String {
        display::type_to_string(&self.registry.names, &self.registry.arena, ty)
    }

    pub fn mangled_name(&self, ty: TypeId) -> String {
        mangle::mangled_name(&self.registry.names, &self.registry.arena, ty)
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}
