// src/registry.rs
//
// Central naming authority: named types, aliases, generic declarations,
// classes, traits, trait impls, and the variable environment. The registry
// owns the term arena and the name interner; everything downstream borrows
// them from here.
//
// Registration happens during a single declaration pass and fails on
// collision; lookups are total and never fail. Built-in primitives are
// inserted at construction and can never be overwritten.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::arena::{TypeArena, TypeId};
use crate::errors::TypeError;
use crate::intern::{Interner, Symbol};
use crate::well_known::WellKnown;

/// Declared shape of a class: ordered fields, optional superclass, and
/// whether values of the class may be copied.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub name: Symbol,
    pub fields: Vec<(Symbol, TypeId)>,
    pub superclass: Option<Symbol>,
    pub move_only: bool,
}

/// A trait declaration: method name -> declared signature (a function term)
#[derive(Debug, Clone)]
pub struct TraitDef {
    pub name: Symbol,
    pub methods: Vec<(Symbol, TypeId)>,
}

impl TraitDef {
    pub fn method(&self, name: Symbol) -> Option<TypeId> {
        self.methods
            .iter()
            .find(|(m, _)| *m == name)
            .map(|(_, sig)| *sig)
    }
}

/// A record that `target` implements every method of `trait_name`
#[derive(Debug, Clone)]
pub struct TraitImpl {
    pub trait_name: Symbol,
    pub target: TypeId,
    pub methods: Vec<(Symbol, TypeId)>,
}

impl TraitImpl {
    pub fn method(&self, name: Symbol) -> Option<TypeId> {
        self.methods
            .iter()
            .find(|(m, _)| *m == name)
            .map(|(_, sig)| *sig)
    }
}

/// Constraint on a generic parameter: the argument must implement the trait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeConstraint {
    pub trait_name: Symbol,
}

/// One parameter of a generic declaration
#[derive(Debug, Clone)]
pub struct TypeParam {
    pub name: Symbol,
    pub constraints: Vec<TypeConstraint>,
}

/// A generic declaration: ordered parameters plus the defining term
#[derive(Debug, Clone)]
pub struct GenericDef {
    pub params: Vec<TypeParam>,
    pub definition: TypeId,
}

pub struct TypeRegistry {
    pub names: Interner,
    pub arena: TypeArena,
    pub well_known: WellKnown,

    types: FxHashMap<Symbol, TypeId>,
    aliases: FxHashMap<Symbol, TypeId>,
    generics: FxHashMap<Symbol, GenericDef>,
    classes: FxHashMap<Symbol, ClassInfo>,
    traits: FxHashMap<Symbol, TraitDef>,
    trait_impls: Vec<TraitImpl>,
    variables: FxHashMap<Symbol, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut names = Interner::new();
        let arena = TypeArena::new(&mut names);
        let well_known = WellKnown::populate(&mut names);

        let mut registry = Self {
            names,
            arena,
            well_known,
            types: FxHashMap::default(),
            aliases: FxHashMap::default(),
            generics: FxHashMap::default(),
            classes: FxHashMap::default(),
            traits: FxHashMap::default(),
            trait_impls: Vec::new(),
            variables: FxHashMap::default(),
        };

        // Built-ins: the width aliases are distinct registry keys over the
        // canonicalized terms, so `int32` resolves to the `int` term while
        // `int64` stays a term of its own.
        for key in [
            "int", "int32", "int64", "float", "float32", "float64", "bool", "string", "void",
            "null",
        ] {
            let term = registry.arena.basic_named(&mut registry.names, key);
            let sym = registry.names.intern(key);
            registry.types.insert(sym, term);
        }

        // The standard constructors are declared from the start; their
        // defining term is the application to their own parameters, so
        // instantiation substitutes arguments straight in.
        let t = registry.names.intern("T");
        let e = registry.names.intern("E");
        let t_var = registry.arena.var(t);
        let e_var = registry.arena.var(e);
        let one_param = vec![TypeParam {
            name: t,
            constraints: vec![],
        }];
        let two_params = vec![
            TypeParam {
                name: t,
                constraints: vec![],
            },
            TypeParam {
                name: e,
                constraints: vec![],
            },
        ];
        let standard = [
            (registry.well_known.array, one_param.clone(), vec![t_var]),
            (registry.well_known.option, one_param, vec![t_var]),
            (registry.well_known.result, two_params, vec![t_var, e_var]),
        ];
        for (name, params, args) in standard {
            let definition = registry.arena.generic(name, args);
            registry
                .generics
                .insert(name, GenericDef { params, definition });
            registry.types.insert(name, definition);
        }

        registry
    }

    /// Intern a name. Convenience passthrough for callers building terms.
    pub fn symbol(&mut self, s: &str) -> Symbol {
        self.names.intern(s)
    }

    pub fn symbol_str(&self, sym: Symbol) -> &str {
        self.names.resolve(sym)
    }

    // ========================================================================
    // Registration - declaration-pass writes, collision means error
    // ========================================================================

    pub fn register_type(&mut self, name: Symbol, ty: TypeId) -> Result<(), TypeError> {
        if self.types.contains_key(&name) {
            return Err(TypeError::DuplicateRegistration {
                kind: "type",
                name: self.names.resolve(name).to_string(),
            });
        }
        self.types.insert(name, ty);
        Ok(())
    }

    /// Aliases resolve eagerly on lookup; re-registration replaces the old
    /// target (last write wins).
    pub fn register_alias(&mut self, name: Symbol, ty: TypeId) {
        self.aliases.insert(name, ty);
    }

    pub fn register_generic(
        &mut self,
        name: Symbol,
        params: Vec<TypeParam>,
        definition: TypeId,
    ) -> Result<(), TypeError> {
        if self.generics.contains_key(&name) {
            return Err(TypeError::DuplicateRegistration {
                kind: "generic",
                name: self.names.resolve(name).to_string(),
            });
        }
        self.generics.insert(name, GenericDef { params, definition });
        self.types.entry(name).or_insert(definition);
        Ok(())
    }

    /// Register a class: stores its info and a nominal term under its name.
    /// A class whose non-pointer fields reach back to itself is rejected.
    pub fn register_class(&mut self, info: ClassInfo) -> Result<TypeId, TypeError> {
        let name = info.name;
        if self.classes.contains_key(&name) || self.types.contains_key(&name) {
            return Err(TypeError::DuplicateRegistration {
                kind: "class",
                name: self.names.resolve(name).to_string(),
            });
        }

        let term = self.arena.class(name);
        self.classes.insert(name, info);
        self.types.insert(name, term);

        if let Err(err) = crate::validate::check_circular(self, term) {
            self.classes.remove(&name);
            self.types.remove(&name);
            return Err(err);
        }

        debug!(class = self.names.resolve(name), "registered class");
        Ok(term)
    }

    pub fn register_trait(&mut self, def: TraitDef) -> Result<(), TypeError> {
        if self.traits.contains_key(&def.name) {
            return Err(TypeError::DuplicateRegistration {
                kind: "trait",
                name: self.names.resolve(def.name).to_string(),
            });
        }
        self.traits.insert(def.name, def);
        Ok(())
    }

    /// Register a trait implementation after checking it against the trait
    /// declaration: every declared method present with an identical function
    /// signature, and nothing the trait does not declare.
    pub fn register_trait_impl(&mut self, imp: TraitImpl) -> Result<(), TypeError> {
        let Some(trait_def) = self.traits.get(&imp.trait_name) else {
            return Err(TypeError::UnknownTrait {
                name: self.names.resolve(imp.trait_name).to_string(),
            });
        };

        for &(method, declared) in &trait_def.methods {
            let Some(provided) = imp.method(method) else {
                return Err(TypeError::MissingMethod {
                    trait_name: self.names.resolve(imp.trait_name).to_string(),
                    method: self.names.resolve(method).to_string(),
                });
            };
            if !self.arena.is_function(declared)
                || !self.arena.is_function(provided)
                || provided != declared
            {
                return Err(TypeError::MethodSignatureMismatch {
                    method: self.names.resolve(method).to_string(),
                    expected: self.display(declared),
                    found: self.display(provided),
                });
            }
        }

        for &(method, _) in &imp.methods {
            if trait_def.method(method).is_none() {
                return Err(TypeError::UndeclaredMethod {
                    trait_name: self.names.resolve(imp.trait_name).to_string(),
                    method: self.names.resolve(method).to_string(),
                });
            }
        }

        debug!(
            trait_name = self.names.resolve(imp.trait_name),
            target = %self.display(imp.target),
            "registered trait impl"
        );
        self.trait_impls.push(imp);
        Ok(())
    }

    pub fn define_variable(&mut self, name: Symbol, ty: TypeId) {
        self.variables.insert(name, ty);
    }

    // ========================================================================
    // Lookups - total, never fail
    // ========================================================================

    pub fn lookup_type(&self, name: Symbol) -> Option<TypeId> {
        self.types.get(&name).copied()
    }

    pub fn resolve_alias(&self, name: Symbol) -> Option<TypeId> {
        self.aliases.get(&name).copied()
    }

    pub fn generic_def(&self, name: Symbol) -> Option<&GenericDef> {
        self.generics.get(&name)
    }

    pub fn type_parameters(&self, name: Symbol) -> Option<&[TypeParam]> {
        self.generics.get(&name).map(|def| def.params.as_slice())
    }

    pub fn class_info(&self, name: Symbol) -> Option<&ClassInfo> {
        self.classes.get(&name)
    }

    pub fn trait_def(&self, name: Symbol) -> Option<&TraitDef> {
        self.traits.get(&name)
    }

    pub fn trait_impl(&self, trait_name: Symbol, target: TypeId) -> Option<&TraitImpl> {
        self.trait_impls
            .iter()
            .find(|imp| imp.trait_name == trait_name && imp.target == target)
    }

    pub fn trait_impls_for(&self, target: TypeId) -> impl Iterator<Item = &TraitImpl> {
        self.trait_impls.iter().filter(move |imp| imp.target == target)
    }

    pub fn lookup_variable(&self, name: Symbol) -> Option<TypeId> {
        self.variables.get(&name).copied()
    }

    // ========================================================================
    // Typed accessors for built-ins
    // ========================================================================

    pub fn int_ty(&self) -> TypeId {
        self.arena.int()
    }
    pub fn int64_ty(&self) -> TypeId {
        self.arena.int64()
    }
    pub fn float_ty(&self) -> TypeId {
        self.arena.float()
    }
    pub fn float64_ty(&self) -> TypeId {
        self.arena.float64()
    }
    pub fn bool_ty(&self) -> TypeId {
        self.arena.boolean()
    }
    pub fn string_ty(&self) -> TypeId {
        self.arena.string()
    }
    pub fn void_ty(&self) -> TypeId {
        self.arena.void()
    }
    pub fn null_ty(&self) -> TypeId {
        self.arena.null()
    }

    // ========================================================================
    // Convenience constructors for the standard generic shapes
    // ========================================================================

    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        let name = self.well_known.array;
        self.arena.generic(name, vec![element])
    }

    pub fn pointer_to(&mut self, pointee: TypeId) -> TypeId {
        self.arena.pointer(pointee, false)
    }

    pub fn reference_to(&mut self, referent: TypeId) -> TypeId {
        self.arena.reference(referent, false)
    }

    pub fn option_of(&mut self, inner: TypeId) -> TypeId {
        let name = self.well_known.option;
        self.arena.generic(name, vec![inner])
    }

    pub fn result_of(&mut self, ok: TypeId, err: TypeId) -> TypeId {
        let name = self.well_known.result;
        self.arena.generic(name, vec![ok, err])
    }

    /// Human-readable rendering of a term, for diagnostics
    pub fn display(&self, id: TypeId) -> String {
        crate::display::type_to_string(&self.names, &self.arena, id)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
