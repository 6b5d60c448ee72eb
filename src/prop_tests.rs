// src/prop_tests.rs
//! Property tests for the structural predicates, unification, and layout.
//!
//! These stress invariants that must hold for ANY term, not just
//! hand-picked examples:
//!
//! 1. Equality and subtyping are reflexive
//! 2. Equality is symmetric
//! 3. null is a subtype of every pointer type
//! 4. Subtyping is transitive along class chains
//! 5. Function subtyping is exactly contravariant parameters plus
//!    covariant return
//! 6. Unifying equal terms returns an equal term
//! 7. The empty substitution is the identity
//! 8. Disjoint substitutions compose
//! 9. Sizes are deterministic across independently built registries
//! 10. Class alignment is the max of the field alignments
//! 11. A class ring linked by value fields is rejected at registration;
//!     one pointer link anywhere legalizes it
//! 12. Mangling is injective over the primitive spellings
//!
//! Terms are generated as arena-free recipes and built into a fresh
//! registry inside each case, since TypeIds only mean something relative
//! to one arena.

use proptest::prelude::*;

use crate::arena::TypeId;
use crate::compat::{self, types_equal};
use crate::errors::TypeError;
use crate::intern::Symbol;
use crate::layout;
use crate::mangle;
use crate::registry::{ClassInfo, TypeRegistry};
use crate::subst::{self, Substitution};
use crate::unify;

const CLASS_POOL: &[&str] = &["Foo", "Bar", "Baz", "Quux"];
const VAR_POOL: &[&str] = &["T0", "T1", "T2", "T3"];

/// Every spelling the mangler can see on a basic term, including the
/// width aliases that canonicalize into shared terms.
const PRIMITIVE_SPELLINGS: &[&str] = &[
    "int", "int32", "int64", "uint32", "uint64", "float", "float32", "float64", "double", "bool",
    "string", "void", "null", "char", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32",
    "f64",
];

/// Register the whole CLASS_POOL as a linear inheritance chain: each class
/// extends the next, the last has no superclass. Returns the class terms
/// in pool order, most-derived first.
fn register_class_chain(reg: &mut TypeRegistry) -> Vec<TypeId> {
    for (i, &name) in CLASS_POOL.iter().enumerate() {
        let name = reg.symbol(name);
        let superclass = CLASS_POOL.get(i + 1).map(|&parent| reg.symbol(parent));
        reg.register_class(ClassInfo {
            name,
            fields: vec![],
            superclass,
            move_only: false,
        })
        .unwrap();
    }
    CLASS_POOL
        .iter()
        .map(|&name| {
            let sym = reg.symbol(name);
            reg.arena.class(sym)
        })
        .collect()
}

/// Arena-independent description of a term.
#[derive(Debug, Clone)]
enum Recipe {
    Int,
    Int64,
    Float,
    Float64,
    Bool,
    Str,
    Void,
    Null,
    Var(usize),
    Class(usize),
    Pointer(Box<Recipe>, bool),
    Reference(Box<Recipe>, bool),
    Array(Box<Recipe>, usize),
    Function(Vec<Recipe>, Box<Recipe>),
    Option(Box<Recipe>),
}

fn build(reg: &mut TypeRegistry, recipe: &Recipe) -> TypeId {
    match recipe {
        Recipe::Int => reg.int_ty(),
        Recipe::Int64 => reg.int64_ty(),
        Recipe::Float => reg.float_ty(),
        Recipe::Float64 => reg.float64_ty(),
        Recipe::Bool => reg.bool_ty(),
        Recipe::Str => reg.string_ty(),
        Recipe::Void => reg.void_ty(),
        Recipe::Null => reg.null_ty(),
        Recipe::Var(i) => {
            let name = reg.symbol(VAR_POOL[*i]);
            reg.arena.var(name)
        }
        Recipe::Class(i) => {
            let name = reg.symbol(CLASS_POOL[*i]);
            reg.arena.class(name)
        }
        Recipe::Pointer(inner, unique) => {
            let inner = build(reg, inner);
            reg.arena.pointer(inner, *unique)
        }
        Recipe::Reference(inner, mutable) => {
            let inner = build(reg, inner);
            reg.arena.reference(inner, *mutable)
        }
        Recipe::Array(inner, len) => {
            let inner = build(reg, inner);
            reg.arena.array(inner, *len)
        }
        Recipe::Function(params, ret) => {
            let params: Vec<TypeId> = params.iter().map(|p| build(reg, p)).collect();
            let ret = build(reg, ret);
            reg.arena.function(params, ret)
        }
        Recipe::Option(inner) => {
            let inner = build(reg, inner);
            reg.option_of(inner)
        }
    }
}

fn leaf() -> impl Strategy<Value = Recipe> {
    prop_oneof![
        Just(Recipe::Int),
        Just(Recipe::Int64),
        Just(Recipe::Float),
        Just(Recipe::Float64),
        Just(Recipe::Bool),
        Just(Recipe::Str),
        Just(Recipe::Void),
        Just(Recipe::Null),
        (0..VAR_POOL.len()).prop_map(Recipe::Var),
        (0..CLASS_POOL.len()).prop_map(Recipe::Class),
    ]
}

fn arb_recipe() -> impl Strategy<Value = Recipe> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), any::<bool>())
                .prop_map(|(r, unique)| Recipe::Pointer(Box::new(r), unique)),
            (inner.clone(), any::<bool>())
                .prop_map(|(r, mutable)| Recipe::Reference(Box::new(r), mutable)),
            (inner.clone(), 0usize..8)
                .prop_map(|(r, len)| Recipe::Array(Box::new(r), len)),
            (prop::collection::vec(inner.clone(), 0..3), inner.clone())
                .prop_map(|(params, ret)| Recipe::Function(params, Box::new(ret))),
            inner.prop_map(|r| Recipe::Option(Box::new(r))),
        ]
    })
}

/// Ground recipes only: no inference variables inside.
fn arb_ground_recipe() -> impl Strategy<Value = Recipe> {
    arb_recipe().prop_filter("no vars", |r| !contains_var(r))
}

fn contains_var(recipe: &Recipe) -> bool {
    match recipe {
        Recipe::Var(_) => true,
        Recipe::Pointer(inner, _)
        | Recipe::Reference(inner, _)
        | Recipe::Array(inner, _)
        | Recipe::Option(inner) => contains_var(inner),
        Recipe::Function(params, ret) => params.iter().any(contains_var) || contains_var(ret),
        _ => false,
    }
}

/// Sized leaves only, for the layout properties.
fn sized_leaf() -> impl Strategy<Value = Recipe> {
    prop_oneof![
        Just(Recipe::Int),
        Just(Recipe::Int64),
        Just(Recipe::Float),
        Just(Recipe::Float64),
        Just(Recipe::Bool),
    ]
}

proptest! {
    #[test]
    fn equality_and_subtyping_are_reflexive(recipe in arb_recipe()) {
        let mut reg = TypeRegistry::new();
        let t = build(&mut reg, &recipe);
        prop_assert!(types_equal(Some(t), Some(t)));
        prop_assert!(compat::is_subtype(&reg, t, t));
    }

    #[test]
    fn equality_is_symmetric(a in arb_recipe(), b in arb_recipe()) {
        let mut reg = TypeRegistry::new();
        let ta = build(&mut reg, &a);
        let tb = build(&mut reg, &b);
        prop_assert_eq!(types_equal(Some(ta), Some(tb)), types_equal(Some(tb), Some(ta)));
    }

    #[test]
    fn null_subtypes_every_pointer(recipe in arb_recipe(), unique in any::<bool>()) {
        let mut reg = TypeRegistry::new();
        let pointee = build(&mut reg, &recipe);
        let ptr = reg.arena.pointer(pointee, unique);
        let null = reg.null_ty();
        prop_assert!(compat::is_subtype(&reg, null, ptr));
    }

    #[test]
    fn subtyping_is_transitive_on_class_chains(
        a in 0..CLASS_POOL.len(),
        b in 0..CLASS_POOL.len(),
        c in 0..CLASS_POOL.len(),
    ) {
        let mut reg = TypeRegistry::new();
        let chain = register_class_chain(&mut reg);

        // Lower index = more derived, so sorted indices give sub <: mid <: sup
        let mut indices = [a, b, c];
        indices.sort_unstable();
        let [lo, mid, hi] = indices;

        prop_assert!(compat::is_subtype(&reg, chain[lo], chain[mid]));
        prop_assert!(compat::is_subtype(&reg, chain[mid], chain[hi]));
        prop_assert!(compat::is_subtype(&reg, chain[lo], chain[hi]));
    }

    #[test]
    fn function_variance_biconditional(
        a in arb_recipe(),
        a_prime in arb_recipe(),
        b in arb_recipe(),
        b_prime in arb_recipe(),
    ) {
        let mut reg = TypeRegistry::new();
        register_class_chain(&mut reg);
        let ta = build(&mut reg, &a);
        let ta_prime = build(&mut reg, &a_prime);
        let tb = build(&mut reg, &b);
        let tb_prime = build(&mut reg, &b_prime);

        // (A' -> B) <: (A -> B')  iff  A <: A' and B <: B'
        let sub_fn = reg.arena.function(vec![ta_prime], tb);
        let sup_fn = reg.arena.function(vec![ta], tb_prime);
        let expected = compat::is_subtype(&reg, ta, ta_prime)
            && compat::is_subtype(&reg, tb, tb_prime);
        prop_assert_eq!(compat::is_subtype(&reg, sub_fn, sup_fn), expected);
    }

    #[test]
    fn unify_covers_equality(recipe in arb_ground_recipe()) {
        let mut reg = TypeRegistry::new();
        let t1 = build(&mut reg, &recipe);
        let t2 = build(&mut reg, &recipe);
        prop_assert_eq!(t1, t2, "interning must canonicalize equal builds");

        let mut bindings = Substitution::new();
        let unified = unify::unify(&mut reg, t1, t2, &mut bindings).unwrap();
        prop_assert!(types_equal(Some(unified), Some(t1)));
    }

    #[test]
    fn empty_substitution_is_identity(recipe in arb_recipe()) {
        let mut reg = TypeRegistry::new();
        let t = build(&mut reg, &recipe);
        let empty = Substitution::new();
        prop_assert_eq!(subst::apply(&mut reg.arena, &empty, t), t);
    }

    #[test]
    fn disjoint_substitutions_compose(recipe in arb_recipe()) {
        let mut reg = TypeRegistry::new();
        let t = build(&mut reg, &recipe);
        let int = reg.int_ty();
        let string = reg.string_ty();
        let t0 = reg.symbol(VAR_POOL[0]);
        let t1 = reg.symbol(VAR_POOL[1]);

        let s1 = Substitution::singleton(t0, int);
        let s2 = Substitution::singleton(t1, string);
        let mut union = s1.clone();
        union.extend(&s2);

        let stepped = {
            let first = subst::apply(&mut reg.arena, &s1, t);
            subst::apply(&mut reg.arena, &s2, first)
        };
        let at_once = subst::apply(&mut reg.arena, &union, t);
        prop_assert_eq!(stepped, at_once);
    }

    #[test]
    fn sizes_are_deterministic(recipe in arb_recipe()) {
        let mut reg1 = TypeRegistry::new();
        let mut reg2 = TypeRegistry::new();
        let t1 = build(&mut reg1, &recipe);
        let t2 = build(&mut reg2, &recipe);
        prop_assert_eq!(layout::size_of(&reg1, t1), layout::size_of(&reg2, t2));
        prop_assert_eq!(layout::align_of(&reg1, t1), layout::align_of(&reg2, t2));
    }

    #[test]
    fn class_alignment_is_max_field_alignment(
        fields in prop::collection::vec(sized_leaf(), 0..6)
    ) {
        let mut reg = TypeRegistry::new();
        let class_name = reg.symbol("Layout");

        let mut field_defs = Vec::new();
        let mut field_ids = Vec::new();
        for (i, recipe) in fields.iter().enumerate() {
            let field_ty = build(&mut reg, recipe);
            let field_name = reg.symbol(&format!("f{i}"));
            field_defs.push((field_name, field_ty));
            field_ids.push(field_ty);
        }

        let class = reg
            .register_class(ClassInfo {
                name: class_name,
                fields: field_defs,
                superclass: None,
                move_only: false,
            })
            .unwrap();

        let expected = field_ids
            .iter()
            .map(|&f| layout::align_of(&reg, f))
            .max()
            .unwrap_or(1);
        prop_assert_eq!(layout::align_of(&reg, class), expected);

        // And the size honors the alignment
        if let Some(size) = layout::size_of(&reg, class) {
            prop_assert_eq!(size % expected, 0);
        }
    }

    #[test]
    fn value_cycles_are_rejected_and_pointers_break_them(
        len in 2..=CLASS_POOL.len(),
        break_at in prop::option::of(0usize..CLASS_POOL.len()),
        padding in prop::collection::vec(sized_leaf(), 0..3),
    ) {
        let mut reg = TypeRegistry::new();
        let class_names: Vec<Symbol> =
            CLASS_POOL[..len].iter().map(|&name| reg.symbol(name)).collect();
        let link = reg.symbol("link");

        // A ring: each class holds the next, the last closes back to the
        // first. At most one link is behind a pointer.
        let mut results = Vec::new();
        for (i, &name) in class_names.iter().enumerate() {
            let next = reg.arena.class(class_names[(i + 1) % len]);
            let link_ty = match break_at {
                Some(at) if at % len == i => reg.arena.pointer(next, false),
                _ => next,
            };
            let mut fields = Vec::new();
            for (j, recipe) in padding.iter().enumerate() {
                let field_ty = build(&mut reg, recipe);
                let field_name = reg.symbol(&format!("f{j}"));
                fields.push((field_name, field_ty));
            }
            fields.push((link, link_ty));
            results.push(reg.register_class(ClassInfo {
                name,
                fields,
                superclass: None,
                move_only: false,
            }));
        }

        // The ring only closes at the last registration
        for result in &results[..len - 1] {
            prop_assert!(result.is_ok());
        }
        match break_at {
            Some(_) => prop_assert!(results[len - 1].is_ok()),
            None => {
                let is_circular = matches!(
                    &results[len - 1],
                    Err(TypeError::CircularDependency { .. })
                );
                prop_assert!(is_circular);
            }
        }
    }

    #[test]
    fn mangling_is_injective_on_primitives(
        a in 0..PRIMITIVE_SPELLINGS.len(),
        b in 0..PRIMITIVE_SPELLINGS.len(),
    ) {
        let mut reg = TypeRegistry::new();
        let ta = reg.arena.basic_named(&mut reg.names, PRIMITIVE_SPELLINGS[a]);
        let tb = reg.arena.basic_named(&mut reg.names, PRIMITIVE_SPELLINGS[b]);

        let mangled_a = mangle::mangled_name(&reg.names, &reg.arena, ta);
        let mangled_b = mangle::mangled_name(&reg.names, &reg.arena, tb);
        prop_assert_eq!(mangled_a == mangled_b, ta == tb);
    }
}
