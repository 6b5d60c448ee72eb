// src/arena.rs
//
// Interned type terms using TypeId handles for O(1) equality and minimal
// allocations. Terms are immutable once interned and shared freely; the
// arena deduplicates on construction, so structural equality of ground
// terms reduces to TypeId comparison.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::intern::{Interner, Symbol};

/// Handle to an interned type term.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    /// Get the raw index (for debugging/serialization)
    pub fn index(self) -> u32 {
        self.0
    }
}

/// SmallVec for term children - inline up to 4 (covers most argument lists)
pub type TypeIdVec = SmallVec<[TypeId; 4]>;

/// Kind tag for basic terms. `Unknown` covers the `null` sentinel and
/// spellings the subsystem has no opinion about (e.g. `char`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Int,
    Float,
    Bool,
    String,
    Void,
    Unknown,
}

/// A type term. Children are TypeIds into the owning arena.
///
/// Class and Trait are nominal: the term is just the name, and details
/// (fields, superclass, methods) live in the registry. The rest are
/// structural and compared member-wise, which interning collapses to id
/// comparison.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Ty {
    /// Primitive or sentinel, identified by its canonical spelling
    Basic { kind: BasicKind, name: Symbol },

    /// Unique pointers are move-only; shared pointers are copyable
    Pointer { pointee: TypeId, unique: bool },

    Reference { referent: TypeId, mutable: bool },

    /// `len == 0` denotes a dynamic array (pointer-sized handle)
    Array { element: TypeId, len: usize },

    Function { params: TypeIdVec, ret: TypeId },

    /// Generic application of a named constructor, e.g. `Option<T>`
    Generic { name: Symbol, args: TypeIdVec },

    Class(Symbol),

    Trait(Symbol),

    /// Inference placeholder, replaced through the substitution
    Var(Symbol),
}

/// Pre-interned primitive terms for O(1) access
#[derive(Debug, Clone, Copy)]
pub struct Primitives {
    pub int: TypeId,
    pub int64: TypeId,
    pub float: TypeId,
    pub float64: TypeId,
    pub boolean: TypeId,
    pub string: TypeId,
    pub void: TypeId,
    /// The `null` sentinel, a subtype of every pointer type
    pub null: TypeId,
}

/// Per-compilation term arena with automatic interning/deduplication.
pub struct TypeArena {
    /// Interned terms, indexed by TypeId
    types: Vec<Ty>,
    /// Deduplication map - hashbrown for better perf
    intern_map: HashMap<Ty, TypeId>,
    /// Pre-interned primitives for O(1) access
    pub primitives: Primitives,
}

impl TypeArena {
    /// Create an arena with the canonical primitives pre-interned.
    pub fn new(names: &mut Interner) -> Self {
        let placeholder = TypeId(0);
        let mut arena = Self {
            types: Vec::new(),
            intern_map: HashMap::new(),
            primitives: Primitives {
                int: placeholder,
                int64: placeholder,
                float: placeholder,
                float64: placeholder,
                boolean: placeholder,
                string: placeholder,
                void: placeholder,
                null: placeholder,
            },
        };

        arena.primitives.int = arena.basic(BasicKind::Int, names.intern("int"));
        arena.primitives.int64 = arena.basic(BasicKind::Int, names.intern("int64"));
        arena.primitives.float = arena.basic(BasicKind::Float, names.intern("float"));
        arena.primitives.float64 = arena.basic(BasicKind::Float, names.intern("float64"));
        arena.primitives.boolean = arena.basic(BasicKind::Bool, names.intern("bool"));
        arena.primitives.string = arena.basic(BasicKind::String, names.intern("string"));
        arena.primitives.void = arena.basic(BasicKind::Void, names.intern("void"));
        arena.primitives.null = arena.basic(BasicKind::Unknown, names.intern("null"));

        arena
    }

    /// Intern a term, returning the existing TypeId if already interned
    fn intern(&mut self, ty: Ty) -> TypeId {
        let next_id = TypeId(self.types.len() as u32);
        *self.intern_map.entry(ty.clone()).or_insert_with(|| {
            self.types.push(ty);
            next_id
        })
    }

    /// Get the term for a TypeId
    pub fn get(&self, id: TypeId) -> &Ty {
        &self.types[id.0 as usize]
    }

    // ========================================================================
    // Primitive accessors
    // ========================================================================

    pub fn int(&self) -> TypeId {
        self.primitives.int
    }
    pub fn int64(&self) -> TypeId {
        self.primitives.int64
    }
    pub fn float(&self) -> TypeId {
        self.primitives.float
    }
    pub fn float64(&self) -> TypeId {
        self.primitives.float64
    }
    pub fn boolean(&self) -> TypeId {
        self.primitives.boolean
    }
    pub fn string(&self) -> TypeId {
        self.primitives.string
    }
    pub fn void(&self) -> TypeId {
        self.primitives.void
    }
    pub fn null(&self) -> TypeId {
        self.primitives.null
    }

    // ========================================================================
    // Term builders - intern on construction
    // ========================================================================

    fn basic(&mut self, kind: BasicKind, name: Symbol) -> TypeId {
        self.intern(Ty::Basic { kind, name })
    }

    /// Build a basic term from a spelling, canonicalizing the width aliases
    /// so each primitive has exactly one term: `int32` folds into `int`,
    /// `float32` into `float`, and `double` into `float64`.
    pub fn basic_named(&mut self, names: &mut Interner, spelling: &str) -> TypeId {
        match spelling {
            "int" | "int32" => self.primitives.int,
            "int64" => self.primitives.int64,
            "float" | "float32" => self.primitives.float,
            "float64" | "double" => self.primitives.float64,
            "bool" => self.primitives.boolean,
            "string" => self.primitives.string,
            "void" => self.primitives.void,
            "null" => self.primitives.null,
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "uint32" | "uint64" => {
                let name = names.intern(spelling);
                self.basic(BasicKind::Int, name)
            }
            "f32" | "f64" => {
                let name = names.intern(spelling);
                self.basic(BasicKind::Float, name)
            }
            _ => {
                let name = names.intern(spelling);
                self.basic(BasicKind::Unknown, name)
            }
        }
    }

    pub fn pointer(&mut self, pointee: TypeId, unique: bool) -> TypeId {
        self.intern(Ty::Pointer { pointee, unique })
    }

    pub fn reference(&mut self, referent: TypeId, mutable: bool) -> TypeId {
        self.intern(Ty::Reference { referent, mutable })
    }

    /// `len == 0` builds a dynamic array
    pub fn array(&mut self, element: TypeId, len: usize) -> TypeId {
        self.intern(Ty::Array { element, len })
    }

    pub fn function(&mut self, params: impl Into<TypeIdVec>, ret: TypeId) -> TypeId {
        self.intern(Ty::Function {
            params: params.into(),
            ret,
        })
    }

    pub fn generic(&mut self, name: Symbol, args: impl Into<TypeIdVec>) -> TypeId {
        self.intern(Ty::Generic {
            name,
            args: args.into(),
        })
    }

    pub fn class(&mut self, name: Symbol) -> TypeId {
        self.intern(Ty::Class(name))
    }

    pub fn trait_ty(&mut self, name: Symbol) -> TypeId {
        self.intern(Ty::Trait(name))
    }

    pub fn var(&mut self, name: Symbol) -> TypeId {
        self.intern(Ty::Var(name))
    }

    // ========================================================================
    // Classification
    // ========================================================================

    pub fn is_integral(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Basic { kind: BasicKind::Int, .. })
    }

    pub fn is_floating(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Basic { kind: BasicKind::Float, .. })
    }

    pub fn is_numeric(&self, id: TypeId) -> bool {
        self.is_integral(id) || self.is_floating(id)
    }

    /// Unsigned spellings are the only unsigned integers; everything else
    /// numeric is signed.
    pub fn is_signed(&self, names: &Interner, id: TypeId) -> bool {
        match self.get(id) {
            Ty::Basic { kind: BasicKind::Int, name } => !matches!(
                names.resolve(*name),
                "u8" | "u16" | "u32" | "u64" | "uint32" | "uint64"
            ),
            Ty::Basic { kind: BasicKind::Float, .. } => true,
            _ => false,
        }
    }

    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Pointer { .. })
    }

    pub fn is_reference(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Reference { .. })
    }

    pub fn is_array(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Array { .. })
    }

    pub fn is_function(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Function { .. })
    }

    pub fn is_generic(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Generic { .. })
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Basic { kind: BasicKind::Void, .. })
    }

    pub fn is_var(&self, id: TypeId) -> bool {
        matches!(self.get(id), Ty::Var(_))
    }
}
