// src/well_known.rs
//
// Cached symbols for well-known names: the standard generic constructors
// used by the convenience builders, and the resource primitives that are
// move-only. Interned once at registry construction and compared by id
// afterwards.

use crate::intern::{Interner, Symbol};

#[derive(Debug, Clone, Copy)]
pub struct WellKnown {
    pub array: Symbol,
    pub vec: Symbol,
    pub option: Symbol,
    pub result: Symbol,

    // Resource primitives; owning one of these is not copyable
    pub file: Symbol,
    pub socket: Symbol,
    pub mutex: Symbol,
    pub thread: Symbol,
}

impl WellKnown {
    pub fn populate(names: &mut Interner) -> Self {
        Self {
            array: names.intern("Array"),
            vec: names.intern("Vec"),
            option: names.intern("Option"),
            result: names.intern("Result"),
            file: names.intern("File"),
            socket: names.intern("Socket"),
            mutex: names.intern("Mutex"),
            thread: names.intern("Thread"),
        }
    }

    /// Array-like generic constructors
    pub fn is_array_ctor(&self, name: Symbol) -> bool {
        name == self.array || name == self.vec
    }

    pub fn is_resource(&self, name: Symbol) -> bool {
        name == self.file || name == self.socket || name == self.mutex || name == self.thread
    }
}
