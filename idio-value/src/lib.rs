//! The `IDIO` value encoding: a single machine word that is either an
//! immediate (fixnum, constant, placeholder) or a tagged reference into the
//! GC heap (spec §3.1, §3.2, §4.2).
//!
//! This crate defines the *shape* of a heap reference (`HeapRef`, an opaque
//! id) and the header every heap record carries, but owns no allocator:
//! `idio-gc` interprets `HeapRef`s and manages the records behind them. That
//! split keeps this crate free of any GC dependency, mirroring how
//! `fuel-asm` defines `Instruction`'s bit layout independently of the
//! interpreter that executes it.

mod constant;
mod heap;
mod idio;

pub use constant::{GenericConstant, ReaderToken, UnicodeConstant};
pub use heap::{Colour, HeapFlags, HeapHeader, HeapRef, HeapType};
pub use idio::{isa, FixnumOverflow, Idio, Tag, FIXNUM_MAX, FIXNUM_MIN};
