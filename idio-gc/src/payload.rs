//! The data a heap record carries alongside its [`idio_value::HeapHeader`]
//! (spec §3.3). Container kinds the collector must walk are modelled
//! explicitly; record kinds outside this crate's scope (closures,
//! continuations, modules, …) are carried as [`Payload::Opaque`], which
//! still traces whatever child `Idio` values it lists generically.

use std::rc::Rc;

use idio_bignum::Bignum;
use idio_bitset::Bitset;
use idio_string::IdioString;
use idio_value::{HeapType, Idio};

/// One entry of a (possibly weak-keyed) hash table.
#[derive(Debug, Clone)]
pub struct HashEntry {
    /// The key. If the owning table is weak-keyed, this is not itself a
    /// marking root: it survives only if reachable some other way (spec
    /// §4.1 "Weak-keyed hash tables").
    pub key: Idio,
    /// The value. Marked only once the key is known live.
    pub value: Idio,
}

/// A hash table record (spec §3.3 `Hash`).
#[derive(Debug, Clone, Default)]
pub struct HashRecord {
    /// Whether keys are weak references (spec §4.1).
    pub weak_keyed: bool,
    /// The table's entries, in insertion order.
    pub entries: Vec<HashEntry>,
}

/// The payload stored alongside every heap record's header.
#[derive(Debug, Clone)]
pub enum Payload {
    /// `(head . tail)`.
    Pair(Idio, Idio),
    /// A string, substring, octet string, or pathname.
    String(Rc<IdioString>),
    /// An arbitrary-precision integer or real.
    Bignum(Rc<Bignum>),
    /// A sized bit array.
    Bitset(Bitset),
    /// A resizeable array of values.
    Array(Vec<Idio>),
    /// A hash table, possibly weak-keyed.
    Hash(HashRecord),
    /// An interned symbol's name. Interning itself (a global name table,
    /// so `eq?` on symbols is pointer equality) is a module-system concern
    /// the spec places "elsewhere" (§3.3); the reader allocates one record
    /// per occurrence and leaves deduplication to that table.
    Symbol(Rc<str>),
    /// A keyword's name, without its leading `:` (spec §4.7 "Numbers":
    /// "a leading `:` followed by a non-punctuation char marks a
    /// keyword").
    Keyword(Rc<str>),
    /// Anything else (module, closure, primitive, struct type/instance,
    /// thread, continuation, frame, boxed C scalar, …): opaque to the
    /// collector except for the `Idio` values it lists as children, which
    /// are traced like any composite's.
    Opaque {
        /// The record's true type, for printers/introspection.
        ty: HeapType,
        /// Every `Idio` this record directly references.
        children: Vec<Idio>,
    },
}

impl Payload {
    /// The [`HeapType`] this payload represents.
    pub fn heap_type(&self) -> HeapType {
        match self {
            Payload::Pair(..) => HeapType::Pair,
            Payload::String(_) => HeapType::String,
            Payload::Bignum(_) => HeapType::Bignum,
            Payload::Bitset(_) => HeapType::Bitset,
            Payload::Array(_) => HeapType::Array,
            Payload::Hash(_) => HeapType::Hash,
            Payload::Symbol(_) => HeapType::Symbol,
            Payload::Keyword(_) => HeapType::Keyword,
            Payload::Opaque { ty, .. } => *ty,
        }
    }

    /// Whether this payload is a composite that needs lazy-grey tracing
    /// rather than being marked black on first visit (spec §4.1).
    pub fn is_composite(&self) -> bool {
        !matches!(
            self,
            Payload::String(_) | Payload::Bignum(_) | Payload::Bitset(_) | Payload::Symbol(_) | Payload::Keyword(_)
        )
    }

    /// Every child `Idio` a non-weak trace must follow. For a weak-keyed
    /// hash, only values are returned here — keys are handled separately
    /// by the fixed-point weak-table pass (spec §4.1).
    pub fn strong_children(&self) -> Vec<Idio> {
        match self {
            Payload::Pair(a, b) => vec![*a, *b],
            Payload::Array(items) => items.clone(),
            Payload::Hash(h) if h.weak_keyed => h.entries.iter().map(|e| e.value).collect(),
            Payload::Hash(h) => h.entries.iter().flat_map(|e| [e.key, e.value]).collect(),
            Payload::Opaque { children, .. } => children.clone(),
            Payload::String(_) | Payload::Bignum(_) | Payload::Bitset(_) => vec![],
            Payload::Symbol(_) | Payload::Keyword(_) => vec![],
        }
    }
}
