use strum::EnumIter;

/// An opaque reference to a heap-allocated value record.
///
/// The bit layout is owned by `idio-gc` (today: generation id in the high
/// byte, slot index in the rest); this crate only shuttles the raw word
/// through the tagged-pointer encoding so that `idio-value` never needs to
/// depend on the allocator crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapRef(u64);

impl HeapRef {
    /// Wrap a raw id produced by the allocator.
    pub fn from_raw(raw: u64) -> HeapRef {
        HeapRef(raw)
    }

    /// The raw id, for the allocator to reinterpret.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// C scalar kinds boxed by a `CType` heap record (spec §3.3).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CKind {
    /// `char`
    #[default]
    Char,
    /// `signed char`
    SChar,
    /// `unsigned char`
    UChar,
    /// `short`
    Short,
    /// `unsigned short`
    UShort,
    /// `int`
    Int,
    /// `unsigned int`
    UInt,
    /// `long`
    Long,
    /// `unsigned long`
    ULong,
    /// `long long`
    LongLong,
    /// `unsigned long long`
    ULongLong,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `long double` — equality/conversion are refused (spec §9 open
    /// question: the C source disables this path with a hard error; we do
    /// the same rather than fake a wider-than-`f64` representation).
    LongDouble,
    /// A boxed native pointer, optionally carrying a type tag used by the
    /// (out-of-scope) vtable/method-dispatch system.
    Pointer,
}

/// The type discriminator stored in every heap record's header (spec §3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum HeapType {
    /// `(head . tail)` cons cell.
    Pair,
    /// A UTF-8/Unicode string, octet string, pathname, or substring.
    String,
    /// An arbitrary-precision integer or real.
    Bignum,
    /// A boxed C scalar.
    CType(CKind),
    /// A sized bit array.
    Bitset,
    /// An abstract I/O handle.
    Handle,
    /// An interned symbol.
    Symbol,
    /// An interned keyword.
    Keyword,
    /// A hash table, possibly weak-keyed.
    Hash,
    /// A resizeable array.
    Array,
    /// A module (namespace).
    Module,
    /// A closure (code + captured frame/environment).
    Closure,
    /// A primitive (built-in) procedure.
    Primitive,
    /// A struct type descriptor.
    StructType,
    /// An instance of a struct type (including lexical objects).
    StructInstance,
    /// A VM thread/continuation-context.
    Thread,
    /// A first-class continuation.
    Continuation,
    /// An activation frame.
    Frame,
}

/// GC tri-colour (spec §4.1 "Marking").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colour {
    /// Not reached by the current mark phase; swept if not sticky.
    #[default]
    White,
    /// Reached, but its children have not yet been traced
    /// ("lazy-grey": queued on the grey list, spec §4.1).
    Grey,
    /// Reached and fully traced.
    Black,
}

bitflags::bitflags! {
    /// Per-record state flags (spec §3.2: free, sticky, finalizer, plus the
    /// "general flags" bucket). Type-specific flags are a second, separate
    /// bitset (`HeapHeader::type_flags`) since their meaning depends on
    /// `HeapType`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeapFlags: u16 {
        /// On the free-list, not a live value.
        const FREE        = 0b0000_0001;
        /// Protected from collection irrespective of reachability.
        const STICKY      = 0b0000_0010;
        /// Has a finalizer registered in the process-wide finalizer table.
        const FINALIZER   = 0b0000_0100;
        /// Registered in a weak-keyed hash table (moved off `used`).
        const WEAK_KEYED  = 0b0000_1000;
    }
}

/// The fields every heap record carries, independent of its payload (spec
/// §3.2). The payload itself lives alongside this header in whichever
/// `idio-gc` slot owns the record; this struct is the part every subsystem
/// (marking, sweeping, printing) can inspect without knowing the payload's
/// concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapHeader {
    /// What kind of value this record holds.
    pub ty: HeapType,
    /// Which generation owns this record.
    pub generation: u32,
    /// Tri-colour mark state.
    pub colour: Colour,
    /// Free/sticky/finalizer/weak-keyed state.
    pub flags: HeapFlags,
    /// Flags whose meaning is specific to `ty` (e.g. hash-table "weak").
    pub type_flags: u16,
    /// Threads this record onto whichever of used/free/weak list it
    /// currently belongs to.
    pub next: Option<HeapRef>,
    /// Chains onto the GC's grey queue when this record is lazy-grey;
    /// `None` when not currently queued. A dedicated field avoids an
    /// auxiliary queue allocation during marking (spec §3.2, §4.1).
    pub grey_link: Option<HeapRef>,
}

impl HeapHeader {
    /// A freshly zeroed header for a newly-allocated record of type `ty` in
    /// `generation` (spec §4.1 allocator: "Every record obtained is zeroed
    /// of per-cycle state").
    pub fn fresh(ty: HeapType, generation: u32) -> HeapHeader {
        HeapHeader {
            ty,
            generation,
            colour: Colour::White,
            flags: HeapFlags::empty(),
            type_flags: 0,
            next: None,
            grey_link: None,
        }
    }

    /// Whether this record is protected from collection.
    pub fn is_sticky(&self) -> bool {
        self.flags.contains(HeapFlags::STICKY)
    }

    /// Whether this record is currently on a free-list.
    pub fn is_free(&self) -> bool {
        self.flags.contains(HeapFlags::FREE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_header_is_white_and_unflagged() {
        let h = HeapHeader::fresh(HeapType::Pair, 0);
        assert_eq!(h.colour, Colour::White);
        assert!(!h.is_sticky());
        assert!(!h.is_free());
        assert!(h.grey_link.is_none());
    }
}
