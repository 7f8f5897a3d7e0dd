//! Lexical objects: the `(filename, line, pos, expr)` tuple every read step
//! returns, and the weak map from a composite expression back to the
//! lexobj that produced it (spec §4.7 "Lexical objects").

use std::collections::HashMap;
use std::rc::Rc;

use idio_value::{HeapRef, Idio};

/// Source location plus the value read at it (spec §3.3 "Lexical object").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexObj {
    /// The handle's reported name.
    pub filename: Rc<str>,
    /// 1-based line number.
    pub line: usize,
    /// 0-based column/byte position within the line.
    pub pos: usize,
    /// The value this lexical object describes.
    pub expr: Idio,
}

impl LexObj {
    /// Build a lexical object at the given position.
    pub fn new(filename: Rc<str>, line: usize, pos: usize, expr: Idio) -> LexObj {
        LexObj { filename, line, pos, expr }
    }
}

/// `expr -> lexobj`, keyed by heap-reference identity (spec: "a weak hash
/// `src_properties : expr → lexobj`"). Only composite (heap-allocated)
/// expressions are ever registered; immediates have no identity to key
/// on and carry no source property.
///
/// This map is not itself integrated with the collector's weak-table
/// fixed-point pass: it is reader-local bookkeeping, populated and
/// consulted entirely within one top-level `read` call, and dropped with
/// the reader rather than outliving collections the way the spec's
/// process-wide table would. A reader embedded in a long-lived runtime
/// that wants properties to survive past their originating read would
/// need to register entries as GC weak-table values instead, which is a
/// VM-layer integration left to the evaluator (spec §9 "Open Questions").
#[derive(Debug, Default)]
pub struct SrcProperties {
    table: HashMap<u64, LexObj>,
}

impl SrcProperties {
    /// An empty table.
    pub fn new() -> SrcProperties {
        SrcProperties::default()
    }

    /// Record `lexobj` against the composite value it describes.
    pub fn register(&mut self, r: HeapRef, lexobj: LexObj) {
        self.table.insert(r.raw(), lexobj);
    }

    /// Recover the lexical object registered for `r`, if any.
    pub fn get(&self, r: HeapRef) -> Option<&LexObj> {
        self.table.get(&r.raw())
    }

    /// Number of entries currently registered.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_get_round_trip() {
        let mut props = SrcProperties::new();
        let r = HeapRef::from_raw(7);
        let lexobj = LexObj::new(Rc::from("<test>"), 1, 0, Idio::nil());
        props.register(r, lexobj.clone());
        assert_eq!(props.get(r), Some(&lexobj));
        assert_eq!(props.len(), 1);
    }
}
