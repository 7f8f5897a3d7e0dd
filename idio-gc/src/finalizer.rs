//! The process-wide finalizer table (spec §4.1 "Finalizers").

use std::collections::HashMap;

use idio_value::{HeapRef, Idio};

/// Finalizers registered against heap records. A record with a finalizer
/// is never swept silently: the closure runs once, with the doomed value,
/// before the slot is returned to the free list.
#[derive(Default)]
pub struct FinalizerTable {
    table: HashMap<u64, Box<dyn FnMut(Idio)>>,
}

impl FinalizerTable {
    /// An empty table.
    pub fn new() -> FinalizerTable {
        FinalizerTable::default()
    }

    /// Register `f` to run when `r` is collected, replacing any existing
    /// finalizer for that record.
    pub fn register(&mut self, r: HeapRef, f: Box<dyn FnMut(Idio)>) {
        self.table.insert(r.raw(), f);
    }

    /// Remove `r`'s finalizer without running it (e.g. on explicit
    /// resource release).
    pub fn cancel(&mut self, r: HeapRef) {
        self.table.remove(&r.raw());
    }

    /// Whether `r` has a finalizer registered.
    pub fn has(&self, r: HeapRef) -> bool {
        self.table.contains_key(&r.raw())
    }

    /// Run and remove `r`'s finalizer, if any, passing it `value` (the
    /// about-to-be-freed `Idio` wrapping `r`).
    pub fn run(&mut self, r: HeapRef, value: Idio) {
        if let Some(mut f) = self.table.remove(&r.raw()) {
            f(value);
        }
    }
}

impl std::fmt::Debug for FinalizerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalizerTable")
            .field("registered", &self.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_invokes_and_removes() {
        let mut table = FinalizerTable::new();
        let r = HeapRef::from_raw(1);
        let ran = std::rc::Rc::new(std::cell::Cell::new(false));
        let ran2 = ran.clone();
        table.register(r, Box::new(move |_| ran2.set(true)));
        assert!(table.has(r));
        table.run(r, Idio::nil());
        assert!(ran.get());
        assert!(!table.has(r));
    }

    #[test]
    fn cancel_drops_without_running() {
        let mut table = FinalizerTable::new();
        let r = HeapRef::from_raw(2);
        let ran = std::rc::Rc::new(std::cell::Cell::new(false));
        let ran2 = ran.clone();
        table.register(r, Box::new(move |_| ran2.set(true)));
        table.cancel(r);
        table.run(r, Idio::nil());
        assert!(!ran.get());
    }
}
