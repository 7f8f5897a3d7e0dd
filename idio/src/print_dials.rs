//! Process-wide printer configuration (spec §6 "Print dials").
//!
//! The spec's own redesign note (§9) observes these dials should really
//! be task-local once a task/thread concept exists above this layer;
//! nothing at the value/GC/reader level has one yet, so this crate keeps
//! them process-wide behind a `OnceLock`-guarded `Mutex` and marks the
//! seam so a VM layer can swap this module for thread-local storage
//! without touching any caller.

use std::sync::{Mutex, OnceLock};

use idio_bignum::PrintConversionFormat;

/// The dials `display`/`write` consult when rendering a bignum (spec
/// §6: conversion-letter format plus a precision count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintDials {
    /// Which of `d e f g s x X o u b` to render with.
    pub format: PrintConversionFormat,
    /// Digits after the point, or zero-pad width for integers; `-1`
    /// means "printer's default" (spec's printf-style "unset" sentinel).
    pub precision: isize,
}

impl Default for PrintDials {
    fn default() -> PrintDials {
        PrintDials {
            format: PrintConversionFormat::D,
            precision: -1,
        }
    }
}

fn storage() -> &'static Mutex<PrintDials> {
    static DIALS: OnceLock<Mutex<PrintDials>> = OnceLock::new();
    DIALS.get_or_init(|| Mutex::new(PrintDials::default()))
}

/// The current process-wide print dials.
pub fn dials() -> PrintDials {
    *storage().lock().expect("print dials mutex poisoned")
}

/// Replace the process-wide print dials, returning the previous value.
pub fn set_dials(new: PrintDials) -> PrintDials {
    let mut guard = storage().lock().expect("print dials mutex poisoned");
    std::mem::replace(&mut *guard, new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dials_are_decimal_with_no_precision() {
        let d = PrintDials::default();
        assert_eq!(d.format, PrintConversionFormat::D);
        assert_eq!(d.precision, -1);
    }

    #[test]
    fn set_dials_round_trips_and_restores() {
        let previous = dials();
        let replaced = set_dials(PrintDials {
            format: PrintConversionFormat::X,
            precision: 4,
        });
        assert_eq!(replaced, previous);
        assert_eq!(dials().format, PrintConversionFormat::X);
        set_dials(previous);
    }
}
