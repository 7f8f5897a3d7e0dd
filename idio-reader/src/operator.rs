//! The module-system boundary the reader's operator pass calls through
//! (spec §6 "Module boundary"). Infix/postfix operator tables live with
//! the evaluator, which is out of this crate's scope; the reader only
//! needs somewhere to call at the right moment.

use idio_value::Idio;

/// What the reader consults to rearrange infix operators into prefix form
/// at the top of a non-quoted, non-hash-literal list (spec §4.7
/// "Operator expansion").
pub trait OperatorExpand {
    /// Rewrite `list` (a proper list read from one set of delimiters),
    /// returning the (possibly rearranged) list. `flag` mirrors the
    /// spec's `operator_expand(list, flag)` signature, left to the
    /// implementor's module-system semantics.
    fn operator_expand(&self, list: Idio, flag: bool) -> Idio;
    /// Whether `sym` names an infix operator.
    fn is_infix_operator(&self, sym: &str) -> bool;
    /// Whether `sym` names a postfix operator.
    fn is_postfix_operator(&self, sym: &str) -> bool;
}

/// The reader's default when no module system is wired in: operator
/// tables are always empty, so every list passes through unchanged. A
/// real evaluator supplies its own [`OperatorExpand`] once the module
/// system is implemented (spec §6 declares this boundary explicitly out
/// of scope for the reader itself).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOperators;

impl OperatorExpand for NoOperators {
    fn operator_expand(&self, list: Idio, _flag: bool) -> Idio {
        list
    }

    fn is_infix_operator(&self, _sym: &str) -> bool {
        false
    }

    fn is_postfix_operator(&self, _sym: &str) -> bool {
        false
    }
}
