//! The recursive-descent UTF-8 reader (spec §4.7): turns source text into
//! `Idio` values on an [`idio_gc::Heap`], tracking `file:line:pos` for
//! every composite it allocates.

mod bitset_literal;
mod error;
mod handle;
mod lexobj;
mod operator;
mod reader;

pub use error::{ReadError, ReadErrorKind};
pub use handle::{Handle, StringHandle};
pub use lexobj::{LexObj, SrcProperties};
pub use operator::{NoOperators, OperatorExpand};
pub use reader::Reader;
