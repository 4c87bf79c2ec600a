//! Request handlers, one module per route prefix.

pub mod kanji;
pub mod prelude;
pub mod session;
