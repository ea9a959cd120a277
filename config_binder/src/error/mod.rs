//! Error types produced by the binder.

mod constructors;
mod conversions;
mod types;

pub use types::{BindError, ParseError, ParseFailure};
