//! Duration parsing module

pub mod parser;

pub use parser::{format, parse, validate};
