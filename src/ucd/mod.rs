//! Core UCD parsing and table generation module

pub mod case_folding;
pub mod emit;
pub mod reader;
pub mod types;

pub use types::error::{ParseErrorKind, Result, UcdError};
pub use types::models::*;
