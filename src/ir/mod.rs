//! Intermediate representation between the graph walk and Go emission.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::{ValidationError, validate_ir};
