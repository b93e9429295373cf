pub mod bz_model;
pub mod conversion_table;
pub mod diagnostics;
pub mod namer;
pub mod normalizer;
pub mod validation;

pub use bz_model::*;
pub use conversion_table::*;
pub use diagnostics::*;
pub use validation::{ValidationError, Violation};
