//! linclass Core
//!
//! Core types and error handling shared across linclass components.
//!
//! This crate provides:
//! - The error taxonomy and `Result` alias
//! - Class label types (integer or string labels)
//! - The ordered label → probability mapping produced by ZipMap

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassLabels, Label, LabelDistribution};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassLabels, Label, LabelDistribution};
}
