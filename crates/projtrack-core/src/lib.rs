//! Projtrack Core Library
//!
//! This crate provides the core functionality for Projtrack, including:
//! - Observable project store with synchronous change notification
//! - Field validation with required, length and numeric bounds
//! - Project input form and per-status list views
//! - JSON-lines intake for batch submissions
//! - Configuration with file persistence

pub mod config;
pub mod context;
pub mod error;
pub mod form;
pub mod intake;
pub mod project;
pub mod state;
pub mod validation;
pub mod view;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::context::AppContext;
    pub use crate::error::{Error, Result};
    pub use crate::form::{FormOutcome, FormRules, ProjectInput, Rejection};
    pub use crate::project::{Project, ProjectStatus};
    pub use crate::state::ProjectState;
    pub use crate::validation::{FieldValue, Validatable, Violation, validate};
    pub use crate::view::ProjectList;
}
