pub mod error;
pub mod rules;

pub use error::{FieldErrors, ValidationError};
pub use rules::{is_blank, validate_email, validate_required};
