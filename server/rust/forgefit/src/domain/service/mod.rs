pub mod form_validator;
pub mod user_query;
