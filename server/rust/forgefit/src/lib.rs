pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod usecase;
