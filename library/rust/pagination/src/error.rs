use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PaginationError {
    #[error("page must be >= 1, got {0}")]
    InvalidPage(u32),
    #[error("per_page must be 1-{max}, got {got}")]
    InvalidPerPage { got: u32, max: u32 },
}
