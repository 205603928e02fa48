pub mod error;
pub mod page;

pub use error::PaginationError;
pub use page::{paginate, validate_per_page, PageRequest, PageResponse, MAX_PER_PAGE};
