mod config;
mod page;

pub use config::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use page::{paginate, PaginationInfo};
