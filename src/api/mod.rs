pub mod pagination;

pub use pagination::{get_pagination, get_paging_data, Pagination, PagingData};
