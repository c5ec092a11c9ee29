pub mod response;
pub mod validate;

pub use response::{ApiResponse, ApiResult};
pub use validate::{ValidatedJson, ValidatedQuery};
