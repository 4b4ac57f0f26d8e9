pub mod authorization;
pub mod response;

pub use authorization::{require_admin, require_customer};
pub use response::{status_text, ApiResponse, ApiResult};
