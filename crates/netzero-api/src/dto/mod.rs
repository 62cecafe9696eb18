mod request;
mod response;

pub use request::ExpandQuery;
pub use response::{ExpandResponse, HealthResponse};
