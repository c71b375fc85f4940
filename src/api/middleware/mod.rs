pub mod confirmed;
pub mod request_logger;
pub mod same_origin;
pub mod session;

pub use confirmed::ConfirmedGuard;
pub use request_logger::{RequestId, RequestLogger};
pub use same_origin::SameOriginGuard;
pub use session::SessionLoader;
