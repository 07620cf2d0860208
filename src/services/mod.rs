//! External Services
//!
//! - api: background worker executing browser endpoint requests

pub mod api;

pub use api::{spawn_api_service, ApiRequest, ApiResponse};
