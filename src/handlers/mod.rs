//! Event Handlers
//!
//! - api: responses from the background API worker
//! - keyboard: key input for the file dialog
//! - wizard: key input for the repository wizard

pub mod api;
pub mod keyboard;
pub mod wizard;

pub use api::handle_api_response;
