//! Roster backend: paged read over the static user list, served over HTTP.

pub mod http;
pub mod store;

pub use http::{Server, ServerOptions};
pub use store::UserStore;
