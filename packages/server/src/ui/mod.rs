//! HTTP server and background polling for the remote desktop monitor.

mod error;
mod handler;
mod poller;
mod server;
mod signal;
pub mod state;

pub use error::ServerError;
pub use poller::StatusPoller;
pub use server::{Server, router};
