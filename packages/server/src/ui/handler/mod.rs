//! HTTP handlers.

mod http;

pub use http::{force_check, get_history, get_status, get_users, health_check, index};
