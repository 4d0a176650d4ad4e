//! Data Transfer Objects (DTOs) for the HTTP API.
//!
//! - `http`: response bodies
//! - `conversion`: domain model → DTO

pub mod conversion;
pub mod http;
