//! Parsers for the text output of inspection utilities.
//!
//! Each parser is a pure function over the captured output. Lines that do not
//! fit the expected column layout are skipped, never treated as failures.

pub mod netstat;
pub mod registry;
pub mod session_table;

pub use netstat::{ConnectionRow, parse_connection_table, split_host_port};
pub use registry::parse_remote_desktop_enabled;
pub use session_table::{SessionRow, parse_session_line, parse_session_table};
