//! CLI command implementations

pub mod add;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;
