//! CLI command implementations.

pub mod bonds;
pub mod demo;
pub mod init;
pub mod related;
pub mod status;
pub mod visualize;
