//! Subcommands of the cheeseboard binary

pub mod policy;
pub mod replay;
pub mod run;
pub mod train;
