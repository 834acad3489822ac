//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod list;
pub mod remove;
pub mod status;

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
