//! Iaptic MCP server.
//!
//! Exposes the Iaptic receipt-validation API as MCP tools over stdio. Calls run
//! as the app selected in the credential context; under a master key a single
//! call may name another app through its `tenant` parameter without changing
//! that context.

pub mod config;
pub mod tools;

pub use config::{ServerArgs, ServerConfig};
pub use tools::IapticService;
