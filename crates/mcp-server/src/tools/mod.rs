//! MCP tool surface: argument schemas, the mode-dependent catalog and dispatch.

pub mod catalog;
mod dispatch;
pub mod family;
pub mod schemas;

pub use catalog::{describe_tools, tool_instructions, ToolDescriptor, TENANT_PARAM};
pub use dispatch::{Dispatcher, IapticService, ToolError};
pub use family::ToolFamily;
