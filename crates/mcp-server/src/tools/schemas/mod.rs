//! Argument types of every tool. Their `JsonSchema` derive is the source of the
//! advertised parameter schema; the per-call `tenant` parameter is not part of
//! these types and is merged in by the catalog.

pub mod app;
pub mod customer;
pub mod event;
pub mod purchase;
pub mod stats;
pub mod stripe;
pub mod transaction;

use schemars::JsonSchema;
use serde::Deserialize;

/// Tools without parameters.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct EmptyRequest {}
