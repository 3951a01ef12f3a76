//! # Iaptic API
//!
//! Typed backend operations and the gateway that executes them.
//!
//! ```text
//! Operation ──(verb, path, query, body)──┐
//!                                        ├──> BackendGateway::call ──> JSON | GatewayError
//! Identity ──(Bearer base64(app:key))────┘
//! ```
//!
//! The gateway never reads ambient state: every call receives the identity it
//! must authenticate as. List operations carry a [`Page`] whose limit is
//! clamped to [`MAX_LIST_LIMIT`] when it is built.

mod error;
mod gateway;
mod operation;

pub use error::{GatewayError, Result};
pub use gateway::{authorization_header, BackendGateway, GatewayConfig, HttpGateway, DEFAULT_BASE_URL};
pub use operation::{clamp_limit, Operation, Page, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
