//! # Iaptic Identity
//!
//! Who the server talks to the backend as.
//!
//! ## Model
//!
//! ```text
//! Identity = tenant + Credential
//!                      ├─ TenantKey  (valid for its own tenant only)
//!                      └─ MasterKey  (valid for any tenant)
//!
//! CredentialContext
//!     ├─ default  (built once at startup, never mutated)
//!     └─ current  (replaced by switch/reset)
//! ```
//!
//! Per-call impersonation never touches the context: the dispatcher asks for
//! an [`Identity`] value via [`CredentialContext::identity_for_call`] and
//! threads it through the backend call. The ambient identity is therefore the
//! same after a call as before it, whatever way the call ends.
//!
//! ## Example
//!
//! ```
//! use iaptic_identity::{CredentialContext, Identity};
//!
//! let mut ctx = CredentialContext::new(Identity::with_master_key("alpha", "mk"));
//! let call_identity = ctx.identity_for_call(Some("beta")).unwrap();
//! assert_eq!(call_identity.tenant(), "beta");
//! assert_eq!(ctx.inspect().tenant, "alpha");
//!
//! ctx.switch("gamma", None).unwrap();
//! assert_eq!(ctx.inspect().tenant, "gamma");
//! ctx.reset();
//! assert!(ctx.inspect().is_default);
//! ```

mod context;
mod error;
mod identity;

pub use context::{ContextInfo, CredentialContext};
pub use error::{IdentityError, Result};
pub use identity::{AuthMode, Credential, Identity};
