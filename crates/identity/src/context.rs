use crate::error::{IdentityError, Result};
use crate::identity::{normalize_tenant, AuthMode, Credential, Identity};
use serde::Serialize;

/// Read-only view of the context, returned by [`CredentialContext::inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub tenant: String,
    pub is_default: bool,
    pub using_master_key: bool,
}

/// Process-wide "who are we right now".
///
/// The context holds no lock of its own; the owner decides how it is shared.
/// Backend calls must not read it directly: they take the [`Identity`] returned
/// by [`CredentialContext::identity_for_call`], so a call in flight is never
/// affected by a later switch.
#[derive(Debug, Clone)]
pub struct CredentialContext {
    default: Identity,
    current: Identity,
}

impl CredentialContext {
    pub fn new(default: Identity) -> Self {
        Self {
            current: default.clone(),
            default,
        }
    }

    pub fn current(&self) -> &Identity {
        &self.current
    }

    pub fn default_identity(&self) -> &Identity {
        &self.default
    }

    pub fn mode(&self) -> AuthMode {
        self.current.mode()
    }

    pub fn is_using_master_key(&self) -> bool {
        self.current.is_master()
    }

    pub fn is_default(&self) -> bool {
        self.current == self.default
    }

    /// Replace the current identity, or leave it untouched on error.
    ///
    /// A supplied key always yields an app-specific identity. Without a key the
    /// current master key is reused for the new app name; under an app-specific
    /// key the call is rejected.
    pub fn switch(&mut self, tenant: &str, key: Option<&str>) -> Result<&Identity> {
        let tenant = normalize_tenant(tenant)?;
        let key = key.map(str::trim).filter(|key| !key.is_empty());

        let next = match (key, self.current.credential()) {
            (Some(key), _) => Identity::with_tenant_key(tenant, key),
            (None, Credential::MasterKey(_)) => self.current.impersonate(tenant)?,
            (None, Credential::TenantKey(_)) => {
                return Err(IdentityError::MissingKey {
                    tenant: tenant.to_string(),
                })
            }
        };

        log::info!(
            "Switched app: {} -> {} ({:?})",
            self.current.tenant(),
            next.tenant(),
            next.mode()
        );
        self.current = next;
        Ok(&self.current)
    }

    pub fn reset(&mut self) {
        if !self.is_default() {
            log::info!(
                "Reset app: {} -> {}",
                self.current.tenant(),
                self.default.tenant()
            );
        }
        self.current = self.default.clone();
    }

    pub fn inspect(&self) -> ContextInfo {
        ContextInfo {
            tenant: self.current.tenant().to_string(),
            is_default: self.is_default(),
            using_master_key: self.is_using_master_key(),
        }
    }

    /// Identity a single backend call should run as.
    ///
    /// Under a master key an override selects another app for this call only;
    /// the context itself is not modified. Under an app-specific key the app is
    /// implied by the key and the override is ignored.
    pub fn identity_for_call(&self, tenant_override: Option<&str>) -> Result<Identity> {
        match tenant_override {
            Some(tenant) if self.is_using_master_key() => self.current.impersonate(tenant),
            Some(tenant) => {
                log::debug!(
                    "Ignoring tenant override '{tenant}': app-specific key is bound to '{}'",
                    self.current.tenant()
                );
                Ok(self.current.clone())
            }
            None => Ok(self.current.clone()),
        }
    }
}
