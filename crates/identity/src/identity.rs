use crate::error::{IdentityError, Result};
use serde::Serialize;
use std::fmt;

/// Authentication mode of an identity, as seen by the tool catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    TenantKey,
    MasterKey,
}

/// Secret half of an [`Identity`].
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Key issued for one app; only valid together with that app's name.
    TenantKey(String),
    /// Account-wide key; valid for any app name.
    MasterKey(String),
}

impl Credential {
    pub fn secret(&self) -> &str {
        match self {
            Self::TenantKey(secret) | Self::MasterKey(secret) => secret,
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Self::TenantKey(_) => AuthMode::TenantKey,
            Self::MasterKey(_) => AuthMode::MasterKey,
        }
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TenantKey(_) => f.write_str("TenantKey(***)"),
            Self::MasterKey(_) => f.write_str("MasterKey(***)"),
        }
    }
}

/// An app name plus the credential used to authenticate as that app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    tenant: String,
    credential: Credential,
}

impl Identity {
    pub fn new(tenant: impl Into<String>, credential: Credential) -> Self {
        Self {
            tenant: tenant.into(),
            credential,
        }
    }

    pub fn with_tenant_key(tenant: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(tenant, Credential::TenantKey(key.into()))
    }

    pub fn with_master_key(tenant: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(tenant, Credential::MasterKey(key.into()))
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn mode(&self) -> AuthMode {
        self.credential.mode()
    }

    pub fn is_master(&self) -> bool {
        self.mode() == AuthMode::MasterKey
    }

    /// Same master key, different app. Tenant keys cannot be re-targeted.
    pub fn impersonate(&self, tenant: &str) -> Result<Identity> {
        let tenant = normalize_tenant(tenant)?;
        match &self.credential {
            Credential::MasterKey(_) => Ok(Self::new(tenant, self.credential.clone())),
            Credential::TenantKey(_) => Err(IdentityError::NotImpersonable {
                current: self.tenant.clone(),
                requested: tenant.to_string(),
            }),
        }
    }
}

pub(crate) fn normalize_tenant(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentityError::EmptyTenant);
    }
    Ok(trimmed)
}
