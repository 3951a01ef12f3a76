use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("app name must not be empty")]
    EmptyTenant,

    #[error("apiKey parameter is required when not using a master key (switching to '{tenant}')")]
    MissingKey { tenant: String },

    #[error("cannot act as app '{requested}' with the app-specific key of '{current}'")]
    NotImpersonable { current: String, requested: String },
}
