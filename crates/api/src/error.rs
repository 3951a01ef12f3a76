use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("Iaptic API error ({}): {message}", upstream_label(.status, .code))]
    Upstream {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },

    /// The request never produced a response (connect, timeout, reset).
    #[error("Transport error during {operation}: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid response from {operation}: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

fn upstream_label(status: &Option<u16>, code: &Option<String>) -> String {
    match (status, code) {
        (Some(status), _) => status.to_string(),
        (None, Some(code)) => code.clone(),
        (None, None) => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upstream_display_prefers_status_over_code() {
        let err = GatewayError::Upstream {
            status: Some(401),
            code: Some("6778001".to_string()),
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Iaptic API error (401): Unauthorized");

        let err = GatewayError::Upstream {
            status: None,
            code: Some("6778001".to_string()),
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Iaptic API error (6778001): Unauthorized");
    }
}
