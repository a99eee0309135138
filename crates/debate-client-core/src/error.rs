use thiserror::Error;

/// Failure taxonomy for every client-side operation. Display strings use
/// terse machine-greppable codes; [`ClientError::display_message`] produces
/// the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("api_protocol_failed:{message}")]
    Protocol { message: String },
    #[error("api_auth_rejected:{message}")]
    Auth { message: String },
    #[error("api_unauthorized")]
    Unauthorized,
    #[error("api_request_failed:{message}")]
    Network { message: String },
    #[error("api_http_{status}:{body}")]
    Http { status: u16, body: String },
    #[error("api_session_storage_failed:{message}")]
    Storage { message: String },
}

impl ClientError {
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Text suitable for direct display. Server-provided messages pass
    /// through; transport failures collapse to a generic retry prompt.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Protocol { message } | Self::Auth { message } => message.clone(),
            Self::Unauthorized => "login required".to_string(),
            Self::Network { .. } | Self::Http { .. } | Self::Storage { .. } => {
                "request failed, try again".to_string()
            }
        }
    }
}
