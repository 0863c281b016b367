use thiserror::Error;

/// Outcome of every pipeline operation. Only the success variant is touched by `map`.
pub type AppResult<T> = Result<T, AppError>;

/// Every failure the pipeline can surface to a state holder.
///
/// Transport failures of any kind (timeout, DNS, non-2xx status, malformed JSON)
/// are collapsed into [`AppError::Network`] at the remote-client boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("network error")]
    Network,

    #[error("no matching location")]
    NotFound,

    #[error("unknown error{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unknown(Option<String>),
}

impl AppError {
    /// Text shown to the user in UI state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network => "No internet connection".to_string(),
            Self::NotFound => "City not found".to_string(),
            Self::Unknown(_) => "Unknown error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_only_touches_success() {
        let ok: AppResult<i32> = Ok(2);
        assert_eq!(ok.map(|v| v * 10), Ok(20));

        let err: AppResult<i32> = Err(AppError::Network);
        assert_eq!(err.map(|v| v * 10), Err(AppError::Network));
    }

    #[test]
    fn unknown_display_includes_message_when_present() {
        assert_eq!(AppError::Unknown(None).to_string(), "unknown error");
        assert_eq!(
            AppError::Unknown(Some("boom".into())).to_string(),
            "unknown error: boom"
        );
    }

    #[test]
    fn user_messages_are_distinct() {
        let network = AppError::Network.user_message();
        let not_found = AppError::NotFound.user_message();
        let unknown = AppError::Unknown(Some("detail".into())).user_message();

        assert_ne!(network, not_found);
        assert_ne!(not_found, unknown);
        assert!(!unknown.contains("detail"));
    }
}
