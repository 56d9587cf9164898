//! State management-specific error types.

use crate::api::ApiError;

/// Message recorded when publishing a campaign with incomplete sections.
pub const INCOMPLETE_SUBMISSION_MESSAGE: &str =
    "Cannot submit: Please complete all required sections of the campaign.";

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Publishing was attempted before every required section was complete
    #[error("{}", INCOMPLETE_SUBMISSION_MESSAGE)]
    ValidationIncomplete,

    /// Step identifier is not part of the wizard
    #[error("Unknown wizard step: {0}")]
    UnknownStep(String),

    /// A lifecycle call to the campaigns API failed
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::ValidationIncomplete;
        assert_eq!(error.to_string(), INCOMPLETE_SUBMISSION_MESSAGE);

        let error = StateError::UnknownStep("checkout".to_string());
        assert!(error.to_string().contains("Unknown wizard step"));
        assert!(error.to_string().contains("checkout"));

        let error = StateError::Api {
            message: "Failed to save campaign draft.".to_string(),
            source: ApiError::InvalidEndpoint("campaigns".to_string()),
        };
        assert_eq!(error.to_string(), "Failed to save campaign draft.");
    }
}
