use teloxide::{ApiError, RequestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// The bot lacks rights to post. Recurs until fixed by an operator.
    #[error("bot is not allowed to post to the channel: {reason}")]
    PermissionDenied { reason: String },
    #[error("delivery failed: {reason}")]
    Request { reason: String },
}

impl PublishError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, PublishError::PermissionDenied { .. })
    }
}

impl From<RequestError> for PublishError {
    fn from(error: RequestError) -> Self {
        match &error {
            RequestError::Api(api_error) if is_permission_error(api_error) => {
                PublishError::PermissionDenied {
                    reason: api_error.to_string(),
                }
            }
            _ => PublishError::Request {
                reason: error.to_string(),
            },
        }
    }
}

fn is_permission_error(error: &ApiError) -> bool {
    if matches!(
        error,
        ApiError::BotBlocked
            | ApiError::BotKicked
            | ApiError::NotEnoughRightsToPostMessages
            | ApiError::ChatNotFound
    ) {
        return true;
    }

    let description = error.to_string().to_lowercase();
    description.contains("forbidden")
        || description.contains("not enough rights")
        || description.contains("have no rights")
}
