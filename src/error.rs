use thiserror::Error;

pub const MISSING_IMAGES_MESSAGE: &str = "Please upload both a person's photo and a clothing item.";
pub const MISSING_KEY_MESSAGE: &str =
    "API key is missing. Please check your environment configuration.";
pub const NO_IMAGE_MESSAGE: &str =
    "Failed to generate image. Please try a different combination of images.";
pub const PARSE_MESSAGE: &str = "An error occurred while parsing the response. Please try again.";

#[derive(Debug, Error)]
pub enum FitRoomError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Config(String),

    #[error("rate limited on attempt {attempt}")]
    RateLimited { attempt: u32 },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to generate image after {attempts} attempts. Errors: {}", .errors.join("; "))]
    RetriesExhausted { attempts: u32, errors: Vec<String> },

    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImage,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", PARSE_MESSAGE)]
    Parse(#[from] serde_json::Error),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FitRoomError {
    /// Only rate limiting is retried; everything else ends the workflow.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Title of the transient notification raised for this error.
    pub fn notification_title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Missing Images",
            Self::Config(_) => "Configuration Error",
            Self::NoImage => "Generation Failed",
            Self::Parse(_) | Self::Decode(_) | Self::Io(_) => "Error",
            Self::RateLimited { .. }
            | Self::Api { .. }
            | Self::RetriesExhausted { .. }
            | Self::Transport(_) => "Request Failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, FitRoomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(FitRoomError::RateLimited { attempt: 1 }.is_retryable());

        assert!(!FitRoomError::NoImage.is_retryable());
        assert!(!FitRoomError::Config("no key".into()).is_retryable());
        assert!(!FitRoomError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_retries_exhausted_lists_every_attempt() {
        let err = FitRoomError::RetriesExhausted {
            attempts: 3,
            errors: vec![
                "attempt 1: rate limited (429)".into(),
                "attempt 2: rate limited (429)".into(),
                "attempt 3: rate limited (429)".into(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to generate image after 3 attempts."));
        assert!(msg.contains("attempt 1"));
        assert!(msg.contains("attempt 3"));
    }

    #[test]
    fn test_error_display() {
        let err = FitRoomError::Api {
            status: 400,
            message: "Invalid image".into(),
        };
        assert_eq!(err.to_string(), "Invalid image");
        assert_eq!(FitRoomError::NoImage.to_string(), NO_IMAGE_MESSAGE);
        assert_eq!(
            FitRoomError::Validation(MISSING_IMAGES_MESSAGE.into()).notification_title(),
            "Missing Images"
        );
    }
}
