//! What the preview panel shows, and saving the result.

use std::path::Path;

use crate::{
    error::{FitRoomError, Result},
    models::ImagePayload,
    workflow::FitRoomState,
};

pub const DOWNLOAD_FILE_NAME: &str = "generated-outfit.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView<'a> {
    Loading,
    Error(&'a str),
    Result(&'a str),
    Empty,
}

impl<'a> PreviewView<'a> {
    /// Loading wins over an error, an error over a stale result.
    pub fn from_state(state: &'a FitRoomState) -> Self {
        if state.loading {
            return Self::Loading;
        }
        if let Some(error) = state.error.as_deref() {
            return Self::Error(error);
        }
        match state.generated_image.as_deref() {
            Some(image) => Self::Result(image),
            None => Self::Empty,
        }
    }

    /// Download and reset are only offered once there is a result.
    pub fn has_actions(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

/// Writes the generated image to `path` and returns the number of bytes.
pub async fn save_result(state: &FitRoomState, path: impl AsRef<Path>) -> Result<usize> {
    let image = state
        .generated_image
        .as_deref()
        .ok_or_else(|| FitRoomError::Validation("There is no generated image to download".into()))?;

    let bytes = ImagePayload::from_data_url(image).decode()?;
    tokio::fs::write(path.as_ref(), &bytes).await?;
    log::info!("Saved {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(bytes.len())
}
