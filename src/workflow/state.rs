use serde::Serialize;

use crate::{
    error::{FitRoomError, Result, MISSING_IMAGES_MESSAGE},
    gemini::GenerateTransport,
    models::{GenerateContentRequest, GenerateContentResponse, ImagePayload, TRY_ON_PROMPT},
    workflow::retry::{send_with_retry, RetryPolicy},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A transient message for the user, shown once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FitRoomState {
    pub person_image: Option<ImagePayload>,
    pub clothing_image: Option<ImagePayload>,
    /// `data:image/png;base64,...` of the last successful generation.
    pub generated_image: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The try-on state store. Only one generation can run at a time since
/// [`FitRoom::generate`] borrows the store mutably.
#[derive(Debug, Default)]
pub struct FitRoom {
    state: FitRoomState,
    notifications: Vec<Notification>,
    policy: RetryPolicy,
    prompt: Option<String>,
}

impl FitRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn state(&self) -> &FitRoomState {
        &self.state
    }

    pub fn set_person_image(&mut self, image: Option<ImagePayload>) {
        self.state.person_image = image;
    }

    pub fn set_clothing_image(&mut self, image: Option<ImagePayload>) {
        self.state.clothing_image = image;
    }

    pub fn set_generated_image(&mut self, image: Option<String>) {
        self.state.generated_image = image;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// Drops the generated result, returning the preview to its empty state.
    pub fn clear_result(&mut self) {
        self.state.generated_image = None;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Whether the generate control should be enabled.
    pub fn can_generate(&self) -> bool {
        !self.state.loading && self.inputs().is_some()
    }

    fn inputs(&self) -> Option<(&ImagePayload, &ImagePayload)> {
        let person = self.state.person_image.as_ref().filter(|p| !p.is_empty())?;
        let clothing = self.state.clothing_image.as_ref().filter(|c| !c.is_empty())?;
        Some((person, clothing))
    }

    /// Runs one generation through `transport` and records the outcome in the
    /// state. The returned value mirrors what was stored.
    pub async fn generate(&mut self, transport: &dyn GenerateTransport) -> Result<String> {
        let envelope = match self.inputs() {
            Some((person, clothing)) => GenerateContentRequest::try_on(
                self.prompt.as_deref().unwrap_or(TRY_ON_PROMPT),
                person,
                clothing,
            ),
            None => {
                return Err(
                    self.fail(FitRoomError::Validation(MISSING_IMAGES_MESSAGE.to_string()))
                )
            }
        };

        self.state.loading = true;
        self.state.error = None;
        self.state.generated_image = None;

        log::info!("Generating try-on image via {}", transport.name());
        let outcome = self.run(transport, &envelope).await;
        self.state.loading = false;

        match outcome {
            Ok(image) => {
                self.state.generated_image = Some(image.clone());
                self.notify(Notification::info(
                    "Success!",
                    "Your new look has been generated successfully.",
                ));
                Ok(image)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    async fn run(
        &self,
        transport: &dyn GenerateTransport,
        envelope: &GenerateContentRequest,
    ) -> Result<String> {
        let payload = serde_json::to_value(envelope)?;
        let body = send_with_retry(transport, &payload, &self.policy).await?;
        let response: GenerateContentResponse = serde_json::from_value(body)?;

        match response.first_inline_image() {
            Some(data) => Ok(format!("data:image/png;base64,{}", data)),
            None => {
                log::warn!(
                    "Response carried no image (finish reason: {})",
                    response.finish_reason().unwrap_or("none")
                );
                Err(FitRoomError::NoImage)
            }
        }
    }

    fn fail(&mut self, err: FitRoomError) -> FitRoomError {
        let message = err.to_string();
        log::error!("Generation failed: {}", message);
        self.state.error = Some(message.clone());
        self.state.loading = false;
        self.notify(Notification::error(err.notification_title(), message));
        err
    }
}
