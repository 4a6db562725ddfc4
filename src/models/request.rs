use serde::{Deserialize, Serialize};

use super::image::ImagePayload;

pub const TRY_ON_PROMPT: &str = "Create an image of the person from the first image wearing the clothing item shown in the second image. Extract only the clothing/garment from the second image, ignore the person wearing it. Focus on replicating the exact style, pattern, color, and design of the clothing item onto the person in the first image. Make sure the image is in high quality.";

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: ImagePayload,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

impl GenerateContentRequest {
    /// Prompt first, then the person, then the garment. The prompt refers to
    /// the images by position.
    pub fn try_on(prompt: &str, person: &ImagePayload, garment: &ImagePayload) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text {
                        text: prompt.to_string(),
                    },
                    RequestPart::InlineData {
                        inline_data: person.clone(),
                    },
                    RequestPart::InlineData {
                        inline_data: garment.clone(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        }
    }
}
