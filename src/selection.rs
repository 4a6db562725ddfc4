//! Turning picked or uploaded images into payloads for the store.

use std::path::Path;

use reqwest::Client;

use crate::{
    catalog::{ClothingItem, SampleModel},
    error::{FitRoomError, Result},
    models::{ImageFormat, ImagePayload},
};

/// Reads an uploaded file. The MIME type comes from the file signature, then
/// the extension.
pub async fn load_image_file(path: impl AsRef<Path>) -> Result<ImagePayload> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(FitRoomError::Validation(format!(
            "{} is empty",
            path.display()
        )));
    }

    let mut payload = ImagePayload::from_bytes(&bytes);
    if ImageFormat::from_magic_bytes(&bytes).is_none() {
        if let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
        {
            payload.mime_type = format.mime_type().to_string();
        }
    }

    log::debug!(
        "Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        payload.mime_type
    );
    Ok(payload)
}

pub async fn load_model_image(assets_dir: impl AsRef<Path>, model: &SampleModel) -> Result<ImagePayload> {
    let payload = load_image_file(assets_dir.as_ref().join(model.asset)).await?;
    log::info!("Model selected: {}", model.name);
    Ok(payload)
}

/// Downloads a remote image and encodes it.
pub async fn fetch_remote_image(client: &Client, url: &str) -> Result<ImagePayload> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FitRoomError::Api {
            status: status.as_u16(),
            message: format!("Failed to load image from {}", url),
        });
    }

    let header_mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .filter(|mime| mime.starts_with("image/"));

    let bytes = response.bytes().await?;
    let mut payload = ImagePayload::from_bytes(&bytes);
    if ImageFormat::from_magic_bytes(&bytes).is_none() {
        if let Some(mime) = header_mime {
            payload.mime_type = mime;
        }
    }
    Ok(payload)
}

pub async fn fetch_clothing_image(client: &Client, item: &ClothingItem) -> Result<ImagePayload> {
    let payload = fetch_remote_image(client, item.url).await?;
    log::info!("Clothing selected: {}", item.name);
    Ok(payload)
}

/// Accepts what a browser `FileReader.readAsDataURL` hands back.
pub fn decode_upload(data_url: &str) -> Result<ImagePayload> {
    let payload = ImagePayload::from_data_url(data_url.trim());
    if payload.is_empty() {
        return Err(FitRoomError::Validation("Uploaded image is empty".into()));
    }
    // Surface corrupt uploads now rather than as a provider error later.
    payload.decode()?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_model;

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("fitroom-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_image_file_detects_png() {
        let dir = temp_dir();
        let path = dir.join("person.bin");
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];
        std::fs::write(&path, png).unwrap();

        let payload = load_image_file(&path).await.unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.decode().unwrap(), png.to_vec());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_extension_fallback_and_empty_file() {
        let dir = temp_dir();
        let webp = dir.join("shirt.webp");
        std::fs::write(&webp, b"opaque").unwrap();
        assert_eq!(load_image_file(&webp).await.unwrap().mime_type, "image/webp");

        let empty = dir.join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(
            load_image_file(&empty).await,
            Err(FitRoomError::Validation(_))
        ));

        assert!(matches!(
            load_image_file(dir.join("missing.jpg")).await,
            Err(FitRoomError::Io(_))
        ));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_load_model_image_uses_asset_name() {
        let dir = temp_dir();
        let model = find_model("1").unwrap();
        std::fs::write(dir.join(model.asset), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let payload = load_model_image(&dir, model).await.unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_decode_upload() {
        let payload = decode_upload("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "iVBORw0KGgo=");

        assert!(matches!(
            decode_upload("data:image/png;base64,"),
            Err(FitRoomError::Validation(_))
        ));
        assert!(matches!(
            decode_upload("data:image/png;base64,@@@"),
            Err(FitRoomError::Decode(_))
        ));
    }
}
