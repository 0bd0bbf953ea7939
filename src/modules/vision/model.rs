use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageReader;
use std::io::Cursor;

use crate::error::AppError;

/// An image as it arrives from a client.
#[derive(Debug)]
pub enum ImageInput {
    /// Base64 text, optionally wrapped in a `data:<mime>;base64,` URL.
    Base64(String),
    /// Raw bytes from a multipart upload.
    Bytes(Vec<u8>),
}

impl ImageInput {
    /// Same as [`ImageInput::into_validated_base64`], run on the blocking pool
    /// so large uploads never stall the runtime.
    pub async fn validate(self) -> Result<String, AppError> {
        tokio::task::spawn_blocking(move || self.into_validated_base64())
            .await
            .map_err(|e| AppError::Unexpected(format!("Image validation task failed: {}", e)))?
    }

    /// Checks that the payload decodes to a readable image and returns it as
    /// plain base64, the form Ollama expects.
    pub fn into_validated_base64(self) -> Result<String, AppError> {
        match self {
            ImageInput::Base64(text) => {
                let encoded = strip_data_url(&text)
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect::<String>();
                let bytes = STANDARD
                    .decode(&encoded)
                    .map_err(|e| AppError::InvalidInput(format!("Invalid base64 image: {}", e)))?;
                ensure_image(&bytes)?;
                Ok(encoded)
            }
            ImageInput::Bytes(bytes) => {
                ensure_image(&bytes)?;
                Ok(STANDARD.encode(&bytes))
            }
        }
    }
}

fn strip_data_url(text: &str) -> &str {
    match text.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => text,
    }
}

fn ensure_image(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::InvalidInput("Image is empty".to_string()));
    }
    // Format sniffing plus header parse; pixels are never decoded.
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AppError::InvalidInput(format!("Not a valid image: {}", e)))?
        .into_dimensions()
        .map(|_| ())
        .map_err(|e| AppError::InvalidInput(format!("Not a valid image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn tiny_png() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(2, 2).write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn raw_bytes_are_encoded() {
        let png = tiny_png();
        let encoded = ImageInput::Bytes(png.clone()).into_validated_base64().unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), png);
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let encoded = STANDARD.encode(tiny_png());
        let input = ImageInput::Base64(format!("data:image/png;base64,{}", encoded));
        assert_eq!(input.into_validated_base64().unwrap(), encoded);
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = ImageInput::Base64("%%%not base64%%%".to_string())
            .into_validated_base64()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        let err = ImageInput::Bytes(b"plain text, not pixels".to_vec())
            .into_validated_base64()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn truncated_header_is_rejected() {
        let png = tiny_png();
        let err = ImageInput::Bytes(png[..12].to_vec())
            .into_validated_base64()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn validate_runs_on_blocking_pool() {
        let encoded = ImageInput::Bytes(tiny_png()).validate().await.unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), tiny_png());

        let err = ImageInput::Bytes(b"GIF89a?".to_vec()).validate().await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
