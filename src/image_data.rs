use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::DynamicImage;
use std::path::Path;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// An encoded image held inline as a `data:` URL.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    url: String,
}

impl ImageData {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    /// Sniffs the format from the bytes themselves. Unknown content is still
    /// wrapped and only fails once something tries to decode it.
    pub fn from_encoded(bytes: &[u8]) -> Self {
        let mime = image::guess_format(bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(UNKNOWN_MIME);
        Self::from_bytes(mime, bytes)
    }

    pub fn read_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_encoded(&bytes))
    }

    pub fn from_image(image: &DynamicImage, format: image::ImageFormat) -> Result<Self> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buffer, format)?;
        Ok(Self::from_bytes(format.to_mime_type(), buffer.get_ref()))
    }

    #[cfg(test)]
    pub fn parse(url: &str) -> Result<Self> {
        split_data_url(url)?;
        Ok(Self {
            url: url.to_string(),
        })
    }

    #[cfg(test)]
    pub fn as_url(&self) -> &str {
        &self.url
    }

    pub fn mime(&self) -> &str {
        split_data_url(&self.url)
            .map(|(mime, _)| mime)
            .unwrap_or(UNKNOWN_MIME)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (_, payload) = split_data_url(&self.url)?;
        Ok(STANDARD.decode(payload)?)
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        let bytes = self.to_bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("mime", &self.mime())
            .field("len", &self.url.len())
            .finish()
    }
}

fn split_data_url(url: &str) -> Result<(&str, &str)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::InvalidDataUrl("missing payload separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::InvalidDataUrl("only base64 payloads are supported".to_string()))?;
    Ok((mime, payload))
}
