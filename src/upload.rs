//! Upload payloads: raw bytes plus the MIME type the client declared.
//!
//! Reading the file is the single suspension point of the upload flow.
//! [`Upload::read`] either returns the whole payload or fails; there is no
//! partial state to clean up.
//!
//! | Concern | Crate / function |
//! |---|---|
//! | MIME type from extension | `image::ImageFormat::from_extension` |
//! | Layout dimensions | `image::ImageReader::into_dimensions` (header only, no decode) |
//! | Inline payload | `base64` standard engine into a `data:` URI |

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, ImageReader};
use std::io::{self, Cursor};
use std::path::Path;

/// Fallback MIME type for unrecognised extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    mime_type: String,
    data: Vec<u8>,
}

impl Upload {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read a file from disk, taking its MIME type from the extension.
    pub fn read(path: &Path) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data, mime_type_for_path(path)))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.data)
        )
    }

    /// Pixel dimensions from the image header, if the bytes are a raster
    /// format we can sniff.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        ImageReader::new(Cursor::new(&self.data))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// MIME type a browser would report for a file with this extension.
pub fn mime_type_for_path(path: &Path) -> String {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM.to_string();
    };
    let ext = ext.to_ascii_lowercase();
    match ext.as_str() {
        "svg" => "image/svg+xml".to_string(),
        "txt" => "text/plain".to_string(),
        _ => ImageFormat::from_extension(&ext)
            .map(|f| f.to_mime_type().to_string())
            .unwrap_or_else(|| OCTET_STREAM.to_string()),
    }
}
