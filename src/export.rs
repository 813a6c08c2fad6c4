//! Still-frame export.

use std::fmt;

const PNG_PREFIX: &str = "data:image/png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The surface refused to serialize (tainted canvas, lost context, ...).
    Serialize(String),
    /// The surface has no pixels; browsers return `data:,` in that case.
    EmptySurface,
    UnexpectedFormat(String),
    Download(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(msg) => write!(f, "could not serialize frame: {msg}"),
            Self::EmptySurface => write!(f, "output surface is empty"),
            Self::UnexpectedFormat(head) => write!(f, "surface encoded as {head}, expected png"),
            Self::Download(msg) => write!(f, "download failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFrame {
    pub file_name: String,
    pub data_url: String,
}

impl ExportedFrame {
    pub fn new(data_url: String, timestamp_ms: u64) -> Result<Self, ExportError> {
        validate_png_data_url(&data_url)?;
        Ok(Self {
            file_name: file_name_for(timestamp_ms),
            data_url,
        })
    }
}

pub fn file_name_for(timestamp_ms: u64) -> String {
    format!("gradient-{timestamp_ms}.png")
}

pub fn validate_png_data_url(data_url: &str) -> Result<(), ExportError> {
    if data_url.is_empty() || data_url == "data:," {
        return Err(ExportError::EmptySurface);
    }
    if !data_url.starts_with(PNG_PREFIX) {
        let head: String = data_url.chars().take(PNG_PREFIX.len()).collect();
        return Err(ExportError::UnexpectedFormat(head));
    }
    Ok(())
}
