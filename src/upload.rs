use std::path::Path;

use tokio::fs;

const OCTET_STREAM: &str = "application/octet-stream";

/// An uploaded fridge photo or document as handed over by the hosting layer
///
/// The asset owns its bytes, so it can be scanned repeatedly.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub bytes: Vec<u8>,
    /// Content type declared by the uploader, if any
    pub content_type: Option<String>,
    /// Original file name, used as a MIME fallback
    pub file_name: Option<String>,
}

impl UploadedAsset {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Reads an asset from disk, keeping the file name for MIME detection
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        Ok(Self {
            bytes,
            content_type: None,
            file_name,
        })
    }

    /// Infers the MIME type of the upload
    ///
    /// The declared content type wins unless it is the generic octet-stream
    /// fallback, in which case the file extension decides between JPEG, PNG
    /// and PDF. Anything unrecognized stays octet-stream.
    pub fn mime_type(&self) -> String {
        let declared = self.content_type.as_deref().unwrap_or(OCTET_STREAM);
        if declared != OCTET_STREAM {
            return declared.to_string();
        }

        let name = self
            .file_name
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if name.ends_with(".jpg") || name.ends_with(".jpeg") {
            "image/jpeg".to_string()
        } else if name.ends_with(".png") {
            "image/png".to_string()
        } else if name.ends_with(".pdf") {
            "application/pdf".to_string()
        } else {
            declared.to_string()
        }
    }
}
