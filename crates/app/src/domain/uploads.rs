//! Image uploads sent alongside product and category forms.

use std::{io, path::Path};

use reqwest::multipart::Part;

/// An image file to attach to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name reported to the API
    pub file_name: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "imagen".to_string(), |name| name.to_string_lossy().into_owned());

        Ok(Self { file_name, bytes })
    }

    pub(crate) fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.file_name)
    }
}
