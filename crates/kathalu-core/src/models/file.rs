use std::fmt;
use std::path::Path;

use bytes::Bytes;

use crate::constants::OCTET_STREAM;
use crate::validation::{content_type_for_extension, file_extension, reject_parent_components};
use crate::AppError;

/// A locally selected file, read fully into memory.
///
/// Immutable once built: `size_bytes()` is always the length of the buffer. Cloning is
/// cheap because the buffer is reference counted.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let mime_type = mime_type.into();
        Self {
            name: name.into(),
            mime_type: if mime_type.is_empty() {
                OCTET_STREAM.to_string()
            } else {
                mime_type
            },
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, taking its MIME type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        reject_parent_components(path)?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Invalid file name: {}", path.display()))
            })?
            .to_string();

        let data = std::fs::read(path)?;
        let mime_type = file_extension(&name)
            .map(|ext| content_type_for_extension(&ext))
            .unwrap_or(OCTET_STREAM);

        Ok(Self::new(name, mime_type, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}
