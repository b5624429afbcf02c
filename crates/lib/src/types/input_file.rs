//! Files sent to the Bot API: an existing file id, a URL, or bytes uploaded as multipart.

use std::path::Path;

use serde::{Serialize, Serializer};

/// A file argument. `Upload` forces the request to be sent as `multipart/form-data`.
#[derive(Clone, PartialEq, Eq)]
pub enum InputFile {
    FileId(String),
    Url(String),
    Upload { file_name: String, data: Vec<u8> },
}

impl InputFile {
    pub fn file_id(id: impl Into<String>) -> Self {
        InputFile::FileId(id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        InputFile::Url(url.into())
    }

    pub fn upload(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        InputFile::Upload {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Read a local file for upload; the part name is the file's name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(InputFile::Upload { file_name, data })
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, InputFile::Upload { .. })
    }

    /// The string form used in JSON bodies. Uploads refer to their multipart part.
    pub fn as_reference(&self) -> String {
        match self {
            InputFile::FileId(id) => id.clone(),
            InputFile::Url(url) => url.clone(),
            InputFile::Upload { file_name, .. } => format!("attach://{}", file_name),
        }
    }
}

impl std::fmt::Debug for InputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFile::FileId(id) => f.debug_tuple("FileId").field(id).finish(),
            InputFile::Url(url) => f.debug_tuple("Url").field(url).finish(),
            InputFile::Upload { file_name, data } => f
                .debug_struct("Upload")
                .field("file_name", file_name)
                .field("len", &data.len())
                .finish(),
        }
    }
}

impl Serialize for InputFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_reference())
    }
}

impl From<&str> for InputFile {
    /// Strings starting with `http://` or `https://` are URLs; anything else is a file id.
    fn from(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            InputFile::Url(s.to_string())
        } else {
            InputFile::FileId(s.to_string())
        }
    }
}

impl From<String> for InputFile {
    fn from(s: String) -> Self {
        InputFile::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_forms() {
        assert_eq!(InputFile::from("AgAD123").as_reference(), "AgAD123");
        assert_eq!(
            InputFile::from("https://example.com/a.png"),
            InputFile::Url("https://example.com/a.png".into())
        );
        let up = InputFile::upload("cat.jpg", vec![1, 2, 3]);
        assert!(up.is_upload());
        assert_eq!(serde_json::to_value(&up).unwrap(), "attach://cat.jpg");
        assert_eq!(format!("{:?}", up), "Upload { file_name: \"cat.jpg\", len: 3 }");
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_name() {
        let path = std::env::temp_dir().join(format!("tgbot-upload-{}.txt", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"payload").await.unwrap();
        let file = InputFile::from_path(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;
        match file {
            InputFile::Upload { file_name, data } => {
                assert!(file_name.starts_with("tgbot-upload-"));
                assert_eq!(data, b"payload");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
