//! File store for meeting minutes. Uploads arrive as base64 data URIs from
//! the meeting form and are written under the upload root, which actix-files
//! serves at the public base URL.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::errors::AppError;

/// 10 MB, checked against the decoded bytes.
pub const MAX_MINUTES_BYTES: usize = 10 * 1024 * 1024;

const MINUTES_DIR: &str = "meeting-minutes";
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "odt", "rtf", "txt"];

#[derive(Debug)]
pub enum UploadError {
    Malformed(String),
    TooLarge(usize),
    Io(std::io::Error),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Malformed(why) => write!(f, "Invalid upload: {why}"),
            UploadError::TooLarge(size) => {
                write!(f, "File is {size} bytes; the limit is {MAX_MINUTES_BYTES} bytes")
            }
            UploadError::Io(e) => write!(f, "Could not store file: {e}"),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Io(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// A decoded upload ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub extension: String,
}

/// Decode `data:<mime>;base64,<payload>`. The extension comes from the
/// original file name, falling back to the MIME type.
pub fn decode_data_uri(data_uri: &str, file_name: &str) -> Result<Upload, UploadError> {
    let rest = data_uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| UploadError::Malformed("not a data URI".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| UploadError::Malformed("missing payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| UploadError::Malformed("payload is not base64".into()))?;

    // Reject oversized payloads before allocating for them.
    let approx = payload.len() / 4 * 3;
    if approx > MAX_MINUTES_BYTES + 3 {
        return Err(UploadError::TooLarge(approx));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| UploadError::Malformed(e.to_string()))?;
    if bytes.is_empty() {
        return Err(UploadError::Malformed("empty file".into()));
    }
    if bytes.len() > MAX_MINUTES_BYTES {
        return Err(UploadError::TooLarge(bytes.len()));
    }

    let extension = extension_from_name(file_name)
        .or_else(|| extension_from_mime(mime))
        .ok_or_else(|| UploadError::Malformed(format!("unsupported file type '{mime}'")))?;

    Ok(Upload { bytes, extension })
}

fn extension_from_name(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn extension_from_mime(mime: &str) -> Option<String> {
    let ext = match mime {
        "application/pdf" => "pdf",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        "application/vnd.oasis.opendocument.text" => "odt",
        "application/rtf" | "text/rtf" => "rtf",
        "text/plain" => "txt",
        _ => return None,
    };
    Some(ext.to_string())
}

/// Writes minutes under `{root}/meeting-minutes/{meeting_id}/`.
#[derive(Debug, Clone)]
pub struct MinutesStore {
    root: PathBuf,
    public_base: String,
}

impl MinutesStore {
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        MinutesStore {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Relative object path, e.g. `meeting-minutes/12/1760581234567.pdf`.
    pub fn object_path(meeting_id: i64, unix_millis: i64, extension: &str) -> String {
        format!("{MINUTES_DIR}/{meeting_id}/{unix_millis}.{extension}")
    }

    /// Store the file and return its public URL.
    pub async fn save(
        &self,
        meeting_id: i64,
        upload: &Upload,
        unix_millis: i64,
    ) -> Result<String, UploadError> {
        let object = Self::object_path(meeting_id, unix_millis, &upload.extension);
        let target = self.root.join(&object);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&target, &upload.bytes).await?;
        log::info!("Stored minutes for meeting {meeting_id} at {}", target.display());
        Ok(format!("{}/{object}", self.public_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_uri(mime: &str, bytes: &[u8]) -> String {
        format!("data:{mime};base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn decodes_pdf_and_prefers_file_name_extension() {
        let upload = decode_data_uri(&data_uri("application/pdf", b"%PDF-1.7"), "Minit Bil 3.PDF").unwrap();
        assert_eq!(upload.bytes, b"%PDF-1.7");
        assert_eq!(upload.extension, "pdf");

        let upload = decode_data_uri(&data_uri("application/msword", b"doc"), "").unwrap();
        assert_eq!(upload.extension, "doc");
    }

    #[test]
    fn rejects_non_data_uris_and_unknown_types() {
        assert!(matches!(decode_data_uri("hello", "a.pdf"), Err(UploadError::Malformed(_))));
        assert!(matches!(
            decode_data_uri(&data_uri("application/x-msdownload", b"MZ"), "setup.exe"),
            Err(UploadError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_files_over_ten_megabytes() {
        let big = vec![0u8; MAX_MINUTES_BYTES + 1];
        assert!(matches!(
            decode_data_uri(&data_uri("application/pdf", &big), "big.pdf"),
            Err(UploadError::TooLarge(_))
        ));

        let exact = vec![0u8; MAX_MINUTES_BYTES];
        assert!(decode_data_uri(&data_uri("application/pdf", &exact), "ok.pdf").is_ok());
    }

    #[tokio::test]
    async fn save_writes_under_meeting_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = MinutesStore::new(dir.path(), "/uploads/");
        let upload = Upload { bytes: b"minit".to_vec(), extension: "pdf".into() };

        let url = store.save(12, &upload, 1_760_581_234_567).await.unwrap();
        assert_eq!(url, "/uploads/meeting-minutes/12/1760581234567.pdf");

        let written = std::fs::read(dir.path().join("meeting-minutes/12/1760581234567.pdf")).unwrap();
        assert_eq!(written, b"minit");
    }
}
