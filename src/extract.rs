//! Upload persistence and text extraction (OCR + PDF).
//!
//! Both extraction steps delegate entirely to external engines: Tesseract
//! for images, pdf-extract for documents. We only persist the upload and
//! hand over the path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::QuizError;

/// Persist an uploaded file under the client-supplied name.
/// The name is taken as-is; the uploads directory is the only namespace.
#[instrument(level = "info", skip(bytes), fields(%filename, size = bytes.len()))]
pub fn save_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, QuizError> {
  let path = dir.join(filename);
  fs::write(&path, bytes)
    .map_err(|e| QuizError::SourceReadFailure(format!("could not persist upload: {}", e)))?;
  info!(target: "quiz", path = %path.display(), "Upload persisted");
  Ok(path)
}

/// Run Tesseract over a persisted image and return the recognized text.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn ocr_image_text(path: &Path) -> Result<String, QuizError> {
  let path_str = path
    .to_str()
    .ok_or_else(|| QuizError::SourceReadFailure("upload path is not valid UTF-8".into()))?;
  let text = tesseract::Tesseract::new(None, Some("eng"))
    .map_err(|e| QuizError::SourceReadFailure(format!("Tesseract init: {}", e)))?
    .set_image(path_str)
    .map_err(|e| QuizError::SourceReadFailure(format!("Tesseract image: {}", e)))?
    .recognize()
    .map_err(|e| QuizError::SourceReadFailure(format!("Tesseract recognize: {}", e)))?
    .get_text()
    .map_err(|e| QuizError::SourceReadFailure(format!("Tesseract text: {}", e)))?;
  Ok(text)
}

/// Extract the text content of a persisted PDF (all pages concatenated).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn pdf_text(path: &Path) -> Result<String, QuizError> {
  pdf_extract::extract_text(path)
    .map_err(|e| QuizError::SourceReadFailure(format!("failed to read the PDF: {}", e)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upload_lands_under_client_name() {
    let dir = std::env::temp_dir().join("quizgen-extract-test");
    fs::create_dir_all(&dir).expect("mkdir");
    let path = save_upload(&dir, "notes.txt", b"hello").expect("save");
    assert_eq!(path, dir.join("notes.txt"));
    assert_eq!(fs::read(&path).expect("read back"), b"hello");
    fs::remove_file(&path).ok();
  }

  #[test]
  fn unreadable_pdf_is_a_source_read_failure() {
    let dir = std::env::temp_dir().join("quizgen-extract-test");
    fs::create_dir_all(&dir).expect("mkdir");
    let path = save_upload(&dir, "broken.pdf", b"not a pdf at all").expect("save");
    let err = pdf_text(&path).unwrap_err();
    assert!(matches!(err, QuizError::SourceReadFailure(_)));
    fs::remove_file(&path).ok();
  }
}
