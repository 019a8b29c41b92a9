//! Multipart extraction and boundary validation for uploads.
//!
//! All validation here happens before any bytes are staged: a rejected
//! request leaves no trace in temporary storage.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use imgpress_core::AppError;

/// The raw upload extracted from a multipart request.
pub struct UploadFile {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

/// Extract the single expected file from a multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_upload_file(mut multipart: Multipart) -> Result<UploadFile, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, "Failed to read multipart"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| map_multipart_error(e, "Failed to read file data"))?;

            file_data = Some(data.to_vec());
        }
    }

    let data =
        file_data.ok_or_else(|| AppError::MissingFile("Image file is required".to_string()))?;

    if data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }

    Ok(UploadFile {
        data,
        original_filename: filename.unwrap_or_else(|| "unknown".to_string()),
        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
    })
}

/// A body over the transport ceiling surfaces as a stream read error while
/// the multipart fields are consumed; that case is a size rejection, not a
/// malformed request.
fn map_multipart_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge("File size exceeds the maximum allowed size".to_string())
    } else {
        AppError::InvalidInput(format!("{context}: {e}"))
    }
}

/// Normalize a MIME type by stripping parameters
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate the declared content type against the allow-list.
///
/// This checks the declared MIME type, never the filename extension: an
/// extension-only check is trivially bypassed by renaming a file.
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == *ct) {
        return Err(AppError::InvalidFileType(format!(
            "Invalid file type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// Validate the byte size against the configured ceiling.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::FileTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/webp".to_string(),
        ]
    }

    #[test]
    fn test_allowed_content_types_pass() {
        assert!(validate_content_type("image/jpeg", &allowed()).is_ok());
        assert!(validate_content_type("IMAGE/PNG", &allowed()).is_ok());
        assert!(validate_content_type("image/webp; q=1", &allowed()).is_ok());
    }

    #[test]
    fn test_disallowed_content_types_fail() {
        let result = validate_content_type("application/octet-stream", &allowed());
        assert!(matches!(result, Err(AppError::InvalidFileType(_))));

        let result = validate_content_type("image/gif", &allowed());
        assert!(matches!(result, Err(AppError::InvalidFileType(_))));
    }

    #[test]
    fn test_mime_parameters_cannot_bypass_allowlist() {
        let result = validate_content_type("application/exe; fake=image/png", &allowed());
        assert!(matches!(result, Err(AppError::InvalidFileType(_))));
    }

    #[test]
    fn test_file_size_ceiling() {
        let max = 5 * 1024 * 1024;
        assert!(validate_file_size(max, max).is_ok());
        assert!(matches!(
            validate_file_size(max + 1, max),
            Err(AppError::FileTooLarge(_))
        ));
    }
}
