//! Source documents: PDF-to-text conversion and object storage of the
//! uploaded file.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tokio::task::JoinError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Only PDF uploads are accepted.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

pub fn pdf_key(resume_id: Uuid) -> String {
    format!("resumes/{resume_id}.pdf")
}

/// Converts PDF bytes to plain text. CPU-bound, so it runs on the
/// blocking pool. An empty result is reported as unprocessable.
pub async fn pdf_to_text(bytes: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(conversion_join_error)?
        .map_err(|e| AppError::DocumentConversion(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the uploaded PDF".to_string(),
        ));
    }
    Ok(text)
}

/// pdf-extract panics on some malformed files; those count as unreadable
/// uploads.
fn conversion_join_error(e: JoinError) -> AppError {
    if e.is_panic() {
        AppError::DocumentConversion("PDF parser panicked on malformed input".to_string())
    } else {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pdf conversion: {e}"))
    }
}

pub async fn store_pdf(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    bytes: Bytes,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(bytes))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("upload of {key} failed: {e}")))?;

    info!("Uploaded resume PDF to s3://{}/{}", bucket, key);
    Ok(())
}

/// Best-effort removal; a failure is logged and otherwise ignored.
pub async fn delete_pdf(s3: &aws_sdk_s3::Client, bucket: &str, key: &str) {
    match s3.delete_object().bucket(bucket).key(key).send().await {
        Ok(_) => info!("Deleted s3://{}/{}", bucket, key),
        Err(e) => warn!("Failed to delete s3://{}/{}: {e}", bucket, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_filename_check_is_case_insensitive() {
        assert!(is_pdf_filename("resume.pdf"));
        assert!(is_pdf_filename("Resume.PDF"));
        assert!(!is_pdf_filename("resume.docx"));
        assert!(!is_pdf_filename("pdf"));
    }

    #[tokio::test]
    async fn test_parser_panic_maps_to_conversion_error() {
        let err = tokio::task::spawn_blocking::<_, ()>(|| panic!("malformed xref"))
            .await
            .unwrap_err();
        let mapped = conversion_join_error(err);
        assert!(matches!(mapped, AppError::DocumentConversion(_)));
        assert_eq!(
            axum::response::IntoResponse::into_response(mapped).status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_pdf_key_layout() {
        let id = Uuid::nil();
        assert_eq!(pdf_key(id), "resumes/00000000-0000-0000-0000-000000000000.pdf");
    }
}
