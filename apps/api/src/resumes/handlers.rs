use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{ResumeExtractor, ResumeRecord};
use crate::models::resume::{ResumeRow, ResumeSummaryRow, ReviewStatus};
use crate::resumes::documents::{delete_pdf, is_pdf_filename, pdf_key, pdf_to_text, store_pdf};
use crate::resumes::store::{self, parse_skill_query, ResumeFilter};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub record: ResumeRecord,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    /// Comma-separated skill fragments.
    pub skill: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ReviewStatus,
}

/// Runs extraction on the blocking pool; long documents make it CPU-bound.
pub async fn extract_in_background(
    extractor: Arc<ResumeExtractor>,
    text: String,
) -> Result<ResumeRecord, AppError> {
    tokio::task::spawn_blocking(move || extractor.extract(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))
}

fn build_filter(query: &ListQuery) -> Result<ResumeFilter, AppError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(s) => Some(s.parse::<ReviewStatus>().map_err(AppError::Validation)?),
    };
    let skills = query
        .skill
        .as_deref()
        .map(parse_skill_query)
        .unwrap_or_default();
    Ok(ResumeFilter { status, skills })
}

/// POST /api/v1/resumes
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if !is_pdf_filename(&filename) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let text = pdf_to_text(bytes.clone()).await?;
    let record = extract_in_background(state.extractor.clone(), text).await?;

    let id = Uuid::new_v4();
    let key = pdf_key(id);
    store_pdf(&state.s3, &state.config.s3_bucket, &key, bytes).await?;

    if let Err(e) = store::insert_resume(&state.db, id, &filename, &record, Some(&key)).await {
        delete_pdf(&state.s3, &state.config.s3_bucket, &key).await;
        return Err(e);
    }

    info!(%id, %filename, "Resume processed");
    Ok(Json(UploadResponse {
        id,
        filename,
        record,
    }))
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = extract_in_background(state.extractor.clone(), req.text).await?;
    Ok(Json(record))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ResumeSummaryRow>>, AppError> {
    let filter = build_filter(&query)?;
    Ok(Json(store::list_resumes(&state.db, &filter).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    store::get_resume(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// PATCH /api/v1/resumes/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<ResumeRow>, AppError> {
    store::update_status(&state.db, id, req.status)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let key = store::delete_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    match key {
        Some(key) => delete_pdf(&state.s3, &state.config.s3_bucket, &key).await,
        None => warn!(%id, "Deleted resume had no stored PDF"),
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extract_in_background_returns_record() {
        let extractor = Arc::new(ResumeExtractor::with_builtin_vocabulary());
        let text = "Name: Jane Doe\njane@example.com\nSkills\nRust, Docker\n".to_string();
        let record = extract_in_background(extractor, text).await.unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email.as_deref(), Some("jane@example.com"));
        assert!(record.skills.contains(&"Rust".to_string()));
    }

    #[tokio::test]
    async fn test_extract_in_background_handles_empty_text() {
        let extractor = Arc::new(ResumeExtractor::with_builtin_vocabulary());
        let record = extract_in_background(extractor, String::new()).await.unwrap();
        assert_eq!(record.total_experience_years, 0);
        assert!(record.work_experience.is_empty());
    }

    #[test]
    fn test_build_filter_defaults() {
        let filter = build_filter(&ListQuery::default()).unwrap();
        assert!(filter.status.is_none());
        assert!(filter.skills.is_empty());
    }

    #[test]
    fn test_build_filter_parses_status_and_skills() {
        let query = ListQuery {
            status: Some("accepted".to_string()),
            skill: Some("Python, AWS".to_string()),
        };
        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.status, Some(ReviewStatus::Accepted));
        assert_eq!(filter.skills, vec!["python", "aws"]);
    }

    #[test]
    fn test_build_filter_all_means_unfiltered() {
        let query = ListQuery {
            status: Some("all".to_string()),
            skill: None,
        };
        assert!(build_filter(&query).unwrap().status.is_none());
    }

    #[test]
    fn test_build_filter_rejects_unknown_status() {
        let query = ListQuery {
            status: Some("pending".to_string()),
            skill: None,
        };
        assert!(matches!(build_filter(&query), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_status_update_deserializes() {
        let req: StatusUpdate = serde_json::from_str(r#"{"status":"rejected"}"#).unwrap();
        assert_eq!(req.status, ReviewStatus::Rejected);
    }
}
