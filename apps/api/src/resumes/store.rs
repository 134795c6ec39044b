use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ResumeRecord;
use crate::models::resume::{ResumeRow, ResumeSummaryRow, ReviewStatus};

/// Filters accepted by the list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ResumeFilter {
    pub status: Option<ReviewStatus>,
    /// Lower-cased skill fragments; a résumé matches when any fragment is a
    /// substring of any of its skills. Empty means no skill filter.
    pub skills: Vec<String>,
}

/// "Python, aws ,," -> ["python", "aws"]
pub fn parse_skill_query(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub async fn insert_resume(
    pool: &PgPool,
    id: Uuid,
    filename: &str,
    record: &ResumeRecord,
    s3_pdf_key: Option<&str>,
) -> Result<ResumeRow, AppError> {
    let work_experience = serde_json::to_value(&record.work_experience)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("work history serialisation failed: {e}")))?;
    let total_years = i32::try_from(record.total_experience_years).unwrap_or(i32::MAX);

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, filename, name, email, phone, skills, cgpa,
             work_experience, total_experience_years, s3_pdf_key, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(filename)
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.skills)
    .bind(&record.cgpa)
    .bind(work_experience)
    .bind(total_years)
    .bind(s3_pdf_key)
    .bind(ReviewStatus::default().as_str())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_resumes(
    pool: &PgPool,
    filter: &ResumeFilter,
) -> Result<Vec<ResumeSummaryRow>, AppError> {
    let status = filter.status.map(|s| s.as_str());
    let rows = sqlx::query_as::<_, ResumeSummaryRow>(
        r#"
        SELECT id, filename, name, email, phone, skills, cgpa,
               total_experience_years, status, created_at
        FROM resumes
        WHERE ($1::text IS NULL OR status = $1)
          AND (cardinality($2::text[]) = 0 OR EXISTS (
                SELECT 1
                FROM unnest(skills) AS s(skill), unnest($2::text[]) AS q(fragment)
                WHERE strpos(lower(s.skill), q.fragment) > 0
          ))
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .bind(&filter.skills)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: ReviewStatus,
) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("UPDATE resumes SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Deletes the row. Returns `None` when no such résumé exists, otherwise
/// the stored PDF key (if any) so the caller can remove the object.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<Option<Option<String>>, AppError> {
    Ok(
        sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM resumes WHERE id = $1 RETURNING s3_pdf_key",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?,
    )
}
