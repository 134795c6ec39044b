use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_RESUMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS resumes (
    id                      UUID PRIMARY KEY,
    filename                TEXT NOT NULL,
    name                    TEXT NOT NULL DEFAULT '',
    email                   TEXT,
    phone                   TEXT,
    skills                  TEXT[] NOT NULL DEFAULT '{}',
    cgpa                    TEXT,
    work_experience         JSONB NOT NULL DEFAULT '[]'::jsonb,
    total_experience_years  INTEGER NOT NULL DEFAULT 0,
    s3_pdf_key              TEXT,
    status                  TEXT NOT NULL DEFAULT 'to_review',
    created_at              TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `resumes` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_RESUMES_TABLE)
        .execute(pool)
        .await
        .context("Failed to create resumes table")?;
    info!("Database schema ready");
    Ok(())
}
