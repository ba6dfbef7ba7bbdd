//! Repository for the `consultation_requests` table.

use showcase_core::consultation::ConsultationInput;
use sqlx::PgPool;

use crate::models::consultation::ConsultationRequest;

const COLUMNS: &str = "id, name, email, company, inquiry_type, use_case_title, description, \
                        current_challenges, expected_outcome, created_at";

/// Stores and lists consultation requests.
pub struct ConsultationRepo;

impl ConsultationRepo {
    /// Insert an already-normalized request.
    pub async fn create(
        pool: &PgPool,
        input: &ConsultationInput,
    ) -> Result<ConsultationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO consultation_requests
                (name, email, company, inquiry_type, use_case_title, description,
                 current_challenges, expected_outcome)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConsultationRequest>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(input.inquiry_type.as_str())
            .bind(&input.use_case_title)
            .bind(&input.description)
            .bind(&input.current_challenges)
            .bind(&input.expected_outcome)
            .fetch_one(pool)
            .await
    }

    /// List requests newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ConsultationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM consultation_requests ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ConsultationRequest>(&query)
            .fetch_all(pool)
            .await
    }
}
