use crate::error::{Error, Result};
use crate::models::contact_request::{ContactRequest, Resolution, STATUS_APPROVED, STATUS_PENDING};
use crate::utils::{ids, phone};
use sqlx::PgPool;

use super::job_service::JobService;

const REQUEST_COLUMNS: &str = "id, job_id, job_seeker_name, employer_name, employer_phone, \
                               employer_phone_normalized, job_seeker_phone_normalized, \
                               timestamp, status, approved_at, rejected_at";

/// An employer's submission, before the server resolves the seeker side
/// from the referenced job.
#[derive(Debug, Clone)]
pub struct NewContactRequest {
    pub job_id: String,
    pub employer_name: String,
    pub employer_phone: String,
}

#[derive(Clone)]
pub struct RequestService {
    pool: PgPool,
    job_service: JobService,
}

impl RequestService {
    pub fn new(pool: PgPool, job_service: JobService) -> Self {
        Self { pool, job_service }
    }

    /// Looks up the referenced job, denormalizes the seeker's phone onto
    /// the request so later portal lookups are a single indexed query,
    /// and writes the record as pending.
    pub async fn submit(&self, new: NewContactRequest, now_ms: i64) -> Result<ContactRequest> {
        let job = self
            .job_service
            .get(&new.job_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job post {} not found", new.job_id)))?;
        if job.phone.is_empty() {
            return Err(Error::NotFound(
                "Job seeker's phone not found for this job post".to_string(),
            ));
        }

        let request = ContactRequest {
            id: ids::request_id(now_ms),
            job_id: job.id.clone(),
            job_seeker_name: job.name.clone(),
            employer_name: new.employer_name,
            employer_phone_normalized: phone::normalize(&new.employer_phone),
            employer_phone: new.employer_phone,
            job_seeker_phone_normalized: phone::normalize(&job.phone),
            timestamp: now_ms,
            status: STATUS_PENDING.to_string(),
            approved_at: None,
            rejected_at: None,
            job_data: None,
        };

        sqlx::query(
            "INSERT INTO contact_requests (id, job_id, job_seeker_name, employer_name, \
             employer_phone, employer_phone_normalized, job_seeker_phone_normalized, \
             timestamp, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&request.id)
        .bind(&request.job_id)
        .bind(&request.job_seeker_name)
        .bind(&request.employer_name)
        .bind(&request.employer_phone)
        .bind(&request.employer_phone_normalized)
        .bind(&request.job_seeker_phone_normalized)
        .bind(request.timestamp)
        .bind(&request.status)
        .execute(&self.pool)
        .await?;

        Ok(request)
    }

    /// Exact-match lookup against the denormalized seeker phone, newest
    /// first. The phone is a self-asserted token, not a credential.
    pub async fn list_for_seeker(&self, raw_phone: &str) -> Result<Vec<ContactRequest>> {
        let normalized = phone::normalize(raw_phone);
        let requests = sqlx::query_as::<_, ContactRequest>(&format!(
            "SELECT {} FROM contact_requests WHERE job_seeker_phone_normalized = $1 \
             ORDER BY timestamp DESC",
            REQUEST_COLUMNS
        ))
        .bind(normalized)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Employer-side listing. Approved requests carry the referenced
    /// job's full record so the seeker's real phone is visible; pending
    /// and rejected ones come back bare.
    pub async fn list_for_employer(&self, raw_phone: &str) -> Result<Vec<ContactRequest>> {
        let normalized = phone::normalize(raw_phone);
        let mut requests = sqlx::query_as::<_, ContactRequest>(&format!(
            "SELECT {} FROM contact_requests WHERE employer_phone_normalized = $1 \
             ORDER BY timestamp DESC",
            REQUEST_COLUMNS
        ))
        .bind(normalized)
        .fetch_all(&self.pool)
        .await?;

        for request in requests.iter_mut() {
            if request.status == STATUS_APPROVED {
                request.job_data = self.job_service.get(&request.job_id).await?;
            }
        }
        Ok(requests)
    }

    /// One-way transition out of pending, stamping the matching
    /// timestamp. The `status = 'pending'` guard settles races between
    /// two resolutions in the database; the loser gets a conflict.
    pub async fn update_status(
        &self,
        id: &str,
        resolution: Resolution,
        now_ms: i64,
    ) -> Result<ContactRequest> {
        let stamp_column = match resolution {
            Resolution::Approved => "approved_at",
            Resolution::Rejected => "rejected_at",
        };
        let query = format!(
            "UPDATE contact_requests SET status = '{}', {} = $2 \
             WHERE id = $1 AND status = 'pending' RETURNING {}",
            resolution.as_str(),
            stamp_column,
            REQUEST_COLUMNS
        );

        let updated = sqlx::query_as::<_, ContactRequest>(&query)
            .bind(id)
            .bind(now_ms)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(request) => Ok(request),
            None => {
                let exists =
                    sqlx::query_scalar::<_, String>("SELECT status FROM contact_requests WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&self.pool)
                        .await?;
                match exists {
                    Some(status) => Err(Error::Conflict(format!(
                        "Request {} is already {}",
                        id, status
                    ))),
                    None => Err(Error::NotFound(format!("Contact request {} not found", id))),
                }
            }
        }
    }
}
