use serde::{Deserialize, Serialize};

use crate::models::job_post::JobPost;
use crate::utils::time;

#[derive(Debug, Clone, Deserialize)]
pub struct JobListQuery {
    /// Exact category; `all` (or absence) disables the filter.
    pub category: Option<String>,
    /// Case-insensitive substring across name, skills, location,
    /// nationality.
    pub search: Option<String>,
}

/// A job post plus its derived display values. Expiry is computed from
/// `(timestamp, now)` at response time and never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(flatten)]
    pub job: JobPost,
    pub days_until_expiry: i64,
    pub expiring: bool,
}

impl JobResponse {
    pub fn from_post(job: JobPost, now_ms: i64) -> Self {
        let days_until_expiry = time::days_until_expiry(job.timestamp, now_ms);
        let expiring = time::is_expiring(job.timestamp, now_ms);
        Self {
            job,
            days_until_expiry,
            expiring,
        }
    }
}
