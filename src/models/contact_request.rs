use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::job_post::JobPost;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// An employer's request for a job seeker's real phone number, stored in
/// `contact_requests`. Both participant phones are denormalized in
/// normalized form so each portal is a single indexed equality lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: String,
    /// Weak reference to the job post; nothing cascades.
    pub job_id: String,
    pub job_seeker_name: String,
    pub employer_name: String,
    pub employer_phone: String,
    pub employer_phone_normalized: String,
    /// Resolved from the referenced job at submission time.
    pub job_seeker_phone_normalized: String,
    pub timestamp: i64,
    /// `pending` until the seeker resolves it; transitions are one-way.
    pub status: String,
    pub approved_at: Option<i64>,
    pub rejected_at: Option<i64>,
    /// Referenced job, joined into employer-side listings once a request
    /// is approved so the seeker's real phone becomes visible.
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_data: Option<JobPost>,
}

/// The seeker's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Approved,
    Rejected,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Approved => STATUS_APPROVED,
            Resolution::Rejected => STATUS_REJECTED,
        }
    }
}
