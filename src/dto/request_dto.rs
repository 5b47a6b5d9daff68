use serde::Deserialize;
use validator::Validate;

use crate::models::contact_request::Resolution;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestPayload {
    #[validate(length(min = 1))]
    pub job_id: String,
    #[validate(length(min = 1))]
    pub employer_name: String,
    #[validate(length(min = 1))]
    pub employer_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: Resolution,
}

/// Portal identity: a self-asserted phone number, not a credential.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalQuery {
    pub phone: String,
}
