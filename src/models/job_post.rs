use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_ACTIVE: &str = "active";

/// A job seeker's submitted profile as stored in `jobs`. Field names on
/// the wire are camelCase, matching the document shape the clients read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: String,
    pub name: String,
    pub age: String,
    pub visa: String,
    pub nationality: String,
    pub experience: String,
    pub job: String,
    pub skills: String,
    pub phone: String,
    pub location: String,
    /// Creation instant, epoch milliseconds. Set once, never updated.
    pub timestamp: i64,
    /// Only ever incremented.
    pub views: i64,
    /// Always `active` in practice; expiry is derived at read time from
    /// `timestamp` and never written back.
    pub status: String,
}

/// Profile fields collected by the wizard, before the server assigns
/// identity, timestamp and counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobPost {
    pub name: String,
    pub age: String,
    pub visa: String,
    pub nationality: String,
    pub experience: String,
    pub job: String,
    pub skills: String,
    pub phone: String,
    pub location: String,
}
