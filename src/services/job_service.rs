use crate::error::{Error, Result};
use crate::models::job_post::{JobPost, NewJobPost, STATUS_ACTIVE};
use crate::utils::{ids, time};
use sqlx::PgPool;

const JOB_COLUMNS: &str = "id, name, age, visa, nationality, experience, job, skills, phone, \
                           location, timestamp, views, status";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Jobs posted within the 7-day window, newest first. Only the lower
    /// bound on recency is enforced; `status` is not consulted.
    pub async fn list_active(&self, now_ms: i64) -> Result<Vec<JobPost>> {
        let floor = now_ms - time::ACTIVE_WINDOW_MS;
        let jobs = sqlx::query_as::<_, JobPost>(&format!(
            "SELECT {} FROM jobs WHERE timestamp >= $1 ORDER BY timestamp DESC",
            JOB_COLUMNS
        ))
        .bind(floor)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get(&self, id: &str) -> Result<Option<JobPost>> {
        let job = sqlx::query_as::<_, JobPost>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    /// Writes the full record with a server-assigned timestamp, zero
    /// views and active status. Returns the new id.
    pub async fn create(&self, profile: NewJobPost, now_ms: i64) -> Result<String> {
        let id = ids::job_id(now_ms);
        sqlx::query(
            "INSERT INTO jobs (id, name, age, visa, nationality, experience, job, skills, \
             phone, location, timestamp, views, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 0, $12)",
        )
        .bind(&id)
        .bind(&profile.name)
        .bind(&profile.age)
        .bind(&profile.visa)
        .bind(&profile.nationality)
        .bind(&profile.experience)
        .bind(&profile.job)
        .bind(&profile.skills)
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(now_ms)
        .bind(STATUS_ACTIVE)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    /// Atomic in-database increment so concurrent viewers never lose
    /// updates.
    pub async fn increment_views(&self, id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE jobs SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Job post {} not found", id)));
        }
        Ok(())
    }
}

/// Board-side filtering: exact category match against the `job` field
/// (the `all` sentinel bypasses it) and case-insensitive substring
/// search across name, skills, location and nationality.
pub fn filter_jobs(jobs: Vec<JobPost>, category: Option<&str>, search: Option<&str>) -> Vec<JobPost> {
    let search = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    jobs.into_iter()
        .filter(|job| match category {
            Some(cat) if cat != "all" => job.job == cat,
            _ => true,
        })
        .filter(|job| match &search {
            Some(term) => {
                job.name.to_lowercase().contains(term)
                    || job.skills.to_lowercase().contains(term)
                    || job.location.to_lowercase().contains(term)
                    || job.nationality.to_lowercase().contains(term)
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(name: &str, category: &str, skills: &str, location: &str, nationality: &str) -> JobPost {
        JobPost {
            id: format!("job_1_{}", name),
            name: name.to_string(),
            age: "26-35".to_string(),
            visa: "Work Permit".to_string(),
            nationality: nationality.to_string(),
            experience: "3-5 years".to_string(),
            job: category.to_string(),
            skills: skills.to_string(),
            phone: "0123456789".to_string(),
            location: location.to_string(),
            timestamp: 1,
            views: 0,
            status: STATUS_ACTIVE.to_string(),
        }
    }

    fn sample() -> Vec<JobPost> {
        vec![
            job("Rahim", "Factory Worker", "packing line", "Klang", "Bangladesh"),
            job("Sita", "Driver", "lorry license", "Penang", "Nepal"),
            job("Ali", "Factory Worker", "forklift", "Johor Bahru", "Indonesia"),
        ]
    }

    #[test]
    fn all_sentinel_bypasses_category_filter() {
        assert_eq!(filter_jobs(sample(), Some("all"), None).len(), 3);
        assert_eq!(filter_jobs(sample(), None, None).len(), 3);
    }

    #[test]
    fn category_is_an_exact_match() {
        let filtered = filter_jobs(sample(), Some("Factory Worker"), None);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|j| j.job == "Factory Worker"));
        assert!(filter_jobs(sample(), Some("Factory"), None).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        assert_eq!(filter_jobs(sample(), None, Some("FORKLIFT")).len(), 1);
        assert_eq!(filter_jobs(sample(), None, Some("penang")).len(), 1);
        assert_eq!(filter_jobs(sample(), None, Some("nepal")).len(), 1);
        assert_eq!(filter_jobs(sample(), None, Some("rahim")).len(), 1);
    }

    #[test]
    fn search_and_category_combine() {
        let filtered = filter_jobs(sample(), Some("Factory Worker"), Some("klang"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Rahim");
    }

    #[test]
    fn blank_search_matches_everything() {
        assert_eq!(filter_jobs(sample(), None, Some("   ")).len(), 3);
    }
}
