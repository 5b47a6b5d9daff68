pub mod health;
pub mod jobs;
pub mod requests;
pub mod wizard;
