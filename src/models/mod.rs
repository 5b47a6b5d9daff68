pub mod contact_request;
pub mod job_post;
