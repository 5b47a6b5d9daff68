pub mod job_service;
pub mod request_service;
pub mod wizard_service;
