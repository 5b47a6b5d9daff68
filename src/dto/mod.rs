pub mod job_dto;
pub mod request_dto;
pub mod wizard_dto;
