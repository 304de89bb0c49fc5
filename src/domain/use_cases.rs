pub mod auth;
pub mod candidates;
pub mod export;
pub mod extractors;
pub mod jobs;
pub mod notify;
pub mod resumes;
