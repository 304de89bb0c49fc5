pub mod actions;
pub mod auth;
pub mod candidates;
pub mod home;
pub mod jobs;
pub mod resumes;
pub mod system;
pub mod users;
