pub mod candidate;
pub mod job;
pub mod notifier;
pub mod resume;
pub mod sqlx_repo;
pub mod token;
pub mod user;
