pub mod datasets;
pub mod health;
pub mod jobs;
pub mod permissions;
pub mod subjects;
