//! Academy Module
//! Courses, teacher profiles, progress, quizzes, community posts and dashboards

pub mod api;
pub mod dashboard;
pub mod insights;
pub mod models;
pub mod scoring;
pub mod seed;
pub mod store;

pub use insights::{Insights, StaticInsights};
pub use store::AcademyStore;
