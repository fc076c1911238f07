//! Jobs and expertise requirements.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A scheduled unit of work.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub site_address: String,
    pub client_name: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub planned_start: DateTime<Utc>,
    pub planned_end: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An expertise a job asks for, with the minimum level.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RequiredExpertise {
    pub expertise_id: i64,
    pub key: String,
    pub name: String,
    pub min_level: i64,
    pub required: bool,
}

/// A worker's level in one expertise.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct WorkerLevel {
    pub worker_id: i64,
    pub expertise_id: i64,
    pub level: i64,
}

/// A job with its requirements and assigned workers.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub required_expertise: Vec<RequiredExpertise>,
    pub assigned_worker_ids: Vec<i64>,
}
