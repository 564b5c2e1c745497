use serde::Deserialize;
use time::{Date, OffsetDateTime};

#[derive(Debug, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub milestones_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMilestoneRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateSemesterRequest {
    pub date: Date,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct SemesterFilter {
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub class_year: Option<i32>,
}
