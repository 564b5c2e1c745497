use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const SCHOOLS_SLUG_KEY: &str = "schools_slug_key";
pub const SCHOOLS_URL_KEY: &str = "schools_url_key";
pub const STUDENTS_USER_ID_FKEY: &str = "students_user_id_fkey";

/// Calendar year of today, in UTC.
pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub milestones_url: String,
}

impl School {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        url: impl Into<String>,
        milestones_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            url: url.into(),
            milestones_url: milestones_url.into(),
        }
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Milestone {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Milestone {
    pub fn new(date: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Semester {
    pub id: Uuid,
    pub active: bool,
    pub date: Date,
}

impl Semester {
    pub fn new(date: Date) -> Self {
        Self {
            id: Uuid::new_v4(),
            active: true,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub class_year: i32,
}

impl Student {
    pub fn new(user_id: Uuid, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            class_year: current_year(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
