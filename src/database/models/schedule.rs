use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Filterable, Table};

pub static SCHEDULES: Table = Table {
    name: "schedules",
    columns: &[
        "id",
        "name",
        "description",
        "abbreviation",
        "isactive",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub abbreviation: String,
    pub isactive: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Single-record view: no active flag, no timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub abbreviation: String,
}

impl From<Schedule> for ScheduleSummary {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: schedule.id,
            name: schedule.name,
            description: schedule.description,
            abbreviation: schedule.abbreviation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSchedule {
    pub name: String,
    pub description: String,
    pub abbreviation: String,
}

/// Fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub abbreviation: Option<String>,
}

impl ScheduleChanges {
    pub fn apply_to(self, schedule: &mut Schedule) {
        if let Some(name) = self.name {
            schedule.name = name;
        }
        if let Some(description) = self.description {
            schedule.description = description;
        }
        if let Some(abbreviation) = self.abbreviation {
            schedule.abbreviation = abbreviation;
        }
    }
}

impl Filterable for Schedule {
    fn text_column(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "abbreviation" => Some(&self.abbreviation),
            _ => None,
        }
    }
}
