//! Project records
//!
//! A project is an immutable record: once the store has created one, none of
//! its fields change and it is never removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Project status
///
/// Only `Active` is produced by the creation path. `Finished` has no
/// transition into it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Finished,
}

impl ProjectStatus {
    /// All statuses in display order
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    /// Convert to its lowercase string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Finished => "finished",
        }
    }

    /// Parse from the lowercase string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ProjectStatus::Active),
            "finished" => Some(ProjectStatus::Finished),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier
    pub id: String,
    /// Project title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Number of people assigned
    pub people: u32,
    /// Project status
    pub status: ProjectStatus,
    /// When the project was created
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new active project with a fresh id
    ///
    /// Ids are random v4 UUIDs. Nothing checks them for collisions.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Whether this project belongs in the list for `status`
    pub fn has_status(&self, status: ProjectStatus) -> bool {
        self.status == status
    }
}
