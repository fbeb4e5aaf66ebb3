// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project dashboard

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Completed,
    Processing,
    Draft,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Completed => write!(f, "Completed"),
            ProjectStatus::Processing => write!(f, "Processing"),
            ProjectStatus::Draft => write!(f, "Draft"),
        }
    }
}

/// A recorded video project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// `m:ss`
    pub duration: String,
    pub status: ProjectStatus,
    /// Human-relative, e.g. "2 hours ago"
    pub created_at: String,
    pub has_documentation: bool,
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<4} {:<34} {:>6} {:<11} {}",
            self.id, self.title, self.duration, self.status, self.created_at
        )
    }
}

fn project(
    id: &str,
    title: &str,
    duration: &str,
    status: ProjectStatus,
    created_at: &str,
    has_documentation: bool,
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        duration: duration.to_string(),
        status,
        created_at: created_at.to_string(),
        has_documentation,
    }
}

/// The project list with its search box
#[derive(Debug, Clone)]
pub struct Dashboard {
    projects: Vec<Project>,
}

impl Dashboard {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Dashboard pre-filled with the demo projects
    pub fn sample() -> Self {
        Self::new(vec![
            project(
                "1",
                "Product Onboarding Tutorial",
                "3:42",
                ProjectStatus::Completed,
                "2 hours ago",
                true,
            ),
            project(
                "2",
                "Feature Walkthrough - Dashboard",
                "5:18",
                ProjectStatus::Completed,
                "Yesterday",
                true,
            ),
            project(
                "3",
                "API Integration Guide",
                "2:15",
                ProjectStatus::Processing,
                "3 hours ago",
                false,
            ),
            project(
                "4",
                "Settings Configuration",
                "1:45",
                ProjectStatus::Draft,
                "5 days ago",
                false,
            ),
        ])
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects whose title contains `query`, ignoring case
    pub fn filter(&self, query: &str) -> Vec<&Project> {
        let needle = query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect()
    }
}
