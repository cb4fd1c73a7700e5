use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::clockify::{ApiError, ClockifyClient};
use crate::dates::DayWindow;
use crate::grouping::task_list;
use crate::models::Workspace;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("workspace \"{0}\" not found")]
    WorkspaceNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub label: String,
    pub tasks: Vec<String>,
}

impl fmt::Display for DailyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============= {} =============", self.label)?;
        for task in &self.tasks {
            writeln!(f, "- {task}")?;
        }
        Ok(())
    }
}

pub fn resolve_workspace_id<'a>(workspaces: &'a [Workspace], name: &str) -> Option<&'a str> {
    workspaces
        .iter()
        .find(|workspace| workspace.name == name)
        .map(|workspace| workspace.id.as_str())
}

pub fn build_report(
    client: &ClockifyClient,
    workspace_name: &str,
    window: &DayWindow,
) -> Result<DailyReport, ReportError> {
    let workspaces = client.fetch_workspaces()?;
    let workspace_id = resolve_workspace_id(&workspaces, workspace_name)
        .ok_or_else(|| ReportError::WorkspaceNotFound(workspace_name.to_string()))?;
    info!(workspace_id, "resolved workspace");

    let user = client.fetch_current_user()?;
    info!(user_id = %user.id, "resolved current user");

    let (start, end) = window.as_rfc3339();
    let entries = client.fetch_time_entries(workspace_id, &user.id, &start, &end)?;
    info!(count = entries.len(), %start, %end, "fetched time entries");

    Ok(DailyReport {
        label: window.label(),
        tasks: task_list(&entries),
    })
}
