use std::collections::HashSet;

use crate::models::TimeEntry;

/// Each description once, in the order it first appears.
pub fn distinct_descriptions(entries: &[TimeEntry]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    entries
        .iter()
        .filter(|entry| seen.insert(entry.description.as_str()))
        .map(|entry| entry.description.clone())
        .collect()
}

pub fn task_list(entries: &[TimeEntry]) -> Vec<String> {
    let mut tasks = distinct_descriptions(entries);
    tasks.sort();
    tasks
}
