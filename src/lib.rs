//! Daily task summary built from Clockify time entries.
//!
//! The pipeline is one-directional: [`config`] supplies the API key, base URL
//! and workspace name, [`http`] wraps the blocking transport, [`clockify`]
//! decodes the three read endpoints and [`report`] turns one day of entries
//! into a deduplicated task list.

pub mod clockify;
pub mod config;
pub mod dates;
pub mod grouping;
pub mod http;
pub mod models;
pub mod report;
#[cfg(test)]
mod test_support;
