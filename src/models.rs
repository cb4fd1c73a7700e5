use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub hourly_rate: Option<HourlyRate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memberships: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workspace_settings: Map<String, Value>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub feature_subscription_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HourlyRate {
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memberships: Vec<Value>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub active_workspace: Option<String>,
    #[serde(default)]
    pub default_workspace: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Map<String, Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub billable: bool,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_interval: TimeInterval,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workspace_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_locked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_field_values: Vec<Value>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub kiosk_id: Option<String>,
}

/// `end` and `duration` stay empty while the timer is still running.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimeInterval {
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
