use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Animal {
    #[serde(rename = "animal_id")]
    #[sqlx(rename = "animal_id")]
    pub id: String,
    pub name: String,
    pub species: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "animal_type")]
    pub kind: String,
    /// Length of the animal's act, in minutes.
    pub show_duration: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnimal {
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub show_duration: i32,
}

/// Fields present here overwrite the stored animal; absent ones are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_duration: Option<i32>,
}
