use serde::{Deserialize, Serialize};

/// A newsletter row. Timestamps are epoch milliseconds assigned by the
/// database clock, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Newsletter {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub published_at: i64,
    /// NULL until the row is updated for the first time.
    pub edited_at: Option<i64>,
}

/// Caller-supplied newsletter fields for create and patch operations.
/// On patch, `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsletterFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// A plant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: i64,
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub created_at: i64,
    pub edited_at: Option<i64>,
}

/// Caller-supplied plant fields for create and patch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}
