//! Reference data served by the backend: traditions and special
//! requirements with their follow-up questions and images.

use serde::{Deserialize, Serialize};

/// A cultural or religious tradition offered for an event type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Tradition {
    pub id: Option<u64>,
    pub name: String,
    pub description: String,
}

/// An optional add-on service for a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequirementInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Unit the quantity is counted in, e.g. `guests`, `hours`
    pub unit: Option<String>,
    pub allows_quantity: bool,
}

/// A follow-up question attached to a requirement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequirementQuestion {
    pub id: u64,
    pub question_text: String,
    /// `text`, `number`, `select`, ...
    pub question_type: String,
    pub options: Vec<String>,
    pub is_required: bool,
}

/// Illustration for a requirement within an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequirementImage {
    pub image_url: String,
    pub caption: Option<String>,
}
