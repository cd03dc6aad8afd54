use serde::{Deserialize, Serialize};

/// Final answer for one query. Lives only for the duration of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
    pub explanation: String,
    pub image_url: Option<String>,
}
