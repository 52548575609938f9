use serde::{Deserialize, Serialize};

/// Public preview of paywalled content, shown before purchase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPreview {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub preview_text: Option<String>,
    pub price: f64,
    pub currency: String,
}
