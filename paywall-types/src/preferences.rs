use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

wire_str!(Theme {
    Light => "light",
    Dark => "dark",
    System => "system",
});

/// Per-user dashboard preferences stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// ISO-4217 code used when displaying amounts.
    pub currency: String,
    /// BCP-47 tag used when formatting numbers and dates.
    pub locale: String,
    pub timezone: String,
    pub email_notifications: bool,
    pub marketing_emails: bool,
    pub theme: Theme,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            locale: "en-US".to_string(),
            timezone: "UTC".to_string(),
            email_notifications: true,
            marketing_emails: false,
            theme: Theme::System,
        }
    }
}
