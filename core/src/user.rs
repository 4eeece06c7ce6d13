//! User details as shown in the deposit application

use serde::{Deserialize, Serialize};

/// Raw user details as returned by the user endpoint; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInput {
    /// Login name
    pub username: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Surname prefix
    pub prefix: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Name as displayed
    pub display_name: Option<String>,
}

/// Normalized user details; absent fields are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    /// Login name
    pub username: String,
    /// First name
    pub first_name: String,
    /// Surname prefix
    pub prefix: String,
    /// Last name
    pub last_name: String,
    /// Name as displayed
    pub display_name: String,
}

/// Convert raw user details, replacing absent fields by `""`
#[must_use]
pub fn user_converter(input: UserInput) -> UserDetails {
    UserDetails {
        username: input.username.unwrap_or_default(),
        first_name: input.first_name.unwrap_or_default(),
        prefix: input.prefix.unwrap_or_default(),
        last_name: input.last_name.unwrap_or_default(),
        display_name: input.display_name.unwrap_or_default(),
    }
}
