use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in viewer of the gallery, as reported by the sign-in flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: i64,
    /// Display name shown in the header and on gallery pages.
    pub name: String,
    /// The viewer's handle (login name).
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Viewer {
    pub fn new(id: i64, name: impl Into<String>, username: impl Into<String>) -> Self {
        Viewer {
            id,
            name: name.into(),
            username: username.into(),
            profile_image: None,
        }
    }
}

/// Opaque key identifying one browsing visitor (one tab / one client).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct VisitorId(Uuid);

impl VisitorId {
    pub fn new() -> Self {
        VisitorId(Uuid::new_v4())
    }
}

impl Default for VisitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for VisitorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(VisitorId)
    }
}
