use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-registered site to watch.
///
/// The id is assigned at registration and never reused within a user's
/// collection. Sites are only ever created and deleted; there is no update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub url: String,
    pub name: String,
}

/// Registration payload. `name` falls back to the URL's host when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSite {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
}
