//! Project metadata (`meta.json`)

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_COLOR: &str = "#1abc9c";
const DEFAULT_AUTHOR: &str = "Coder";

/// Descriptive metadata of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub appname: String,
    pub created: String,
    pub modified: String,
    pub color: String,
    pub author: String,
    pub name: String,
    pub hidden: bool,
    pub public: bool,
}

/// Whatever subset of fields a metadata file actually carries
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredMetadata {
    appname: Option<String>,
    created: Option<String>,
    modified: Option<String>,
    color: Option<String>,
    author: Option<String>,
    name: Option<String>,
    hidden: Option<bool>,
    public: Option<bool>,
}

impl AppMetadata {
    /// Metadata for a project that has no metadata file
    pub fn defaults_for(app_name: &str) -> Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();

        AppMetadata {
            appname: app_name.to_string(),
            created: today.clone(),
            modified: today,
            color: DEFAULT_COLOR.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            name: app_name.to_string(),
            hidden: false,
            public: false,
        }
    }

    /// Overlay the fields present in `raw` on top of the defaults
    ///
    /// Unparseable content yields the defaults.
    pub fn from_json(app_name: &str, raw: &[u8]) -> Self {
        let defaults = Self::defaults_for(app_name);

        let stored = match serde_json::from_slice::<StoredMetadata>(raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(app = app_name, error = %e, "ignoring unreadable metadata");
                return defaults;
            }
        };

        AppMetadata {
            appname: stored.appname.unwrap_or(defaults.appname),
            created: stored.created.unwrap_or(defaults.created),
            modified: stored.modified.unwrap_or(defaults.modified),
            color: stored.color.unwrap_or(defaults.color),
            author: stored.author.unwrap_or(defaults.author),
            name: stored.name.unwrap_or(defaults.name),
            hidden: stored.hidden.unwrap_or(defaults.hidden),
            public: stored.public.unwrap_or(defaults.public),
        }
    }
}
