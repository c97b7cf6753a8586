use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a P.A board client.
///
/// This struct holds the settings that tell the client where the shared
/// board lives and how to render it: the collection name, the credential
/// file, the activity-history file, and the due-soon highlight threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Name of the remote collection holding the records.
    collection: String,

    /// Path to the credential file read once at startup.
    credentials: PathBuf,

    /// Path to the plain-text activity history file.
    history: PathBuf,

    /// Records due within this many days are highlighted as "due soon".
    due_soon_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            credentials: default_credentials(),
            history: default_history(),
            due_soon_days: default_due_soon_days(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the name of the remote record collection.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the path of the credential file.
    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials
    }

    /// Returns the path of the activity history file.
    #[must_use]
    pub fn history_path(&self) -> &Path {
        &self.history
    }

    /// Returns the due-soon highlight threshold, in days.
    #[must_use]
    pub const fn due_soon_days(&self) -> i64 {
        self.due_soon_days
    }
}

fn default_collection() -> String {
    "pa_records".to_owned()
}

fn default_credentials() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_history() -> PathBuf {
    PathBuf::from("pab-history.log")
}

const fn default_due_soon_days() -> i64 {
    3
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_collection")]
        collection: String,

        #[serde(default = "default_credentials")]
        credentials: PathBuf,

        #[serde(default = "default_history")]
        history: PathBuf,

        #[serde(default = "default_due_soon_days")]
        due_soon_days: i64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                collection,
                credentials,
                history,
                due_soon_days,
            } => Self {
                collection,
                credentials,
                history,
                due_soon_days,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            collection: config.collection,
            credentials: config.credentials,
            history: config.history,
            due_soon_days: config.due_soon_days,
        }
    }
}
