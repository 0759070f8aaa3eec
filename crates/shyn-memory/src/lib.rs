//! Local persistence for the assistant.
//!
//! Stands in for the dashboard's client-local storage: two independent JSON
//! files under the platform data directory, one holding the rolling
//! transcript snapshot (capped to the most recent [`TRANSCRIPT_CAP`]
//! messages), one holding the serialized personality config. There is no
//! schema versioning; a snapshot that fails to parse is discarded with a
//! warning and the caller gets defaults.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use shyn_common::{Message, MemoryError, PersonalityConfig};

/// Maximum number of transcript entries kept in a snapshot.
pub const TRANSCRIPT_CAP: usize = 50;

const TRANSCRIPT_FILE: &str = "memory_v1.json";
const PERSONALITY_FILE: &str = "personality.json";

/// File-backed store for the transcript snapshot and personality config.
pub struct MemoryStore {
    dir: PathBuf,
}

impl MemoryStore {
    /// Open the store at the platform-specific default location.
    ///
    /// On macOS: `~/Library/Application Support/shyn/`
    /// On Linux: `~/.local/share/shyn/`
    pub fn open_default() -> Result<Self, MemoryError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MemoryError::Io("could not determine data directory".into()))?;
        Ok(Self::at(data_dir.join("shyn")))
    }

    /// Open the store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist the most recent [`TRANSCRIPT_CAP`] messages of `history`,
    /// overwriting any prior snapshot.
    pub fn save_transcript(&self, history: &[Message]) -> Result<(), MemoryError> {
        let start = history.len().saturating_sub(TRANSCRIPT_CAP);
        let snapshot = &history[start..];
        self.write_file(TRANSCRIPT_FILE, snapshot)?;
        debug!(count = snapshot.len(), "transcript snapshot saved");
        Ok(())
    }

    /// Load the persisted transcript snapshot.
    ///
    /// Missing or malformed snapshots yield an empty transcript.
    pub fn load_transcript(&self) -> Vec<Message> {
        let path = self.dir.join(TRANSCRIPT_FILE);
        if !path.exists() {
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read transcript snapshot: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Message>>(&content) {
            Ok(messages) => {
                debug!(count = messages.len(), "transcript snapshot restored");
                messages
            }
            Err(e) => {
                warn!("discarding malformed transcript snapshot: {e}");
                Vec::new()
            }
        }
    }

    /// Persist the personality config, overwriting any prior value.
    pub fn save_personality(&self, config: &PersonalityConfig) -> Result<(), MemoryError> {
        self.write_file(PERSONALITY_FILE, config)
    }

    /// Load the persisted personality config, falling back to defaults when
    /// absent or malformed.
    pub fn load_personality(&self) -> PersonalityConfig {
        let path = self.dir.join(PERSONALITY_FILE);
        if !path.exists() {
            return PersonalityConfig::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read personality config: {e}");
                return PersonalityConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("discarding malformed personality config: {e}");
                PersonalityConfig::default()
            }
        }
    }

    fn write_file<T: serde::Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), MemoryError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            MemoryError::Io(format!(
                "failed to create data directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let json = serde_json::to_string(value).map_err(|e| MemoryError::Parse(e.to_string()))?;

        let path = self.dir.join(name);
        std::fs::write(&path, json)
            .map_err(|e| MemoryError::Io(format!("failed to write {}: {e}", path.display())))
    }
}
