//! Preference persistence
//!
//! The placement controller reads its configuration from a [`PreferenceStore`]
//! once at construction and writes every accepted change straight back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A stored preference value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Float(f32),
    Text(String),
}

impl PreferenceValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PreferenceValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value; numeric text is accepted as well
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PreferenceValue::Float(v) => Some(*v),
            PreferenceValue::Text(s) => s.trim().parse().ok(),
            PreferenceValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PreferenceValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        PreferenceValue::Text(value.to_string())
    }
}

/// Key/value preference storage
pub trait PreferenceStore {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Option<PreferenceValue>;

    /// Write a value
    fn set(&mut self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError>;
}

/// Volatile in-memory preferences
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, PreferenceValue>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferences persisted to a RON file, written through on every change
#[derive(Debug, Clone)]
pub struct RonPreferences {
    path: PathBuf,
    values: BTreeMap<String, PreferenceValue>,
}

impl RonPreferences {
    /// Open a preference file, starting empty if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| PreferenceError::Io(e.to_string()))?;
            ron::from_str(&content).map_err(|e| PreferenceError::Deserialize(e.to_string()))?
        } else {
            BTreeMap::new()
        };
        tracing::debug!("Opened preferences {} ({} entries)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all values to disk
    pub fn save(&self) -> Result<(), PreferenceError> {
        let content = ron::ser::to_string_pretty(&self.values, ron::ser::PrettyConfig::default())
            .map_err(|e| PreferenceError::Serialize(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PreferenceError::Io(e.to_string()))?;
        }
        std::fs::write(&self.path, content).map_err(|e| PreferenceError::Io(e.to_string()))?;
        Ok(())
    }
}

impl PreferenceStore for RonPreferences {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// Preference-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
