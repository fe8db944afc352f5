use std::path::PathBuf;

use serde::Deserialize;

/// How an all-null record is treated where it would filter rows
/// (delete, update, filtered select).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFilter {
    /// No WHERE clause: the statement addresses every row.
    #[default]
    MatchAll,
    /// Fail with [`crate::Error::EmptyPredicate`] before executing.
    Reject,
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Directory holding one database file per name
    pub root: PathBuf,
    /// File extension appended to database names
    pub extension: String,
    pub empty_filter: EmptyFilter,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            extension: "db".to_string(),
            empty_filter: EmptyFilter::MatchAll,
        }
    }
}

impl SqliteConfig {
    /// Create a config rooted at `root` with default settings
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_empty_filter(mut self, empty_filter: EmptyFilter) -> Self {
        self.empty_filter = empty_filter;
        self
    }

    /// `<root>/<name>.<extension>`
    pub fn database_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{}", self.extension))
    }
}
