//! Table identifiers and their file-name mapping.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File extension used by game-database export files.
pub const TABLE_FILE_EXT: &str = "txt";

/// Logical name of one dataset within an export.
///
/// A table maps to a single file: `<directory>/<name>.txt`. The identifier
/// is fixed for the lifetime of a processing run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table(String);

impl Table {
    /// Create a table identifier from its logical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The logical name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// File name for this table (`<name>.txt`).
    pub fn file_name(&self) -> String {
        format!("{}.{TABLE_FILE_EXT}", self.0)
    }

    /// Full path of this table's file inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let table = Table::new("playernames");
        assert_eq!(table.file_name(), "playernames.txt");
    }

    #[test]
    fn test_path_in() {
        let table = Table::new("players");
        let path = table.path_in(Path::new("/data/in"));
        assert_eq!(path, PathBuf::from("/data/in/players.txt"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Table::new("teams").to_string(), "teams");
    }
}
