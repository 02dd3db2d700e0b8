//! Directory name -> display name table.

use std::collections::HashMap;

/// Display names for the agents that ship with the fleet.
const BUILTIN_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("main", "Main"),
    ("clawpulse", "Pulse"),
    ("coder", "Coder"),
    ("researcher", "Researcher"),
    ("writer", "Writer"),
];

/// Immutable lookup built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct AgentDirectory {
    names: HashMap<String, String>,
}

impl AgentDirectory {
    /// Table with only the built-in entries.
    pub fn builtin() -> Self {
        let names = BUILTIN_DISPLAY_NAMES
            .iter()
            .map(|(dir, name)| (dir.to_string(), name.to_string()))
            .collect();
        Self { names }
    }

    /// Built-in table extended by configured entries. A configured key replaces the built-in one.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut directory = Self::builtin();
        for (dir, name) in overrides {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            directory.names.insert(dir.clone(), name.to_string());
        }
        directory
    }

    /// Display name for `directory`, or the directory name itself when unmapped.
    pub fn display_name<'a>(&'a self, directory: &'a str) -> &'a str {
        self.names
            .get(directory)
            .map(String::as_str)
            .unwrap_or(directory)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mapping() {
        let directory = AgentDirectory::builtin();
        assert_eq!(directory.display_name("clawpulse"), "Pulse");
        assert_eq!(directory.display_name("main"), "Main");
    }

    #[test]
    fn test_unmapped_falls_back_to_directory_name() {
        let directory = AgentDirectory::builtin();
        assert_eq!(directory.display_name("unknownbot"), "unknownbot");
    }

    #[test]
    fn test_overrides_extend_and_replace() {
        let overrides = HashMap::from([
            ("scout".to_string(), "Scout".to_string()),
            ("main".to_string(), "Lead".to_string()),
        ]);
        let directory = AgentDirectory::with_overrides(&overrides);
        assert_eq!(directory.display_name("scout"), "Scout");
        assert_eq!(directory.display_name("main"), "Lead");
        // Untouched built-ins survive
        assert_eq!(directory.display_name("clawpulse"), "Pulse");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let overrides = HashMap::from([("clawpulse".to_string(), "  ".to_string())]);
        let directory = AgentDirectory::with_overrides(&overrides);
        assert_eq!(directory.display_name("clawpulse"), "Pulse");
    }
}
