//! Flat path-to-content file table backing the terminal commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::TerminalConfig;

/// In-memory file table keyed by absolute path. There are no directories; a "directory" is any
/// shared path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualFileTable {
    files: BTreeMap<String, String>,
}

impl VirtualFileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the configured seed files.
    pub fn seeded(config: &TerminalConfig) -> Self {
        Self {
            files: config.seed_files.iter().cloned().collect(),
        }
    }

    /// Maps user input to an absolute path: empty input is `home`, absolute paths pass through,
    /// anything else is joined onto `home`.
    pub fn resolve_path(home: &str, input: &str) -> String {
        if input.is_empty() {
            home.to_string()
        } else if input.starts_with('/') {
            input.to_string()
        } else {
            format!("{home}/{input}")
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn read(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn write(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Creates an empty file unless `path` already exists.
    pub fn touch(&mut self, path: &str) {
        self.files.entry(path.to_string()).or_default();
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Entries whose path starts with `prefix`, with a leading `<prefix>/` stripped.
    ///
    /// Matching is textual, so `/home/us` also matches `/home/user/...`; those entries are listed
    /// with their full path.
    pub fn list(&self, prefix: &str) -> Vec<String> {
        let dir_prefix = format!("{prefix}/");
        self.files
            .keys()
            .filter(|path| path.starts_with(prefix))
            .map(|path| path.strip_prefix(&dir_prefix).unwrap_or(path).to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Serializes the table as a `{ "<path>": "<content>" }` object.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Merges a previously exported object into the table, overwriting matching paths.
    ///
    /// Returns the number of merged entries. On error the table is unchanged.
    pub fn merge_json(&mut self, raw: &str) -> serde_json::Result<usize> {
        let incoming: BTreeMap<String, String> = serde_json::from_str(raw)?;
        let merged = incoming.len();
        self.files.extend(incoming);
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn table() -> VirtualFileTable {
        VirtualFileTable::seeded(&TerminalConfig::default())
    }

    #[test]
    fn resolve_path_rules() {
        assert_eq!(VirtualFileTable::resolve_path("/home/user", ""), "/home/user");
        assert_eq!(VirtualFileTable::resolve_path("/home/user", "/etc/x"), "/etc/x");
        assert_eq!(
            VirtualFileTable::resolve_path("/home/user", "notes/a.txt"),
            "/home/user/notes/a.txt"
        );
    }

    #[test]
    fn seeded_table_has_readme() {
        let vfs = table();
        assert_eq!(vfs.read("/home/user/readme.txt"), Some("Bienvenido a tu OS Web\n"));
    }

    #[test]
    fn touch_keeps_existing_content() {
        let mut vfs = table();
        vfs.touch("/home/user/readme.txt");
        vfs.touch("/home/user/x.txt");
        assert_eq!(vfs.read("/home/user/readme.txt"), Some("Bienvenido a tu OS Web\n"));
        assert_eq!(vfs.read("/home/user/x.txt"), Some(""));
    }

    #[test]
    fn list_strips_directory_prefix() {
        let mut vfs = table();
        vfs.write("/home/user/docs/a.md", "a");
        vfs.write("/tmp/b", "b");
        assert_eq!(vfs.list("/home/user"), vec!["docs/a.md", "readme.txt"]);
        assert_eq!(vfs.list("/home/us"), vec!["/home/user/docs/a.md", "/home/user/readme.txt"]);
        assert!(vfs.list("/var").is_empty());
    }

    #[test]
    fn merge_json_overwrites_and_rejects_garbage() {
        let mut vfs = table();
        let exported = vfs.export_json().expect("export");
        assert_eq!(exported, r#"{"/home/user/readme.txt":"Bienvenido a tu OS Web\n"}"#);

        let merged = vfs
            .merge_json(r#"{"/home/user/readme.txt":"nuevo","/tmp/z":""}"#)
            .expect("merge");
        assert_eq!(merged, 2);
        assert_eq!(vfs.read("/home/user/readme.txt"), Some("nuevo"));
        assert!(vfs.contains("/tmp/z"));

        let before = vfs.clone();
        assert!(vfs.merge_json("[1, 2").is_err());
        assert!(vfs.merge_json(r#"{"/a": 1}"#).is_err());
        assert_eq!(vfs, before);
    }
}
