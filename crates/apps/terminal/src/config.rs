//! Terminal tunables.

/// Home directory used for relative paths and as the default `ls` target.
pub const DEFAULT_HOME_DIR: &str = "/home/user";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Terminal configuration.
pub struct TerminalConfig {
    /// Absolute home directory without a trailing slash.
    pub home_dir: String,
    /// Text echoed in front of every submitted line.
    pub prompt: String,
    /// Storage key used by `save` and `load` when none is given.
    pub default_export_key: String,
    /// Files present in a fresh virtual file table.
    pub seed_files: Vec<(String, String)>,
    /// Oldest scrollback lines are dropped past this count.
    pub max_scrollback: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            home_dir: DEFAULT_HOME_DIR.to_string(),
            prompt: "user@webos:~$ ".to_string(),
            default_export_key: "fs".to_string(),
            seed_files: vec![(
                format!("{DEFAULT_HOME_DIR}/readme.txt"),
                "Bienvenido a tu OS Web\n".to_string(),
            )],
            max_scrollback: 500,
        }
    }
}
