//! Tunables for window placement, identifiers, and snapshot storage.

/// Storage key holding the serialized window-state snapshot.
pub const WINDOWS_STATE_KEY: &str = "mi_os_windows_state";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Desktop runtime configuration.
pub struct DesktopConfig {
    /// Key used for the window-state snapshot in both storage scopes.
    pub storage_key: String,
    /// Starting value of the z-order counter; the first raised window gets `base + 1`.
    pub z_order_base: u32,
    /// Cascade origin (both axes) for dynamically created windows.
    pub cascade_origin: i32,
    /// Cascade step (both axes) per dynamic window created.
    pub cascade_step: i32,
    /// Prefix for sequential dynamic window ids.
    pub dynamic_id_prefix: String,
    /// Prefix for generated ids of statically declared windows.
    pub static_id_prefix: String,
    /// Window opened when a quick search resolves to a URL.
    pub browser_window_id: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            storage_key: WINDOWS_STATE_KEY.to_string(),
            z_order_base: 100,
            cascade_origin: 100,
            cascade_step: 18,
            dynamic_id_prefix: "vent-".to_string(),
            static_id_prefix: "win-".to_string(),
            browser_window_id: "browser".to_string(),
        }
    }
}
