use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::config::DesktopConfig;

/// Stable window identifier. Doubles as the snapshot key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// How a window came to exist. Static windows are permanent desktop fixtures; dynamic ones are
/// removed on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowOrigin {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// CSS `display` value written to snapshots.
    pub fn css_display(self) -> &'static str {
        match self {
            Self::Visible => "block",
            Self::Hidden => "none",
        }
    }

    /// Parses a CSS `display` value. An empty value carries no information.
    pub fn from_css_display(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            "none" => Some(Self::Hidden),
            _ => Some(Self::Visible),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub left: i32,
    pub top: i32,
}

impl WindowPosition {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
        }
    }
}

/// Formats a pixel offset as a CSS length (`"120px"`).
pub fn css_px(value: i32) -> String {
    format!("{value}px")
}

/// Parses a CSS pixel length (`"120px"`, `"12.5px"`, `"80"`), rounding fractional values.
///
/// Values outside the `i32` range are rejected rather than clamped.
pub fn parse_css_px(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if number.is_empty() {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    let rounded = value.round();
    if !rounded.is_finite() || rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return None;
    }
    Some(rounded as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Registry entry for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub origin: WindowOrigin,
    /// `None` until a declaration, restore, drag, or creation places the window.
    pub position: Option<WindowPosition>,
    pub visibility: Visibility,
    pub z_order: u32,
    /// Markup supplied at creation; empty for static windows.
    pub content: String,
    /// Visibility remembered by the show-desktop toggle while everything is hidden.
    pub prior_visibility: Option<Visibility>,
}

impl WindowRecord {
    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    fn snapshot_entry(&self) -> SnapshotEntry {
        let (left, top) = match self.position {
            Some(position) => (css_px(position.left), css_px(position.top)),
            None => (String::new(), String::new()),
        };
        SnapshotEntry {
            left,
            top,
            display: self.visibility.css_display().to_string(),
        }
    }
}

/// Startup description of a statically declared window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDeclaration {
    /// Declared id; a random `win-xxxxxx` id is generated when absent.
    pub id: Option<String>,
    pub title: String,
    pub position: Option<WindowPosition>,
    pub visibility: Visibility,
}

impl WindowDeclaration {
    /// Declares a hidden static window, the usual state of desktop fixtures before first open.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            position: None,
            visibility: Visibility::Hidden,
        }
    }

    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.position = Some(WindowPosition::new(left, top));
        self
    }

    pub fn visible(mut self) -> Self {
        self.visibility = Visibility::Visible;
        self
    }
}

/// Persisted projection of one window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub top: String,
    #[serde(default)]
    pub display: String,
}

/// Persisted projection of the window registry, keyed by window id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSnapshot {
    pub entries: BTreeMap<String, SnapshotEntry>,
}

impl LayoutSnapshot {
    pub fn get(&self, window_id: &str) -> Option<&SnapshotEntry> {
        self.entries.get(window_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Window registry: the single source of truth for window state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    pub config: DesktopConfig,
    /// Windows in registration order.
    pub windows: Vec<WindowRecord>,
    /// Last z-order handed out.
    pub z_counter: u32,
    /// Dynamic windows created so far; never decremented, so ids are not reused.
    pub created_count: u32,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl DesktopState {
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            z_counter: config.z_order_base,
            config,
            windows: Vec::new(),
            created_count: 0,
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn window_mut(&mut self, window_id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == window_id)
    }

    pub fn contains(&self, window_id: &WindowId) -> bool {
        self.window(window_id).is_some()
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id.clone()).collect()
    }

    pub fn any_visible(&self) -> bool {
        self.windows.iter().any(WindowRecord::is_visible)
    }

    /// Window holding the maximum z-order, recomputed on every call. Later registrations win ties.
    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.windows
            .iter()
            .fold(None::<&WindowRecord>, |best, window| match best {
                Some(best) if best.z_order > window.z_order => Some(best),
                _ => Some(window),
            })
            .map(|w| &w.id)
    }

    /// Adds a statically declared window. Returns `None` when the id is already registered.
    pub fn register_static(&mut self, declaration: WindowDeclaration) -> Option<WindowId> {
        let id = match declaration.id {
            Some(id) if !id.trim().is_empty() => WindowId::new(id),
            _ => self.generate_static_id(),
        };
        if self.contains(&id) {
            log::warn!("window `{id}` already registered; ignoring duplicate declaration");
            return None;
        }
        self.windows.push(WindowRecord {
            id: id.clone(),
            title: declaration.title,
            origin: WindowOrigin::Static,
            position: declaration.position,
            visibility: declaration.visibility,
            z_order: 0,
            content: String::new(),
            prior_visibility: None,
        });
        Some(id)
    }

    fn generate_static_id(&self) -> WindowId {
        loop {
            let suffix: String = uuid::Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(6)
                .collect();
            let id = WindowId::new(format!("{}{suffix}", self.config.static_id_prefix));
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Builds the persisted projection of every registered window.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            entries: self
                .windows
                .iter()
                .map(|w| (w.id.as_str().to_string(), w.snapshot_entry()))
                .collect(),
        }
    }

    /// Rehydrates registered windows from `snapshot`, returning how many entries matched.
    ///
    /// Entries for unknown ids are skipped. Empty fields leave the current value in place.
    pub fn apply_snapshot(&mut self, snapshot: &LayoutSnapshot) -> usize {
        let mut applied = 0;
        for (id, entry) in &snapshot.entries {
            let Some(window) = self.window_mut(&WindowId::new(id.as_str())) else {
                log::debug!("skipping snapshot entry for unknown window `{id}`");
                continue;
            };
            let current = window.position.unwrap_or_default();
            let left = parse_css_px(&entry.left);
            let top = parse_css_px(&entry.top);
            if left.is_some() || top.is_some() {
                window.position = Some(WindowPosition {
                    left: left.unwrap_or(current.left),
                    top: top.unwrap_or(current.top),
                });
            }
            if let Some(visibility) = Visibility::from_css_display(&entry.display) {
                window.visibility = visibility;
            }
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn css_px_parsing_accepts_suffix_fractions_and_bare_numbers() {
        assert_eq!(parse_css_px("120px"), Some(120));
        assert_eq!(parse_css_px("-35px"), Some(-35));
        assert_eq!(parse_css_px("12.6px"), Some(13));
        assert_eq!(parse_css_px("80"), Some(80));
        assert_eq!(parse_css_px(""), None);
        assert_eq!(parse_css_px("auto"), None);
    }

    #[test]
    fn css_px_outside_the_integer_range_is_rejected() {
        assert_eq!(parse_css_px("1e12px"), None);
        assert_eq!(parse_css_px("-1e12px"), None);
        assert_eq!(parse_css_px("2147483647px"), Some(i32::MAX));
    }

    #[test]
    fn offset_saturates_at_the_integer_bounds() {
        let far = WindowPosition::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(far.offset(10, -10), WindowPosition::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn generated_static_ids_use_prefix_and_six_characters() {
        let mut state = DesktopState::default();
        let id = state
            .register_static(WindowDeclaration {
                id: None,
                title: "Notas".to_string(),
                position: None,
                visibility: Visibility::Hidden,
            })
            .expect("registered");
        let suffix = id.as_str().strip_prefix("win-").expect("prefix");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn duplicate_static_declarations_are_ignored() {
        let mut state = DesktopState::default();
        assert!(state
            .register_static(WindowDeclaration::new("browser", "Navegador"))
            .is_some());
        assert!(state
            .register_static(WindowDeclaration::new("browser", "Otro"))
            .is_none());
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.windows[0].title, "Navegador");
    }

    #[test]
    fn active_window_prefers_later_registration_on_ties() {
        let mut state = DesktopState::default();
        state.register_static(WindowDeclaration::new("a", "A"));
        state.register_static(WindowDeclaration::new("b", "B"));
        assert_eq!(state.active_window_id(), Some(&WindowId::from("b")));

        state.windows[0].z_order = 5;
        assert_eq!(state.active_window_id(), Some(&WindowId::from("a")));
    }

    #[test]
    fn snapshot_projects_position_and_display() {
        let mut state = DesktopState::default();
        state.register_static(WindowDeclaration::new("media", "Reproductor").at(40, 60).visible());
        state.register_static(WindowDeclaration::new("files", "Archivos"));

        let snapshot = state.snapshot();
        assert_eq!(
            snapshot.get("media"),
            Some(&SnapshotEntry {
                left: "40px".to_string(),
                top: "60px".to_string(),
                display: "block".to_string(),
            })
        );
        assert_eq!(
            snapshot.get("files"),
            Some(&SnapshotEntry {
                left: String::new(),
                top: String::new(),
                display: "none".to_string(),
            })
        );
    }

    #[test]
    fn apply_snapshot_skips_unknown_ids_and_keeps_fields_for_empty_values() {
        let mut state = DesktopState::default();
        state.register_static(WindowDeclaration::new("media", "Reproductor").at(10, 20));

        let snapshot: LayoutSnapshot = serde_json::from_str(
            r#"{
                "media": { "left": "300px", "top": "", "display": "block" },
                "vent-7": { "left": "1px", "top": "1px", "display": "none" }
            }"#,
        )
        .expect("snapshot json");

        assert_eq!(state.apply_snapshot(&snapshot), 1);
        let media = state.window(&WindowId::from("media")).expect("media");
        assert_eq!(media.position, Some(WindowPosition::new(300, 20)));
        assert_eq!(media.visibility, Visibility::Visible);
        assert!(!state.contains(&WindowId::from("vent-7")));
    }

    #[test]
    fn snapshot_entry_fields_default_when_missing() {
        let snapshot: LayoutSnapshot =
            serde_json::from_str(r#"{ "media": { "left": "5px" } }"#).expect("lenient json");
        assert_eq!(snapshot.get("media").map(|e| e.display.as_str()), Some(""));
    }
}
