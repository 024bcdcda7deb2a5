//! Repository host payloads and the app descriptor record the desktop consumes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entry of a user's repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub owner: RepoOwner,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl RepoSummary {
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.owner.login, self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepoInfo {
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// File payload from the contents endpoint. `content` is base64 with embedded line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileContents {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// One launchable app. Manifest fields this type does not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppDescriptor {
    /// Descriptor for a repository that only ships an entry page.
    pub fn iframe(id: String, name: String, url: String) -> Self {
        Self {
            id: Some(id),
            name: Some(name),
            icon: Some(String::new()),
            app_type: Some("iframe".to_string()),
            url: Some(url),
            embed_allowed: Some(true),
            default_width: Some(900),
            default_height: Some(600),
            resizable: Some(true),
            tags: Some(Vec::new()),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn iframe_descriptor_serializes_camel_case() {
        let descriptor = AppDescriptor::iframe(
            "bius-paint".to_string(),
            "paint".to_string(),
            "https://raw.githubusercontent.com/bius/paint/main/index.html".to_string(),
        );
        assert_eq!(
            serde_json::to_value(&descriptor).expect("serialize"),
            json!({
                "id": "bius-paint",
                "name": "paint",
                "icon": "",
                "type": "iframe",
                "url": "https://raw.githubusercontent.com/bius/paint/main/index.html",
                "embedAllowed": true,
                "defaultWidth": 900,
                "defaultHeight": 600,
                "resizable": true,
                "tags": []
            })
        );
    }

    #[test]
    fn unknown_manifest_fields_survive() {
        let raw = r#"{"name":"Notas","url":"app.html","author":"ana","window":{"maximized":true}}"#;
        let descriptor: AppDescriptor = serde_json::from_str(raw).expect("parse");
        assert_eq!(descriptor.name.as_deref(), Some("Notas"));
        assert_eq!(descriptor.extra.get("author"), Some(&json!("ana")));

        let value = serde_json::to_value(&descriptor).expect("serialize");
        assert_eq!(value, serde_json::from_str::<Value>(raw).expect("value"));
    }
}
