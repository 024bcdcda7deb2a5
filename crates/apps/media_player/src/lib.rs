//! Playlist model for the media player app.
//!
//! The player keeps one list of loaded files and routes each entry to the video or audio element
//! by MIME type. Object URLs are owned by the caller; removing an entry hands it back so its URL
//! can be revoked.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One loaded media file.
pub struct MediaItem {
    /// Playable source, usually an object URL.
    pub src: String,
    /// File name shown in the list.
    pub name: String,
    /// MIME type reported for the file; may be empty.
    pub mime_type: String,
}

impl MediaItem {
    pub fn new(
        src: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Which element should play an item. The other element is hidden.
pub enum PlaybackTarget {
    Video { src: String },
    Audio { src: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Playlist {
    items: Vec<MediaItem>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends files in the order they were picked.
    pub fn add(&mut self, items: impl IntoIterator<Item = MediaItem>) {
        self.items.extend(items);
    }

    /// Replaces the whole list with `item` and returns the entries it displaced.
    pub fn replace_with(&mut self, item: MediaItem) -> Vec<MediaItem> {
        std::mem::replace(&mut self.items, vec![item])
    }

    /// Removes the entry at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<MediaItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            log::debug!("playlist remove ignored: index {index} out of range");
            None
        }
    }

    pub fn play(&self, index: usize) -> Option<PlaybackTarget> {
        let item = self.items.get(index)?;
        let src = item.src.clone();
        Some(if item.is_video() {
            PlaybackTarget::Video { src }
        } else {
            PlaybackTarget::Audio { src }
        })
    }
}
