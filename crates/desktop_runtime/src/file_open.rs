//! Routing for files picked from the desktop "open file" control.

/// Shown when a picked file is neither media nor previewable text.
pub const UNSUPPORTED_PREVIEW_MESSAGE: &str =
    "Tipo no soportado para vista previa. Puedes reproducir audio/video desde Reproductor.";

/// Where a picked file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOpen {
    /// Hand the file to the media player playlist.
    Media,
    /// Read it as text and show it in a new window.
    Text,
    /// Tell the user it cannot be previewed.
    Unsupported(String),
}

/// Routes a picked file by MIME type, falling back to the `.md`/`.json` extensions for text.
pub fn route_file(name: &str, mime_type: &str) -> FileOpen {
    if mime_type.starts_with("video/") || mime_type.starts_with("audio/") {
        return FileOpen::Media;
    }
    let lower = name.to_ascii_lowercase();
    if mime_type.starts_with("text/") || lower.ends_with(".md") || lower.ends_with(".json") {
        return FileOpen::Text;
    }
    FileOpen::Unsupported(UNSUPPORTED_PREVIEW_MESSAGE.to_string())
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Window content for a text preview: escaped, wrapped, and height-limited.
pub fn text_window_content(text: &str) -> String {
    format!(
        "<pre style=\"white-space:pre-wrap;max-height:240px;overflow:auto;\">{}</pre>",
        escape_html(text)
    )
}
