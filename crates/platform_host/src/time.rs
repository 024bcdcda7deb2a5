//! Time helpers shared across host contracts and apps.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns the current local date and time in the browser's `Date.toString()` shape.
pub fn local_datetime_string() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::Date::new_0().to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Local::now()
            .format("%a %b %d %Y %H:%M:%S GMT%z")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_time_is_after_2020() {
        assert!(unix_time_ms_now() > 1_577_836_800_000);
    }

    #[test]
    fn local_datetime_mentions_gmt_offset() {
        let now = local_datetime_string();
        assert!(now.contains("GMT"), "unexpected date format: {now}");
    }
}
