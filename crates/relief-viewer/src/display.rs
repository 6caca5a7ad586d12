//! Display detection.

use std::env;

/// Returns true if a window can be opened.
///
/// On Linux and the BSDs this requires `DISPLAY` or `WAYLAND_DISPLAY`.
/// Other platforms always have a window server.
pub fn display_available() -> bool {
    display_available_with(|key| env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
}

/// [`display_available`] with an injectable environment lookup.
pub fn display_available_with(lookup: impl Fn(&str) -> Option<String>) -> bool {
    if cfg!(all(unix, not(target_os = "macos"))) {
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|key| lookup(key).is_some_and(|v| !v.is_empty()))
    } else {
        true
    }
}
