//! Dark theme preference, persisted in `localStorage` and applied as a
//! `dark-mode` class on the `<html>` element. Browser-only; the SSR
//! build renders the light theme and lets hydration correct it.

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "inkpress_dark";

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Stored preference; falls back to the system color scheme when the
/// visitor has never toggled.
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        if let Some(stored) = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
            return stored == "true";
        }
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Set or clear the `dark-mode` class on the document element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        let _ = if enabled {
            classes.add_1("dark-mode")
        } else {
            classes.remove_1("dark-mode")
        };
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Flip the preference, persist it, and apply the class. Returns the
/// new value.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "hydrate")]
    if let Some(storage) = storage() {
        let _ = storage.set_item(STORAGE_KEY, if next { "true" } else { "false" });
    }
    next
}
