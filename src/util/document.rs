//! Browser document helpers. No-ops outside the browser.

/// Set `document.title`.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn set_title(title: &str) {
    #[cfg(feature = "hydrate")]
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(title);
    }
}
