use std::sync::Arc;

mod desktop;

/// Opens subtopic reference links outside the app window.
pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn UiLinkOpener>;

pub use desktop::SystemBrowserOpener;

/// Only web links leave the app; anything else is ignored.
#[must_use]
pub fn is_openable(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}
