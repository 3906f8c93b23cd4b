use std::process::Command;

use tracing::warn;

use super::{UiLinkOpener, is_openable};

/// Hands the link to the platform's default browser.
pub struct SystemBrowserOpener;

impl UiLinkOpener for SystemBrowserOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if !is_openable(url) {
            warn!(url, "refusing to open non-web link");
            return;
        }
        #[cfg(target_os = "macos")]
        let spawned = Command::new("open").arg(url).spawn();
        #[cfg(target_os = "windows")]
        let spawned = Command::new("cmd").args(["/C", "start", "", url]).spawn();
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let spawned = Command::new("xdg-open").arg(url).spawn();

        if let Err(err) = spawned {
            warn!(url, "failed to open link: {err}");
        }
    }
}
