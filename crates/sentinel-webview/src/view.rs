//! Shell view lifecycle.
//!
//! `ShellView` wraps the single `wry::WebView` filling the kiosk window.
//! Handlers push events into a shared queue which the main event loop
//! drains once per iteration; the handlers themselves never block.

use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::BRIDGE_INIT_SCRIPT;

/// Initial content for the shell view, decided before the view exists.
///
/// Building the view issues the navigation, so a caller that must not
/// touch the network picks `Html` here instead of loading a URL and
/// navigating away afterwards.
#[derive(Debug, Clone)]
pub enum ViewContent {
    /// Navigate to a remote URL.
    Url(String),
    /// Render a local static page.
    Html(String),
}

/// Configuration for creating the shell view.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Initial content to load.
    pub content: ViewContent,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Whether media may start playing without a user gesture. The page
    /// client starts capture on load, so this defaults on.
    pub autoplay: bool,
}

impl ViewConfig {
    /// Create a config that loads a URL with kiosk defaults.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::with_content(ViewContent::Url(url.into()))
    }

    /// Create a config that renders local HTML with kiosk defaults.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self::with_content(ViewContent::Html(html.into()))
    }

    fn with_content(content: ViewContent) -> Self {
        Self {
            content,
            user_agent: None,
            devtools: cfg!(debug_assertions),
            autoplay: true,
        }
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }
}

/// The single webview filling the kiosk window.
pub struct ShellView {
    webview: WebView,
    /// Event sink — events are pushed here for the main event loop to consume.
    events: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl ShellView {
    /// Create the view as a full-window child of the given window.
    ///
    /// The bridge init script is installed into every document before
    /// any page script runs.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        config: &ViewConfig,
    ) -> Result<Self, wry::Error> {
        let events: Arc<Mutex<Vec<WebViewEvent>>> = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WebViewBuilder::new()
            .with_devtools(config.devtools)
            .with_autoplay(config.autoplay)
            .with_initialization_script(BRIDGE_INIT_SCRIPT);

        builder = match &config.content {
            ViewContent::Url(url) => builder.with_url(url),
            ViewContent::Html(html) => builder.with_html(html),
        };

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // IPC handler: page -> host
        let ipc_events = Arc::clone(&events);
        builder = builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            debug!(body = %body, "IPC message from page");
            if let Ok(mut evts) = ipc_events.lock() {
                evts.push(WebViewEvent::IpcMessage { body });
            }
        });

        // Page load handler
        let load_events = Arc::clone(&events);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            if let Ok(mut evts) = load_events.lock() {
                evts.push(WebViewEvent::PageLoad { state, url });
            }
        });

        // Navigation handler: the kiosk follows wherever the remote
        // content leads; navigations are logged but not blocked.
        builder = builder.with_navigation_handler(move |url| {
            debug!(url = %url, "navigation requested");
            true
        });

        let webview = builder.build(window)?;

        match &config.content {
            ViewContent::Url(url) => debug!(url = %url, "shell view created"),
            ViewContent::Html(_) => debug!("shell view created with local content"),
        }

        Ok(Self { webview, events })
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    /// Navigate to a URL.
    pub fn load_url(&self, url: &str) -> Result<(), wry::Error> {
        self.webview.load_url(url)
    }

    /// Load raw HTML content (used for the local blocking view).
    pub fn load_html(&self, html: &str) -> Result<(), wry::Error> {
        self.webview.load_html(html)
    }

    /// Execute JavaScript in the page context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_url_carries_url_content() {
        let config = ViewConfig::with_url("https://example.com/app");
        match config.content {
            ViewContent::Url(url) => assert_eq!(url, "https://example.com/app"),
            ViewContent::Html(_) => panic!("expected url content"),
        }
    }

    #[test]
    fn with_html_carries_local_content() {
        let config = ViewConfig::with_html("<html><body>static</body></html>");
        match config.content {
            ViewContent::Html(html) => assert!(html.contains("static")),
            ViewContent::Url(url) => panic!("expected local content, got url {url}"),
        }
    }

    #[test]
    fn user_agent_is_opt_in() {
        let config = ViewConfig::with_url("https://example.com");
        assert!(config.user_agent.is_none());

        let config = config.with_user_agent("Sentinel/0.1");
        assert_eq!(config.user_agent.as_deref(), Some("Sentinel/0.1"));
    }
}
