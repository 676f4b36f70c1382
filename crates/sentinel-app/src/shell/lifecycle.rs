//! Window lifecycle: creation, the blocking view, and content loading.

use std::path::Path;
use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Icon, WindowAttributes, WindowButtons, WindowLevel};

use sentinel_common::events::Event;
use sentinel_webview::{client, ShellView, ViewConfig};

use super::display::{self, TopologyChange};
use super::{KioskWindow, SentinelShell};

/// Local static view shown while the display configuration is
/// non-compliant. The remote URL is never loaded in this state.
const BLOCKING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Requirements not met</title>
<style>
  body { background: #111; color: #eee; font: 16px system-ui, sans-serif;
         display: flex; align-items: center; justify-content: center;
         height: 100vh; margin: 0; }
  main { text-align: center; max-width: 420px; }
  h1 { font-size: 20px; }
</style>
</head>
<body>
<main>
  <h1>Multiple displays detected</h1>
  <p>This application requires a single display. Disconnect the extra
     display to continue.</p>
</main>
</body>
</html>
"#;

impl SentinelShell {
    /// First activation (or re-activation with no window): evaluate the
    /// compliance predicate and create the kiosk window. Non-compliant
    /// startups still get a window, showing the blocking view instead of
    /// the remote content.
    pub(in crate::shell) fn start_or_activate(&mut self, event_loop: &ActiveEventLoop) {
        let displays = event_loop.available_monitors().count();
        let compliant = display::is_compliant(displays);
        self.displays.prime(displays);

        tracing::info!(displays, compliant, "activating");

        if let Err(e) = self.create_window(event_loop, compliant, displays) {
            // Advisory UI policy must never crash the process, but a
            // shell without a window cannot do anything useful either.
            tracing::error!("failed to create kiosk window: {e}");
            self.should_exit = true;
        }
    }

    fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        compliant: bool,
        displays: usize,
    ) -> Result<(), sentinel_common::ShellError> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());

        let mut attrs = WindowAttributes::default()
            .with_title(&self.config.window.title)
            .with_resizable(false)
            .with_enabled_buttons(WindowButtons::CLOSE)
            .with_fullscreen(Some(Fullscreen::Borderless(monitor.clone())));

        if self.config.window.always_on_top {
            attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if let Some(m) = &monitor {
            attrs = attrs.with_inner_size(m.size());
        }
        if let Some(path) = self.config.window.icon.clone() {
            attrs = attrs.with_window_icon(load_window_icon(&path));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| sentinel_common::ShellError::WindowCreation(e.to_string()))?;
        let window = Arc::new(window);

        let view_config = initial_view_config(&self.config, compliant);
        let view = ShellView::create(window.as_ref(), &view_config)
            .map_err(|e| sentinel_common::ShellError::WebView(e.to_string()))?;

        if self
            .window
            .create(KioskWindow { view, window })
            .is_some()
        {
            tracing::warn!("displaced a live kiosk window during activation");
        }

        if compliant {
            self.blocking = false;
            self.event_bus.publish(Event::WindowCreated);
            tracing::info!(url = %self.config.content.url, "kiosk window created");
        } else {
            // Startup straight into the blocking state. The view was
            // built on the blocking page; no navigation is needed.
            self.blocking = true;
            tracing::warn!(displays, "display requirements not met at startup, blocking");
            self.event_bus.publish(Event::BlockingEntered { displays });
        }
        Ok(())
    }

    /// Display topology changed while the window is open. Re-evaluate
    /// the compliance predicate and transition accordingly.
    pub(in crate::shell) fn handle_topology_change(&mut self, change: TopologyChange) {
        tracing::info!(
            previous = change.previous,
            current = change.current,
            "display topology changed"
        );

        let compliant = display::is_compliant(change.current);
        if !compliant && !self.blocking {
            self.enter_blocking(change.current);
        } else if compliant && self.blocking {
            self.resume_content();
        }
    }

    /// Navigate away from the remote content to the local blocking view.
    pub(in crate::shell) fn enter_blocking(&mut self, displays: usize) {
        // The navigation destroys any open quit prompt overlay, so its
        // reply will never arrive.
        self.quit_prompt_open = false;
        let Some(kw) = self.window.get() else { return };
        tracing::warn!(displays, "display requirements not met, blocking");
        if let Err(e) = kw.view.load_html(BLOCKING_PAGE) {
            tracing::error!("failed to load blocking view: {e}");
        }
        self.blocking = true;
        self.event_bus.publish(Event::BlockingEntered { displays });
    }

    /// The configuration is compliant again; reload the remote content.
    pub(in crate::shell) fn resume_content(&mut self) {
        self.quit_prompt_open = false;
        let Some(kw) = self.window.get() else { return };
        tracing::info!(url = %self.config.content.url, "display requirements met, resuming");
        if let Err(e) = kw.view.load_url(&self.config.content.url) {
            tracing::error!("failed to reload content: {e}");
            return;
        }
        self.blocking = false;
        self.event_bus.publish(Event::BlockingCleared);
    }

    /// Kick off the page client after a finished load of remote content:
    /// request capture with the configured constraints and retain the
    /// stream for the page's lifetime.
    pub(in crate::shell) fn start_page_client(&mut self) {
        let Some(kw) = self.window.get() else { return };
        let capture = &self.config.capture;
        let script = client::capture_setup_script(
            capture.sample_rate,
            capture.echo_cancellation,
            capture.noise_suppression,
        );
        if let Err(e) = kw.view.evaluate_script(&script) {
            tracing::warn!("failed to start page client: {e}");
        } else {
            tracing::debug!(
                sample_rate = capture.sample_rate,
                "page client capture setup injected"
            );
        }
    }
}

/// Pick the view's initial content. A non-compliant startup gets the
/// blocking page baked in at creation, so the remote URL is never
/// requested, not even transiently.
fn initial_view_config(config: &sentinel_config::SentinelConfig, compliant: bool) -> ViewConfig {
    let view_config = if compliant {
        ViewConfig::with_url(&config.content.url)
    } else {
        ViewConfig::with_html(BLOCKING_PAGE)
    };
    view_config.with_user_agent(&config.content.user_agent)
}

/// Decode a PNG window icon. Returns `None` (with a warning) for a
/// missing or undecodable file; the window is created without an icon.
fn load_window_icon(path: &Path) -> Option<Icon> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path = %path.display(), "window icon not readable: {e}");
            return None;
        }
    };

    let decoder = png::Decoder::new(file);
    let mut reader = match decoder.read_info() {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(path = %path.display(), "window icon not a valid PNG: {e}");
            return None;
        }
    };

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = match reader.next_frame(&mut buf) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!(path = %path.display(), "window icon decode failed: {e}");
            return None;
        }
    };

    if info.color_type != png::ColorType::Rgba || info.bit_depth != png::BitDepth::Eight {
        tracing::warn!(
            path = %path.display(),
            "window icon must be an 8-bit RGBA PNG"
        );
        return None;
    }

    buf.truncate(info.buffer_size());
    match Icon::from_rgba(buf, info.width, info.height) {
        Ok(icon) => Some(icon),
        Err(e) => {
            tracing::warn!(path = %path.display(), "window icon rejected: {e}");
            None
        }
    }
}
