//! Top-level shell controller.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: the single kiosk window, the display compliance gate, the
//! quit-confirmation flow, and dispatch of bridge IPC from the page.

mod display;
mod ipc_dispatch;
mod lifecycle;
mod quit;
mod registry;

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use sentinel_common::events::{Event, EventBus};
use sentinel_config::SentinelConfig;
use sentinel_webview::{PageLoadState, ShellView, WebViewEvent};

use display::DisplayWatcher;
use registry::SingleSlot;

/// How often `about_to_wait` wakes to drain view events.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How often the display topology is sampled for changes.
const DISPLAY_CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// The one allowed window and its full-window view.
///
/// Field order matters: the view holds a platform child of the window
/// and must drop first.
struct KioskWindow {
    view: ShellView,
    window: Arc<Window>,
}

/// Top-level shell state.
pub struct SentinelShell {
    config: SentinelConfig,
    event_bus: EventBus,

    // The single-instance window registry
    window: SingleSlot<KioskWindow>,

    // Edge-triggered display topology watcher
    displays: DisplayWatcher,

    // Whether the quit prompt is currently up
    quit_prompt_open: bool,

    // Whether the blocking "requirements not met" view is shown
    blocking: bool,

    // Whether the app should exit
    should_exit: bool,
}

impl SentinelShell {
    pub fn new(config: SentinelConfig) -> Self {
        Self {
            config,
            event_bus: EventBus::new(64),
            window: SingleSlot::empty(),
            displays: DisplayWatcher::new(DISPLAY_CHECK_INTERVAL),
            quit_prompt_open: false,
            blocking: false,
            should_exit: false,
        }
    }

    /// Process pending view events (IPC messages, page loads).
    fn poll_view_events(&mut self) {
        let events: Vec<WebViewEvent> = match self.window.get() {
            Some(kw) => kw.view.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::IpcMessage { body } => {
                    self.handle_ipc_message(&body);
                }
                WebViewEvent::PageLoad { state, url } => {
                    self.handle_page_load(state, &url);
                }
            }
        }
    }

    fn handle_page_load(&mut self, state: PageLoadState, url: &str) {
        tracing::debug!(?state, url = %url, "page load event");

        // A navigation replaces the document, taking any quit prompt
        // overlay with it. Its reply will never arrive.
        if state == PageLoadState::Started && self.quit_prompt_open {
            tracing::debug!("navigation dismissed the quit prompt");
            self.quit_prompt_open = false;
        }

        if state == PageLoadState::Finished && !self.blocking {
            self.start_page_client();
        }
    }

    /// The window went away outside the confirmed-quit path (platform
    /// kill, forced close). Null out the registry and allow re-creation
    /// on the next activation.
    fn handle_window_destroyed(&mut self) {
        if self.window.destroy().is_some() {
            tracing::warn!("window destroyed outside the quit flow");
        }
        self.quit_prompt_open = false;
        self.blocking = false;
        self.displays.reset();

        // Dock-persistence platforms stay resident until reactivated;
        // everywhere else the last window closing ends the process.
        if !cfg!(target_os = "macos") {
            self.event_bus.publish(Event::Shutdown);
            self.should_exit = true;
        }
    }
}

impl ApplicationHandler for SentinelShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_present() {
            return;
        }
        self.start_or_activate(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested, confirming");
                self.open_quit_prompt();
            }

            WindowEvent::Destroyed => {
                if self.should_exit {
                    event_loop.exit();
                } else {
                    self.handle_window_destroyed();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }

        self.poll_view_events();
        if self.should_exit {
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        if self.window.is_present() && self.displays.due(now) {
            let count = event_loop.available_monitors().count();
            if let Some(change) = self.displays.observe(now, count) {
                self.handle_topology_change(change);
            }
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            now + EVENT_POLL_INTERVAL,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> SentinelShell {
        SentinelShell::new(SentinelConfig::default())
    }

    #[test]
    fn termination_request_needs_no_confirmation() {
        let mut s = shell();
        s.handle_termination_request();
        assert!(s.should_exit);
        assert!(!s.quit_prompt_open);
    }

    #[test]
    fn terminate_ipc_exits_immediately() {
        let mut s = shell();
        s.handle_ipc_message(r#"{"kind":"terminate"}"#);
        assert!(s.should_exit);
    }

    #[test]
    fn quit_confirm_yes_exits() {
        let mut s = shell();
        s.quit_prompt_open = true;
        s.handle_quit_confirm(true);
        assert!(s.should_exit);
        assert!(!s.quit_prompt_open);
    }

    #[test]
    fn quit_confirm_no_keeps_window_open() {
        let mut s = shell();
        s.quit_prompt_open = true;
        s.handle_ipc_message(r#"{"kind":"quit_confirm","payload":{"confirmed":false}}"#);
        assert!(!s.should_exit);
        assert!(!s.quit_prompt_open);
    }

    #[test]
    fn stray_quit_confirm_is_ignored() {
        let mut s = shell();
        s.handle_ipc_message(r#"{"kind":"quit_confirm","payload":{"confirmed":true}}"#);
        assert!(!s.should_exit);
    }

    #[test]
    fn unknown_ipc_kinds_do_nothing() {
        let mut s = shell();
        s.handle_ipc_message(r#"{"kind":"open_devtools","payload":null}"#);
        s.handle_ipc_message("not json at all");
        assert!(!s.should_exit);
        assert!(!s.quit_prompt_open);
    }

    #[test]
    fn navigation_dismisses_stale_quit_prompt() {
        let mut s = shell();
        s.quit_prompt_open = true;
        s.handle_page_load(PageLoadState::Started, "about:blank");
        assert!(!s.quit_prompt_open);

        // The close button works again: a fresh prompt can be confirmed
        s.quit_prompt_open = true;
        s.handle_quit_confirm(true);
        assert!(s.should_exit);
    }

    #[test]
    fn entering_blocking_dismisses_quit_prompt() {
        let mut s = shell();
        s.quit_prompt_open = true;
        s.enter_blocking(2);
        assert!(!s.quit_prompt_open);
    }

    #[test]
    fn resuming_content_dismisses_quit_prompt() {
        let mut s = shell();
        s.quit_prompt_open = true;
        s.resume_content();
        assert!(!s.quit_prompt_open);
    }

    #[test]
    fn capture_request_without_window_does_not_panic() {
        let mut s = shell();
        s.handle_ipc_message(
            r#"{"kind":"capture_request","payload":{"id":1,"constraints":{"video":true}}}"#,
        );
        assert!(!s.should_exit);
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn window_loss_ends_process() {
        let mut s = shell();
        s.handle_window_destroyed();
        assert!(s.should_exit);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn window_loss_keeps_process_resident() {
        let mut s = shell();
        s.handle_window_destroyed();
        assert!(!s.should_exit);
    }
}
