//! The two termination paths.
//!
//! User-initiated close goes through the confirm prompt; the page's
//! `requestTermination` never does.

use sentinel_common::events::Event;
use sentinel_webview::client;

use super::SentinelShell;

impl SentinelShell {
    /// Intercept a close request: put up the in-page yes/no prompt and
    /// wait for its single `quit_confirm` reply. The prompt is
    /// asynchronous; display and IPC events keep flowing while it is up.
    pub(in crate::shell) fn open_quit_prompt(&mut self) {
        if self.quit_prompt_open {
            return;
        }
        let Some(kw) = self.window.get() else { return };

        let prompt = &self.config.quit_prompt;
        let script =
            client::quit_prompt_script(&prompt.message, &prompt.yes_label, &prompt.no_label);
        match kw.view.evaluate_script(&script) {
            Ok(()) => {
                kw.window.focus_window();
                self.quit_prompt_open = true;
            }
            Err(e) => {
                // The window stays open; the user can try again.
                tracing::error!("failed to show quit prompt: {e}");
            }
        }
    }

    /// Single resolution of the quit prompt. Yes destroys the window and
    /// ends the process; No leaves the window open and unchanged.
    pub(in crate::shell) fn handle_quit_confirm(&mut self, confirmed: bool) {
        if !self.quit_prompt_open {
            tracing::warn!("quit_confirm with no prompt open, ignoring");
            return;
        }
        self.quit_prompt_open = false;

        if confirmed {
            tracing::info!("quit confirmed, shutting down");
            self.event_bus.publish(Event::Shutdown);
            self.window.destroy();
            self.should_exit = true;
        } else {
            tracing::info!("quit cancelled");
        }
    }

    /// Immediate termination requested by the page through the bridge.
    /// No confirmation, distinct from the close-button path.
    pub(in crate::shell) fn handle_termination_request(&mut self) {
        tracing::info!("termination requested by page");
        self.event_bus.publish(Event::TerminationRequested);
        self.event_bus.publish(Event::Shutdown);
        self.window.destroy();
        self.should_exit = true;
    }
}
