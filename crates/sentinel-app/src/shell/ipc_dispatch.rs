//! IPC message validation and dispatch from the loaded page.

use sentinel_common::events::Event;
use sentinel_webview::ipc::{
    js_capture_response, BridgeMessage, CaptureRequest, CaptureResult, QuitConfirm,
};
use sentinel_webview::permissions;

use super::SentinelShell;

// =============================================================================
// IPC ALLOWLIST
// =============================================================================

/// Allowed IPC message kinds from the page.
///
/// Any message with a `kind` not in this list is rejected and logged.
/// These four kinds are the entire page-to-host surface.
const ALLOWED_IPC_KINDS: &[&str] = &[
    "capture_request",
    "capture_result",
    "quit_confirm",
    "terminate",
];

/// Check whether an IPC message kind is in the allowlist.
pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

// =============================================================================
// DISPATCH
// =============================================================================

impl SentinelShell {
    /// Handle a single IPC message from the page.
    pub(in crate::shell) fn handle_ipc_message(&mut self, body: &str) {
        let msg = match BridgeMessage::from_json(body) {
            Some(m) => m,
            None => {
                tracing::warn!(body_len = body.len(), "IPC message rejected: failed to parse");
                return;
            }
        };

        if !is_ipc_kind_allowed(&msg.kind) {
            tracing::warn!(kind = %msg.kind, "IPC message rejected: unknown kind");
            return;
        }

        tracing::debug!(kind = %msg.kind, "IPC message dispatched");

        match msg.kind.as_str() {
            "capture_request" => {
                self.handle_capture_request(&msg);
            }
            "capture_result" => {
                self.handle_capture_result(&msg);
            }
            "quit_confirm" => {
                let Some(reply) = msg.payload_as::<QuitConfirm>() else {
                    tracing::warn!("quit_confirm with malformed payload");
                    return;
                };
                self.handle_quit_confirm(reply.confirmed);
            }
            "terminate" => {
                self.handle_termination_request();
            }
            _ => {
                // Shouldn't happen — allowlist checked above
                tracing::warn!(kind = %msg.kind, "unhandled IPC kind");
            }
        }
    }

    /// A capture request from the bridge. The permission policy decides
    /// every capability the constraints imply; the reply resolves the
    /// pending promise in the page context.
    fn handle_capture_request(&mut self, msg: &BridgeMessage) {
        let Some(request) = msg.payload_as::<CaptureRequest>() else {
            tracing::warn!("capture_request with malformed payload");
            return;
        };

        let capabilities = permissions::capabilities_for_constraints(&request.constraints);
        let denied: Vec<&str> = capabilities
            .iter()
            .copied()
            .filter(|c| !permissions::decide(c).is_granted())
            .collect();

        let response = if denied.is_empty() {
            for capability in &capabilities {
                tracing::info!(capability, "granting permission");
            }
            js_capture_response(request.id, true, None)
        } else {
            let reason = format!("capability denied: {}", denied.join(", "));
            tracing::info!(denied = ?denied, "denying capture request");
            js_capture_response(request.id, false, Some(&reason))
        };

        if let Some(kw) = self.window.get() {
            if let Err(e) = kw.view.evaluate_script(&response) {
                tracing::warn!(id = request.id, "failed to resolve capture request: {e}");
            }
        }
    }

    /// Outcome report from the page client. Logged and published; the
    /// shell takes no corrective action on failure.
    fn handle_capture_result(&mut self, msg: &BridgeMessage) {
        let Some(result) = msg.payload_as::<CaptureResult>() else {
            tracing::warn!("capture_result with malformed payload");
            return;
        };

        if result.ok {
            tracing::info!(tracks = ?result.tracks, "capture stream acquired");
            self.event_bus.publish(Event::CaptureStarted {
                tracks: result.tracks,
            });
        } else {
            let reason = result.error.unwrap_or_else(|| "unknown".into());
            tracing::warn!(reason = %reason, "capture failed");
            self.event_bus.publish(Event::CaptureFailed { reason });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
