//! IPC protocol between the loaded page and the host.
//!
//! Messages flow in both directions:
//! - **Page -> Host**: the bridge calls `window.ipc.postMessage(JSON.stringify({...}))`,
//!   which triggers the `ipc_handler` registered on the WebView.
//! - **Host -> Page**: the host calls `webview.evaluate_script("...")` to
//!   resolve a pending bridge request in the page context.

use serde::{Deserialize, Serialize};

/// A typed IPC message from the loaded page to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// The message kind / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON, defaults to null).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl BridgeMessage {
    /// Parse a bridge message from a raw JSON string (from postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Parse the payload into a concrete type.
    pub fn payload_as<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.payload.clone()).ok()
    }
}

/// Payload of a `capture_request` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Request id allocated by the page-side bridge; echoed back in the
    /// single-resolution response.
    pub id: u64,
    /// User-supplied getUserMedia constraints, passed through untouched.
    #[serde(default)]
    pub constraints: serde_json::Value,
}

/// Payload of a `capture_result` report from the page client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResult {
    pub ok: bool,
    /// Track kinds of the acquired stream (e.g. ["audio", "video"]).
    #[serde(default)]
    pub tracks: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of a `quit_confirm` reply from the quit prompt overlay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuitConfirm {
    pub confirmed: bool,
}

/// JavaScript injected into every document before any page script runs.
///
/// Installs `window.sentinel` with exactly two operations and suppresses
/// the native context menu. Capture requests suspend on a pending-map
/// promise until the host resolves them via [`js_capture_response`].
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function () {
    if (window.sentinel) { return; }
    var pending = {};
    var nextId = 1;
    window.sentinel = {
        requestCapture: function (constraints) {
            return new Promise(function (resolve, reject) {
                var id = nextId++;
                pending[id] = { resolve: resolve, reject: reject, constraints: constraints || {} };
                window.ipc.postMessage(JSON.stringify({
                    kind: 'capture_request',
                    payload: { id: id, constraints: constraints || {} }
                }));
            });
        },
        requestTermination: function () {
            window.ipc.postMessage(JSON.stringify({ kind: 'terminate', payload: null }));
        },
        _resolveCapture: function (id, granted, reason) {
            var entry = pending[id];
            if (!entry) { return; }
            delete pending[id];
            if (!granted) {
                entry.reject(new Error(reason || 'capture denied'));
                return;
            }
            navigator.mediaDevices.getUserMedia(entry.constraints)
                .then(entry.resolve, entry.reject);
        }
    };
    window.addEventListener('contextmenu', function (e) {
        e.preventDefault();
    }, true);
})();
"#;

/// Generate the script that resolves a pending capture request in the page.
///
/// Granted requests go on to run the platform capture in the page context;
/// denials reject the pending promise with the given reason.
pub fn js_capture_response(id: u64, granted: bool, reason: Option<&str>) -> String {
    let reason_json =
        serde_json::to_string(&reason).unwrap_or_else(|_| "null".to_string());
    format!("window.sentinel._resolveCapture({id}, {granted}, {reason_json});")
}
