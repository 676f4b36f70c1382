//! WebView layer for the Sentinel kiosk shell.
//!
//! Wraps the `wry` crate to provide:
//! - The single full-window view hosting the remote content
//! - The privileged JS bridge (`window.sentinel`) exposing exactly
//!   capture and termination to the loaded page
//! - The host-side permission policy
//! - Page-client scripts (capture setup, quit prompt)

pub mod client;
pub mod events;
pub mod ipc;
pub mod permissions;
pub mod view;

pub use events::{PageLoadState, WebViewEvent};
pub use ipc::{BridgeMessage, CaptureRequest, CaptureResult, QuitConfirm};
pub use permissions::PermissionDecision;
pub use view::{ShellView, ViewConfig, ViewContent};
