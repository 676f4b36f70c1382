//! Page-client scripts injected into the loaded remote content.
//!
//! Two pieces of in-page logic live host-side as script generators:
//! the capture setup that runs after every finished page load, and the
//! modal quit prompt shown when the user tries to close the window.

/// Window global holding the acquired stream so the browser keeps the
/// hardware capture session alive for the lifetime of the page.
pub const RETAINED_STREAM_GLOBAL: &str = "__sentinelStream";

/// Build the capture-setup script for the page client.
///
/// On execution it requests combined audio+video capture through the
/// bridge, retains the returned stream on a window global, and reports
/// the outcome back over IPC. Failures are reported, never retried.
pub fn capture_setup_script(
    sample_rate: u32,
    echo_cancellation: bool,
    noise_suppression: bool,
) -> String {
    format!(
        r#"
(function () {{
    window.sentinel.requestCapture({{
        video: true,
        audio: {{
            echoCancellation: {echo_cancellation},
            noiseSuppression: {noise_suppression},
            sampleRate: {sample_rate}
        }}
    }}).then(function (stream) {{
        window.{RETAINED_STREAM_GLOBAL} = stream;
        window.ipc.postMessage(JSON.stringify({{
            kind: 'capture_result',
            payload: {{
                ok: true,
                tracks: stream.getTracks().map(function (t) {{ return t.kind; }})
            }}
        }}));
    }}).catch(function (err) {{
        window.ipc.postMessage(JSON.stringify({{
            kind: 'capture_result',
            payload: {{ ok: false, error: String(err) }}
        }}));
    }});
}})();
"#
    )
}

/// Build the quit-prompt overlay script.
///
/// Injects a modal yes/no overlay into the current document. Either
/// button posts a single `quit_confirm` reply and removes the overlay;
/// re-injection while the overlay is up is a no-op.
pub fn quit_prompt_script(message: &str, yes_label: &str, no_label: &str) -> String {
    let message_json = js_string(message);
    let yes_json = js_string(yes_label);
    let no_json = js_string(no_label);
    format!(
        r#"
(function () {{
    if (document.getElementById('sentinel-quit-prompt')) {{ return; }}
    var overlay = document.createElement('div');
    overlay.id = 'sentinel-quit-prompt';
    overlay.style.cssText = 'position:fixed;inset:0;z-index:2147483647;' +
        'background:rgba(0,0,0,0.6);display:flex;align-items:center;justify-content:center;';
    var box = document.createElement('div');
    box.style.cssText = 'background:#fff;color:#111;padding:24px 32px;border-radius:8px;' +
        'font:15px system-ui,sans-serif;text-align:center;max-width:360px;';
    var text = document.createElement('p');
    text.textContent = {message_json};
    var buttons = document.createElement('div');
    buttons.style.cssText = 'margin-top:16px;display:flex;gap:12px;justify-content:center;';
    function answer(confirmed) {{
        overlay.remove();
        window.ipc.postMessage(JSON.stringify({{
            kind: 'quit_confirm',
            payload: {{ confirmed: confirmed }}
        }}));
    }}
    var yes = document.createElement('button');
    yes.textContent = {yes_json};
    yes.onclick = function () {{ answer(true); }};
    var no = document.createElement('button');
    no.textContent = {no_json};
    no.onclick = function () {{ answer(false); }};
    buttons.appendChild(yes);
    buttons.appendChild(no);
    box.appendChild(text);
    box.appendChild(buttons);
    overlay.appendChild(box);
    document.body.appendChild(overlay);
}})();
"#
    )
}

/// JSON-encode a string for safe embedding in generated JavaScript.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
