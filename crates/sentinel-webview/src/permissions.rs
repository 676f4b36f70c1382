//! Host-side permission policy for the loaded content.
//!
//! A blanket allow/deny table keyed by capability name, stable for the
//! lifetime of the process. There is no per-origin or per-session
//! dimension and no user prompting: media capture is always granted,
//! everything else is always denied.

/// Capability names that are granted unconditionally.
const GRANTED_CAPABILITIES: &[&str] = &["media", "microphone", "audio"];

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Grant,
    Deny,
}

impl PermissionDecision {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Grant)
    }
}

/// Decide a single capability request. Invoked for every capability a
/// capture request implies, and for any other permission check the
/// platform surfaces.
pub fn decide(capability: &str) -> PermissionDecision {
    if GRANTED_CAPABILITIES.contains(&capability) {
        PermissionDecision::Grant
    } else {
        PermissionDecision::Deny
    }
}

/// Derive the capability names a set of getUserMedia constraints implies.
///
/// A present, non-false `video` key asks for "media"; a present, non-false
/// `audio` key asks for "microphone". Empty or falsy constraints imply
/// nothing.
pub fn capabilities_for_constraints(constraints: &serde_json::Value) -> Vec<&'static str> {
    let mut capabilities = Vec::new();
    if constraint_requested(constraints.get("video")) {
        capabilities.push("media");
    }
    if constraint_requested(constraints.get("audio")) {
        capabilities.push("microphone");
    }
    capabilities
}

fn constraint_requested(value: Option<&serde_json::Value>) -> bool {
    match value {
        None => false,
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::Null) => false,
        // Constraint objects (e.g. {sampleRate: 44100}) count as requested
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_capabilities_grant() {
        assert_eq!(decide("media"), PermissionDecision::Grant);
        assert_eq!(decide("microphone"), PermissionDecision::Grant);
        assert_eq!(decide("audio"), PermissionDecision::Grant);
    }

    #[test]
    fn everything_else_denies() {
        assert_eq!(decide("geolocation"), PermissionDecision::Deny);
        assert_eq!(decide("notifications"), PermissionDecision::Deny);
        assert_eq!(decide("clipboard"), PermissionDecision::Deny);
        assert_eq!(decide("camera-pan-tilt-zoom"), PermissionDecision::Deny);
        assert_eq!(decide(""), PermissionDecision::Deny);
    }

    #[test]
    fn decision_is_case_sensitive() {
        assert_eq!(decide("Media"), PermissionDecision::Deny);
        assert_eq!(decide("MICROPHONE"), PermissionDecision::Deny);
    }

    #[test]
    fn is_granted_helper() {
        assert!(PermissionDecision::Grant.is_granted());
        assert!(!PermissionDecision::Deny.is_granted());
    }

    #[test]
    fn constraints_audio_and_video() {
        let constraints = json!({
            "video": true,
            "audio": { "echoCancellation": true, "sampleRate": 44100 }
        });
        assert_eq!(
            capabilities_for_constraints(&constraints),
            vec!["media", "microphone"]
        );
    }

    #[test]
    fn constraints_video_only() {
        let constraints = json!({ "video": true });
        assert_eq!(capabilities_for_constraints(&constraints), vec!["media"]);
    }

    #[test]
    fn constraints_audio_only() {
        let constraints = json!({ "audio": true, "video": false });
        assert_eq!(
            capabilities_for_constraints(&constraints),
            vec!["microphone"]
        );
    }

    #[test]
    fn constraints_empty_imply_nothing() {
        assert!(capabilities_for_constraints(&json!({})).is_empty());
        assert!(capabilities_for_constraints(&json!(null)).is_empty());
        assert!(
            capabilities_for_constraints(&json!({"video": false, "audio": null})).is_empty()
        );
    }

    #[test]
    fn every_derived_capability_is_granted_by_policy() {
        let constraints = json!({ "video": true, "audio": true });
        for capability in capabilities_for_constraints(&constraints) {
            assert!(decide(capability).is_granted());
        }
    }
}
