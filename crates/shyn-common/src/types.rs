use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::new_id;

/// Who authored a message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A grounding citation attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// One entry in the conversation transcript.
///
/// Field names are camelCase on the wire so snapshots stay readable by the
/// dashboard layer, which persists the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Citation>>,
}

fn is_false(b: &bool) -> bool {
    !b
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
            is_streaming: false,
            sources: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }
}

/// Task-framing persona. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Assistant,
    Researcher,
    Creator,
    Coder,
    OfflineAutoPilot,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Assistant => "assistant",
            Mode::Researcher => "researcher",
            Mode::Creator => "creator",
            Mode::Coder => "coder",
            Mode::OfflineAutoPilot => "offline_auto_pilot",
        };
        write!(f, "{name}")
    }
}

/// Voice/persona overlay. Switching identities forces the identity's
/// default tone onto the personality config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Identity {
    Shyn,
    Jarvis,
}

impl Identity {
    /// The tone an identity switch forces, unconditionally.
    pub fn default_tone(&self) -> Tone {
        match self {
            Identity::Shyn => Tone::Friendly,
            Identity::Jarvis => Tone::Robotic,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Identity::Shyn => "SHYN",
            Identity::Jarvis => "JARVIS",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Friendly,
    Humorous,
    Robotic,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
            Tone::Humorous => "humorous",
            Tone::Robotic => "robotic",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Concise,
    Balanced,
    Verbose,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Concise => "concise",
            Verbosity::Balanced => "balanced",
            Verbosity::Verbose => "verbose",
        };
        write!(f, "{name}")
    }
}

/// User-tunable personality settings. `creativity` is passed through as the
/// sampling temperature and is kept within [0.1, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityConfig {
    pub tone: Tone,
    pub verbosity: Verbosity,
    pub creativity: f64,
}

impl PersonalityConfig {
    pub const CREATIVITY_MIN: f64 = 0.1;
    pub const CREATIVITY_MAX: f64 = 1.0;

    /// Return a copy with creativity clamped into its valid range.
    pub fn clamped(mut self) -> Self {
        self.creativity = self
            .creativity
            .clamp(Self::CREATIVITY_MIN, Self::CREATIVITY_MAX);
        self
    }
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            tone: Tone::Friendly,
            verbosity: Verbosity::Balanced,
            creativity: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_camel_case() {
        let mut msg = Message::user("hello");
        msg.is_streaming = true;
        msg.sources = Some(vec![Citation {
            title: "Example".into(),
            uri: "https://example.com".into(),
        }]);

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["isStreaming"], true);
        assert_eq!(json["sources"][0]["uri"], "https://example.com");
        // Timestamp is a string on the wire.
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn message_round_trips_timestamp() {
        let msg = Message::model("ack");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp, msg.timestamp);
        assert_eq!(back, msg);
    }

    #[test]
    fn message_defaults_optional_fields() {
        let json = r#"{
            "id": "m1",
            "role": "model",
            "text": "hi",
            "timestamp": "2025-01-05T10:00:00Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(!msg.is_streaming);
        assert!(msg.sources.is_none());
    }

    #[test]
    fn mode_serde_snake_case() {
        let json = serde_json::to_string(&Mode::OfflineAutoPilot).unwrap();
        assert_eq!(json, "\"offline_auto_pilot\"");
        let mode: Mode = serde_json::from_str("\"researcher\"").unwrap();
        assert_eq!(mode, Mode::Researcher);
    }

    #[test]
    fn identity_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Identity::Shyn).unwrap(), "\"SHYN\"");
        let id: Identity = serde_json::from_str("\"JARVIS\"").unwrap();
        assert_eq!(id, Identity::Jarvis);
    }

    #[test]
    fn identity_default_tones() {
        assert_eq!(Identity::Shyn.default_tone(), Tone::Friendly);
        assert_eq!(Identity::Jarvis.default_tone(), Tone::Robotic);
    }

    #[test]
    fn personality_default() {
        let p = PersonalityConfig::default();
        assert_eq!(p.tone, Tone::Friendly);
        assert_eq!(p.verbosity, Verbosity::Balanced);
        assert!((p.creativity - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn personality_clamps_creativity() {
        let p = PersonalityConfig {
            creativity: 7.5,
            ..Default::default()
        };
        assert!((p.clamped().creativity - 1.0).abs() < f64::EPSILON);

        let p = PersonalityConfig {
            creativity: -0.3,
            ..Default::default()
        };
        assert!((p.clamped().creativity - 0.1).abs() < f64::EPSILON);
    }
}
