//! The live conversation session.
//!
//! A `Session` is the brain's handle to one configured conversation: the
//! assembled system prompt, the sampling temperature, the web-search flag,
//! and the provider-shaped history. It is never partially updated; any
//! configuration change tears it down and a fresh one is seeded with
//! whatever transcript the caller wants to carry over.

use shyn_common::{Message, Role};

use crate::{GenerateRequest, Turn};

pub struct Session {
    system_prompt: String,
    temperature: f64,
    web_search: bool,
    turns: Vec<Turn>,
}

impl Session {
    /// Build a session seeded with an existing transcript.
    pub fn new(
        system_prompt: impl Into<String>,
        temperature: f64,
        web_search: bool,
        seed: &[Message],
    ) -> Self {
        let turns = seed
            .iter()
            .map(|msg| Turn {
                role: msg.role,
                text: msg.text.clone(),
            })
            .collect();
        Self {
            system_prompt: system_prompt.into(),
            temperature,
            web_search,
            turns,
        }
    }

    /// Append a user turn to the history.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            text: text.into(),
        });
    }

    /// Append a model turn to the history.
    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::Model,
            text: text.into(),
        });
    }

    /// Snapshot the session into a provider request.
    pub fn request(&self) -> GenerateRequest {
        GenerateRequest {
            system_prompt: self.system_prompt.clone(),
            turns: self.turns.clone(),
            temperature: self.temperature,
            web_search: self.web_search,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn web_search(&self) -> bool {
        self.web_search
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_history_from_transcript() {
        let transcript = vec![Message::user("hi"), Message::model("hello")];
        let session = Session::new("prompt", 0.7, false, &transcript);

        assert_eq!(session.turn_count(), 2);
        let request = session.request();
        assert_eq!(request.turns[0].role, Role::User);
        assert_eq!(request.turns[0].text, "hi");
        assert_eq!(request.turns[1].role, Role::Model);
        assert_eq!(request.turns[1].text, "hello");
    }

    #[test]
    fn pushed_turns_appear_in_request() {
        let mut session = Session::new("prompt", 0.5, true, &[]);
        session.push_user("question");
        session.push_model("answer");

        let request = session.request();
        assert_eq!(request.system_prompt, "prompt");
        assert!((request.temperature - 0.5).abs() < f64::EPSILON);
        assert!(request.web_search);
        assert_eq!(request.turns.len(), 2);
        assert_eq!(request.turns[1].text, "answer");
    }

    #[test]
    fn empty_seed_starts_blank() {
        let session = Session::new("p", 0.7, false, &[]);
        assert_eq!(session.turn_count(), 0);
        assert!(session.request().turns.is_empty());
    }
}
