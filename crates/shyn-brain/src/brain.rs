//! The conversation session manager.
//!
//! `Brain` owns exactly one configuration tuple (identity, mode,
//! personality, web-search flag) and exactly one live [`Session`] built from
//! it. Every configuration setter tears the session down and rebuilds it;
//! there is no partial-update path. Streaming, image generation, and memory
//! all degrade softly: no call here surfaces a provider or storage failure
//! as an error to the caller.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use shyn_common::{Citation, Identity, Message, Mode, PersonalityConfig};
use shyn_memory::MemoryStore;

use crate::prompt;
use crate::session::Session;
use crate::{GenerativeClient, StreamChunk};

/// In-band marker appended to the visible reply when the stream fails.
pub const LINK_ERROR_MARKER: &str =
    "\n[CRITICAL ERROR: Neural Link Disrupted. Re-establishing connection...]";

/// Canned status lines surfaced by the offline auto-pilot ticker.
const AUTO_PILOT_TASKS: [&str; 9] = [
    "Optimizing Postgres database indexes...",
    "Scanning for security vulnerabilities... Clean.",
    "Replying to 3 emails from 'Clients' folder...",
    "Backing up daily transaction logs...",
    "Updating workspace dependencies...",
    "Analyzing crypto market trends for Portfolio A...",
    "Cleaning up temporary cache files...",
    "Syncing calendar events...",
    "Compressing media assets...",
];

pub struct Brain {
    client: Arc<dyn GenerativeClient>,
    memory: MemoryStore,
    identity: Identity,
    mode: Mode,
    personality: PersonalityConfig,
    web_search: bool,
    session: Session,
}

impl Brain {
    /// Build a brain with the default configuration (SHYN, assistant mode),
    /// restoring any persisted personality from `memory`.
    pub fn new(client: Arc<dyn GenerativeClient>, memory: MemoryStore) -> Self {
        let personality = memory.load_personality();
        let identity = Identity::Shyn;
        let mode = Mode::Assistant;
        let web_search = false;

        let session = Session::new(
            prompt::system_prompt(identity, mode, &personality),
            personality.creativity,
            web_search,
            &[],
        );

        Self {
            client,
            memory,
            identity,
            mode,
            personality,
            web_search,
            session,
        }
    }

    /// Switch the active identity, forcing its default tone onto the
    /// personality config unconditionally. The rebuilt session is seeded
    /// with `history` so conversational context carries over.
    pub fn set_identity(&mut self, identity: Identity, history: &[Message]) {
        info!(%identity, "identity switched");
        self.identity = identity;
        self.personality.tone = identity.default_tone();
        self.rebuild_session(history);
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Switch the task-framing persona. The rebuilt session starts with an
    /// empty history.
    pub fn set_mode(&mut self, mode: Mode) {
        info!(%mode, "mode switched");
        self.mode = mode;
        self.rebuild_session(&[]);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Replace the personality config wholesale (creativity clamped into its
    /// valid range) and persist it. The rebuilt session starts with an empty
    /// history.
    pub fn set_personality(&mut self, config: PersonalityConfig) {
        let config = config.clamped();
        info!(
            tone = %config.tone,
            verbosity = %config.verbosity,
            creativity = config.creativity,
            "personality updated"
        );
        self.personality = config;
        if let Err(e) = self.memory.save_personality(&self.personality) {
            warn!("failed to persist personality: {e}");
        }
        self.rebuild_session(&[]);
    }

    pub fn personality(&self) -> PersonalityConfig {
        self.personality
    }

    /// Toggle the web-search capability. The rebuilt session is seeded with
    /// `history` to avoid context loss.
    pub fn set_web_search(&mut self, enabled: bool, history: &[Message]) {
        info!(enabled, "web search toggled");
        self.web_search = enabled;
        self.rebuild_session(history);
    }

    pub fn web_search_enabled(&self) -> bool {
        self.web_search
    }

    /// Send `text` as a user turn and stream the reply.
    ///
    /// `on_chunk` receives each text fragment together with the citations
    /// accumulated so far in this send (deduplicated by uri, never reset
    /// mid-stream; `None` until the first citation arrives). A provider
    /// failure is converted into an in-band [`LINK_ERROR_MARKER`] fragment;
    /// the call always returns the full visible reply text so the
    /// conversation stays usable.
    pub async fn send_message(
        &mut self,
        text: impl Into<String>,
        mut on_chunk: impl FnMut(&str, Option<&[Citation]>) + Send,
    ) -> String {
        let text = text.into();
        debug!(chars = text.len(), "sending user turn");
        self.session.push_user(&text);
        let request = self.session.request();

        let mut reply = String::new();
        let mut citations: Vec<Citation> = Vec::new();

        let result = {
            let mut forward = |chunk: StreamChunk| {
                for citation in chunk.citations {
                    if !citations.iter().any(|c| c.uri == citation.uri) {
                        citations.push(citation);
                    }
                }
                if !chunk.text.is_empty() {
                    reply.push_str(&chunk.text);
                    let sources = if citations.is_empty() {
                        None
                    } else {
                        Some(citations.as_slice())
                    };
                    on_chunk(&chunk.text, sources);
                }
            };
            self.client.stream_generate(&request, &mut forward).await
        };

        if let Err(e) = result {
            warn!("stream failed: {e}");
            reply.push_str(LINK_ERROR_MARKER);
            on_chunk(LINK_ERROR_MARKER, None);
        }

        // An empty model turn would put an empty text part in the next
        // request; skip it when the stream produced nothing.
        if !reply.is_empty() {
            self.session.push_model(&reply);
        }
        reply
    }

    /// Generate an image and return it as a data URI
    /// (`data:<mime>;base64,<payload>`), or `None` on any failure.
    pub async fn generate_image(&self, prompt: &str) -> Option<String> {
        debug!(prompt, "generating image");
        match self.client.generate_image(prompt).await {
            Ok(Some(image)) => Some(format!(
                "data:{};base64,{}",
                image.mime_type, image.data
            )),
            Ok(None) => {
                warn!("image response carried no inline data");
                None
            }
            Err(e) => {
                warn!("image generation failed: {e}");
                None
            }
        }
    }

    /// Persist the most recent 50 messages of `history`. Storage failures
    /// are logged and swallowed.
    pub fn save_memory(&self, history: &[Message]) {
        if let Err(e) = self.memory.save_transcript(history) {
            warn!("failed to save transcript: {e}");
        }
    }

    /// Load the persisted transcript (empty when absent or malformed). The
    /// single restore path for the visible transcript.
    pub fn restore_history(&self) -> Vec<Message> {
        self.memory.load_transcript()
    }

    /// A random sample of three canned background-task status lines, used by
    /// the offline auto-pilot ticker.
    pub fn auto_pilot_log_batch(&self) -> Vec<String> {
        let mut rng = rand::thread_rng();
        AUTO_PILOT_TASKS
            .choose_multiple(&mut rng, 3)
            .map(|task| task.to_string())
            .collect()
    }

    fn rebuild_session(&mut self, seed: &[Message]) {
        self.session = Session::new(
            prompt::system_prompt(self.identity, self.mode, &self.personality),
            self.personality.creativity,
            self.web_search,
            seed,
        );
        debug!(seed = seed.len(), "session rebuilt");
    }
}
