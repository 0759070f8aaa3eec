pub mod errors;
pub mod id;
pub mod types;

pub use errors::{BrainError, MemoryError};
pub use id::new_id;
pub use types::{
    Citation, Identity, Message, Mode, PersonalityConfig, Role, Tone, Verbosity,
};
