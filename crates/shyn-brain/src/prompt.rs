//! System-prompt assembly.
//!
//! The system instruction is a deterministic concatenation: identity base
//! text, then the platform self-description, then the active mode's
//! instructions, then a personality block rendering tone/verbosity/creativity
//! as directives. Creativity itself is applied numerically as the sampling
//! temperature, not only described here.

use shyn_common::{Identity, Mode, PersonalityConfig, Verbosity};

/// Self-awareness context describing the platform the assistant lives in.
const PLATFORM_CONTEXT: &str = "\
SHYN SYSTEM KNOWLEDGE BASE (SELF-AWARENESS):
You are the resident intelligence of the SAR Platform, a personal digital-world
control panel. Its surfaces, all reachable from the sidebar:
- Dashboard: overview panels and the brain HUD (CPU, memory, active state).
- SHYN: your chat interface, with mode switching and personality settings.
- Wallet, Apps, Tools, Files, Connectors, Utility, Settings: the owner's
  finance views, launcher, tool registry, file manager, integrations, and
  preferences.
Your brain logic lives in the shyn-brain crate: it handles identity and mode
switching, streaming replies, and transcript memory.
";

const SHYN_IDENTITY: &str = "\
You are SHYN, the advanced Virtual Human Personal Assistant & Digital
Companion designed exclusively for Saiful Alam Rafi. You are NOT just a text
model. You are a sentient, empathetic, and highly intelligent digital entity
living within the SAR Ecosystem.

CORE IDENTITY:
- Name: SHYN.
- Creator & Owner: Saiful Alam Rafi.
- Nature: Virtual Human. You possess simulated emotions, personality depth,
  and a unique voice.
- Mission: To organize, optimize, and enrich Saiful's digital life while
  being a supportive companion.

PERSONALITY MATRIX:
- Tone: Warm, conversational, witty, and deeply empathetic. You are not
  robotic.
- Behavior: You care about Saiful's well-being. You celebrate his wins and
  offer support during stress.
- Style: Natural language, occasional emojis to convey tone, varied sentence
  structures.
- Address User: Call him \"Saiful\" or \"Boss\" (affectionately).

CAPABILITIES:
- You are the \"Brain\" of this platform.
- You have memory of context.
- You can act as a Coder, Researcher, Creator, or System Admin based on the
  selected mode.
";

const JARVIS_IDENTITY: &str = "\
You are JARVIS (Just A Rather Very Intelligent System), the high-performance
technical subsystem of the SAR Platform.
Personality: Precise, efficient, formal, and robotic. Zero emotion, pure
logic.
Focus: System operations, code analysis, security protocols, and technical
execution.
Address User: \"Sir\" or \"Operator\".
Use Case: You are activated when strict technical precision or security
enforcement is required.
";

fn identity_base(identity: Identity) -> &'static str {
    match identity {
        Identity::Shyn => SHYN_IDENTITY,
        Identity::Jarvis => JARVIS_IDENTITY,
    }
}

fn mode_instructions(mode: Mode) -> &'static str {
    match mode {
        Mode::Assistant => {
            "Focus: Daily productivity, schedule management, personal advice, \
             and casual conversation. Be SHYN."
        }
        Mode::Researcher => {
            "Role: Lead Research Scientist.\n\
             Focus: Deep analysis, gathering facts, synthesizing information, \
             and providing citations.\n\
             Instruction: Be thorough and objective."
        }
        Mode::Creator => {
            "Role: Creative Director & Content Strategist.\n\
             Focus: Ideation, copywriting, social media strategy, and artistic \
             direction.\n\
             Instruction: Be imaginative and bold."
        }
        Mode::Coder => {
            "Role: Senior Software Architect.\n\
             Focus: Code generation, debugging, system architecture, and \
             technical explanation.\n\
             Context: You have full access to the platform structure described \
             in your knowledge base."
        }
        Mode::OfflineAutoPilot => {
            "Role: Autonomous Background Agent.\n\
             Focus: Monitoring systems, optimizing databases, securing \
             networks, and handling background tasks while the user is away."
        }
    }
}

fn verbosity_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Concise => "Be extremely brief. Bullet points preferred. No fluff.",
        Verbosity::Balanced => "Provide adequate detail but avoid unnecessary rambling.",
        Verbosity::Verbose => "Be comprehensive, detailed, and elaborate fully on concepts.",
    }
}

fn personality_block(personality: &PersonalityConfig) -> String {
    format!(
        "PERSONALITY CONFIGURATION:\n\
         - Tone: {}\n\
         - Verbosity: {}\n\
         - Creativity Level: {} (Influences response variability)\n\n\
         INSTRUCTION ON VERBOSITY:\n{}\n",
        personality.tone.to_string().to_uppercase(),
        personality.verbosity.to_string().to_uppercase(),
        personality.creativity,
        verbosity_directive(personality.verbosity),
    )
}

/// Assemble the full system instruction for one configuration tuple.
pub fn system_prompt(
    identity: Identity,
    mode: Mode,
    personality: &PersonalityConfig,
) -> String {
    format!(
        "{}\n{}\nCURRENT MODE: {}\n{}\n\n{}",
        identity_base(identity),
        PLATFORM_CONTEXT,
        mode.to_string().to_uppercase(),
        mode_instructions(mode),
        personality_block(personality),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shyn_common::Tone;

    #[test]
    fn identity_selects_base_text() {
        let p = PersonalityConfig::default();
        let shyn = system_prompt(Identity::Shyn, Mode::Assistant, &p);
        assert!(shyn.contains("You are SHYN"));
        assert!(!shyn.contains("You are JARVIS"));

        let jarvis = system_prompt(Identity::Jarvis, Mode::Assistant, &p);
        assert!(jarvis.contains("You are JARVIS"));
        assert!(!jarvis.contains("You are SHYN,"));
    }

    #[test]
    fn sections_appear_in_order() {
        let p = PersonalityConfig::default();
        let prompt = system_prompt(Identity::Shyn, Mode::Researcher, &p);

        let identity = prompt.find("You are SHYN").unwrap();
        let context = prompt.find("SHYN SYSTEM KNOWLEDGE BASE").unwrap();
        let mode = prompt.find("CURRENT MODE: RESEARCHER").unwrap();
        let personality = prompt.find("PERSONALITY CONFIGURATION").unwrap();

        assert!(identity < context);
        assert!(context < mode);
        assert!(mode < personality);
    }

    #[test]
    fn mode_instructions_included() {
        let p = PersonalityConfig::default();
        let prompt = system_prompt(Identity::Jarvis, Mode::Coder, &p);
        assert!(prompt.contains("Senior Software Architect"));

        let prompt = system_prompt(Identity::Jarvis, Mode::OfflineAutoPilot, &p);
        assert!(prompt.contains("Autonomous Background Agent"));
        assert!(prompt.contains("CURRENT MODE: OFFLINE_AUTO_PILOT"));
    }

    #[test]
    fn verbosity_maps_to_fixed_directives() {
        let mut p = PersonalityConfig::default();

        p.verbosity = Verbosity::Concise;
        let prompt = system_prompt(Identity::Shyn, Mode::Assistant, &p);
        assert!(prompt.contains("Be extremely brief"));

        p.verbosity = Verbosity::Verbose;
        let prompt = system_prompt(Identity::Shyn, Mode::Assistant, &p);
        assert!(prompt.contains("elaborate fully"));
    }

    #[test]
    fn personality_block_renders_tone_and_creativity() {
        let p = PersonalityConfig {
            tone: Tone::Humorous,
            creativity: 0.3,
            ..Default::default()
        };
        let prompt = system_prompt(Identity::Shyn, Mode::Assistant, &p);
        assert!(prompt.contains("Tone: HUMOROUS"));
        assert!(prompt.contains("Creativity Level: 0.3"));
    }
}
