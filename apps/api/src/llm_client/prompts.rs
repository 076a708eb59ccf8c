// Prompt constants and the builders that assemble outbound message lists.

use super::ChatMessage;

/// System instruction sent ahead of every resume.
pub const SKILLS_SYSTEM: &str = "Extract key skills from the following resume:";

/// Builds the two-message skills prompt: the fixed system instruction, then
/// the resume text verbatim.
pub fn build_skills_prompt(resume_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SKILLS_SYSTEM),
        ChatMessage::user(resume_text),
    ]
}
