use tracing::info;

use crate::errors::{AppError, RESUME_TEXT_REQUIRED};
use crate::llm_client::prompts::build_skills_prompt;
use crate::llm_client::{CompletionProvider, ResponseFormat};

/// Sends the resume to the completion provider and returns the skills summary.
///
/// Only the empty string is rejected; whitespace-only text is forwarded as-is.
pub async fn extract_skills(
    resume_text: &str,
    llm: &dyn CompletionProvider,
) -> Result<String, AppError> {
    if resume_text.is_empty() {
        return Err(AppError::Validation(RESUME_TEXT_REQUIRED.to_string()));
    }

    let messages = build_skills_prompt(resume_text);
    let skills = llm.complete(&messages, ResponseFormat::Text).await?;

    info!(
        resume_chars = resume_text.chars().count(),
        skills_chars = skills.chars().count(),
        "Skills extracted"
    );

    Ok(skills)
}
