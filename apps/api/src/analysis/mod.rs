//! Resume analysis: request validation, skills extraction, structured
//! analysis and PDF intake.

pub mod extractor;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod structured;
