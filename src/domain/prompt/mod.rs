//! Prompt composition - dataset insights and chart layout summaries

mod builder;
mod layout;

pub use builder::{ANALYST_INSTRUCTION, PromptBuilder};
pub use layout::{
    LAYOUT_CHARACTER_LIMIT, LAYOUT_FALLBACK_QUESTION, layout_fallback_info, layout_prompt,
};
