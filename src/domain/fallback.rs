//! Locally computed answer used when the chat provider cannot be reached

/// Builds the deterministic substitute answer from the question and a
/// caller-supplied description of the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackComposer;

impl FallbackComposer {
    pub fn compose(question: &str, dataset_info: &str) -> String {
        format!(
            "**Basic Data Analysis** (AI service unavailable)\n\n\
             Based on your question: *\"{question}\"*\n\n\
             Here's what I can tell you about your dataset:\n\
             {dataset_info}\n\n\
             **Note:** For more detailed AI-powered insights, please ensure your OpenAI API key \
             is valid and has sufficient quota."
        )
    }
}
