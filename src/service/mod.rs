pub mod diagnosis;
pub mod extraction;
pub mod llm;
pub mod prompts;
pub mod relay;

#[cfg(test)]
pub mod test_support;

pub use diagnosis::DiagnosisService;
pub use llm::{CompletionProvider, LlmClient};
pub use relay::{RelayError, RelayService};
