//! Retrieval-and-generate step
//!
//! Expected "no context" outcomes are value variants rather than errors,
//! so the CLI and the chat loop decide presentation themselves. The error
//! channel carries real failures only.

use crate::error::Result;
use crate::llm::ChatModel;
use crate::prompt::{build_context, render_prompt};
use crate::store::ScoredChunk;
use tracing::debug;

/// Outcome of answering one question against retrieved context
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The model produced an answer from the retrieved context
    Answered(String),

    /// Nothing was retrieved; the fixed refusal applies, no model call made
    Refused,
}

/// Answer a question from retrieved chunks.
///
/// With an empty result set the outcome is `Refused` and the model is
/// never invoked.
pub async fn answer_question(
    model: &dyn ChatModel,
    results: &[ScoredChunk],
    question: &str,
) -> Result<AnswerOutcome> {
    if results.is_empty() {
        debug!("nothing retrieved, refusing without a model call");
        return Ok(AnswerOutcome::Refused);
    }

    let context = build_context(results);
    let prompt = render_prompt(&context, question);
    let answer = model.complete(&prompt).await?;
    Ok(AnswerOutcome::Answered(answer))
}
