//! Prompt contract for answer generation
//!
//! The template instructs the model to answer strictly from the supplied
//! context and to fall back to a fixed refusal sentence otherwise. This is
//! a best-effort instruction passed to the model; output is not validated
//! locally.

use crate::store::ScoredChunk;

/// Fixed answer for questions the context cannot answer
pub const REFUSAL_ANSWER: &str = "I do not have the necessary information to answer your question.";

/// Join retrieved chunk texts into one context block, in retrieval order.
pub fn build_context(results: &[ScoredChunk]) -> String {
    results
        .iter()
        .map(|result| result.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Bind context and question into the instruction template.
pub fn render_prompt(context: &str, question: &str) -> String {
    format!(
        "CONTEXT:
{context}

RULES:
- Answer only using the CONTEXT above.
- If the information is not explicitly present in the CONTEXT, answer: \"{REFUSAL_ANSWER}\"
- Never invent facts or use outside knowledge.
- Never offer opinions or interpretations beyond what is written.

USER QUESTION:
{question}

ANSWER THE \"USER QUESTION\""
    )
}
