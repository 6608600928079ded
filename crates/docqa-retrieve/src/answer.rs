//! Turning retrieved passages into an answer.
//!
//! The retrieval pipeline stops at ranked context. Everything here is the
//! optional last step: a prompt for a generative model, and the fallback of
//! handing the context back verbatim when no model is available.

use tracing::warn;

use docqa_core::traits::AnswerSynthesizer;
use docqa_core::types::{Answer, AnswerSource, RetrievedChunk};

/// Chunk texts in ranked order, separated by a blank line.
pub fn join_context(context: &[RetrievedChunk]) -> String {
    context
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt that restricts a generative model to the supplied passages.
pub fn build_prompt(question: &str, context: &[RetrievedChunk]) -> String {
    format!(
        "You are an assistant answering questions about a document.\n\
         Answer using only the document excerpts below.\n\
         If the answer is not in the excerpts, say that you could not find it.\n\
         \n\
         Context:\n{}\n\
         \n\
         Question:\n{}\n\
         \n\
         Answer:\n",
        join_context(context),
        question.trim()
    )
}

/// Answers with the retrieved passages themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractiveSynthesizer;

impl AnswerSynthesizer for ExtractiveSynthesizer {
    fn synthesize(&self, _question: &str, context: &[RetrievedChunk]) -> anyhow::Result<String> {
        Ok(join_context(context))
    }
}

/// Ask `synthesizer` for an answer, falling back to the raw context when there
/// is none or it fails. Synthesizer errors are logged, never returned.
pub fn answer(
    question: &str,
    context: Vec<RetrievedChunk>,
    synthesizer: Option<&dyn AnswerSynthesizer>,
) -> Answer {
    if let Some(synth) = synthesizer {
        match synth.synthesize(question, &context) {
            Ok(text) => return Answer { text, source: AnswerSource::Generated, context },
            Err(e) => warn!(error = %e, "answer synthesis failed, returning retrieved context"),
        }
    }
    Answer { text: join_context(&context), source: AnswerSource::RetrievedOnly, context }
}
