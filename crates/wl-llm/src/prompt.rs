//! The review prompt.

const PREAMBLE: &str = "You are a helpful assistant. Analyze the work logs below and answer the user's question.\n\
Base your answer only on the information contained in these logs.";
const INSTRUCTION: &str = "Answer the following question in a professional and helpful tone.";

/// A question about a rendered set of work logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Work logs for the selected period, rendered as plain text.
    pub work_logs: String,
    pub question: String,
}

pub(crate) fn review_prompt(request: &ReviewRequest) -> String {
    format!(
        "{PREAMBLE}\n\nWork logs for the selected period:\n---\n{}\n---\n\n{INSTRUCTION}\n\nQuestion: {}\n\nResponse:",
        request.work_logs.trim(),
        request.question.trim()
    )
}
