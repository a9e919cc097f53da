//! Prompt construction for the security review model.
//!
//! Pure template substitution: the system instruction is fixed and the user
//! prompt only embeds request metadata plus the (truncated) snippet.

use crate::core::models::AnalysisRequest;
use crate::utils::text::truncate_chars;

/// Max characters of submitted content embedded in the prompt.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 12_000;

pub const SYSTEM_PROMPT: &str = "You are SecureFlow AI, a DevSecOps security reviewer.
Identify security and compliance risks in code/configuration text and provide actionable fixes.

Rules:
- Be concise and developer-friendly.
- Focus on practical, high-signal findings.
- Do NOT invent dependencies, findings, or claim you executed code.
- Output must be valid JSON ONLY (no markdown).

Output schema:
{
  \"overall_severity\": \"LOW\"|\"MEDIUM\"|\"HIGH\",
  \"findings\": [
    {\"id\": str, \"title\": str, \"severity\": \"LOW\"|\"MEDIUM\"|\"HIGH\",
     \"evidence\": str, \"impact\": str, \"recommendation\": str,
     \"fixed_example\": str (optional)}
  ],
  \"summary\": str
}
";

/// Builds the per-request user prompt.
#[must_use]
pub fn build_user_prompt(request: &AnalysisRequest) -> String {
    let content = truncate_chars(&request.content, MAX_PROMPT_CONTENT_CHARS);
    format!(
        "Analyze the following {input_type} content.

Metadata:
- language: {language}
- app_name: {app_name}
- environment: {environment}

Content:
{content}

Return JSON with:
- overall_severity: one of [\"LOW\",\"MEDIUM\",\"HIGH\"]
- findings: array of objects with fields:
  - id (short string)
  - title
  - severity [\"LOW\",\"MEDIUM\",\"HIGH\"]
  - evidence (quote a small relevant snippet)
  - impact (1-2 sentences)
  - recommendation (actionable fix)
  - fixed_example (optional short snippet)
- summary (1-2 sentences)
",
        input_type = request.input_type,
        language = request.language,
        app_name = request.app_name,
        environment = request.environment,
    )
}
