pub const LOG_ANALYST_PERSONA: &str =
    "You are a senior log analysis expert. Respond only in the requested 3-section format.";

pub fn generate_log_analysis_prompt(log_content: &str) -> String {
    format!(
        r#"Analyze the following log snippet or error message. Provide:
1. Root Cause: Identify the main issue causing the error
2. Possible Fixes: List specific solutions with code examples where applicable
3. Context: Explain what led to this error based on the log

Format your response as:
ROOT_CAUSE:
[Your analysis of the root cause]

POSSIBLE_FIXES:
[Numbered list of fixes with details]

CONTEXT:
[Additional context and explanation]

Log Content:
{}"#,
        log_content
    )
}
