//! System prompt construction for review requests.

pub mod detect;

pub use detect::{detect_language, language_for_path, resolve_language};

use crate::constants::LARGE_FILE_LINE_THRESHOLD;

/// Build the system prompt for one review request.
///
/// Embeds the code as a labeled fenced block under the resolved
/// language, warns the model when the input is large, and appends the
/// fixed review guidance. Deterministic; no I/O.
pub fn build_system_prompt(code_context: &str, language_hint: Option<&str>) -> String {
    let language = resolve_language(code_context, language_hint);
    let line_count = code_context.lines().count();

    let mut prompt = format!(
        "You are an expert code reviewer embedded in an editor. The user has \
         selected a piece of code and will ask you questions about it or \
         request changes.\n\n\
         ## Code Under Review ({language})\n\n\
         ```{language}\n{code_context}\n```\n\n"
    );

    if line_count > LARGE_FILE_LINE_THRESHOLD {
        prompt.push_str(&format!(
            "## LARGE FILE WARNING\n\n\
             The code above is large ({line_count} lines). Prioritise the most \
             impactful findings and keep your response focused so it is not cut \
             off before it completes.\n\n"
        ));
    }

    prompt.push_str(
        "## Review Guidance\n\n\
         - Be specific: reference the exact function, variable, and type names \
         involved, and the line numbers where they appear.\n\
         - Do not give generic boilerplate advice; tie every remark to this code.\n\
         - Cover correctness, security, performance, and code quality.\n\
         - IMPORTANT: when you suggest replacement code, return the complete \
         code block for the whole selection, never a partial snippet. The \
         caller substitutes your block over the original selection verbatim, \
         so anything you omit is lost.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of_code(count: usize) -> String {
        (0..count)
            .map(|i| format!("let value_{i} = {i};"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn prompt_embeds_code_and_language() {
        let code = "const x: number = 1;";
        let prompt = build_system_prompt(code, Some("typescript"));

        assert!(prompt.contains(code));
        assert!(prompt.to_lowercase().contains("typescript"));
        assert!(prompt.contains("specific"));
    }

    #[test]
    fn prompt_requires_complete_replacement_blocks() {
        let prompt = build_system_prompt("fn main() {}", Some("rust"));
        assert!(prompt.contains("complete"));
        assert!(prompt.contains("never a partial snippet"));
    }

    #[test]
    fn large_input_gets_the_warning_block() {
        let prompt = build_system_prompt(&lines_of_code(150), Some("rust"));
        assert!(prompt.contains("LARGE FILE WARNING"));
        assert!(prompt.contains("150 lines"));
    }

    #[test]
    fn small_input_has_no_warning_block() {
        let prompt = build_system_prompt(&lines_of_code(50), Some("rust"));
        assert!(!prompt.contains("LARGE FILE WARNING"));
    }

    #[test]
    fn threshold_is_exclusive() {
        let prompt = build_system_prompt(&lines_of_code(100), Some("rust"));
        assert!(!prompt.contains("LARGE FILE WARNING"));
        let prompt = build_system_prompt(&lines_of_code(101), Some("rust"));
        assert!(prompt.contains("LARGE FILE WARNING"));
    }

    #[test]
    fn missing_hint_falls_back_to_detection() {
        let prompt = build_system_prompt("package main\n\nfunc main() {}", None);
        assert!(prompt.contains("## Code Under Review (go)"));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let code = lines_of_code(10);
        assert_eq!(
            build_system_prompt(&code, Some("rust")),
            build_system_prompt(&code, Some("rust"))
        );
    }
}
