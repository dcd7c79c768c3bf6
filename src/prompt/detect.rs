//! Advisory language detection.
//!
//! Labels the prompt for the model; nothing branches on the result.
//! Word-boundary patterns keep comment/string misfires down, but the
//! heuristics make no correctness claim.

use std::sync::LazyLock;

use regex::Regex;

/// Hints that carry no real language information.
const GENERIC_HINTS: &[&str] = &["", "auto", "plain", "plaintext", "text", "txt", "unknown"];

/// Ordered keyword-pattern table. A language matches when every one of
/// its patterns appears in the code; the first match wins, so more
/// specific families (typescript) sit above their supersets
/// (javascript).
static LANGUAGE_PATTERNS: LazyLock<Vec<(&'static str, Vec<Regex>)>> = LazyLock::new(|| {
    let re = |pattern: &str| Regex::new(pattern).unwrap();
    vec![
        ("rust", vec![re(r"\bfn\s+\w+\s*[(<]"), re(r"\b(let|impl|pub|use)\b")]),
        ("go", vec![re(r"\bfunc\s"), re(r"\bpackage\s+\w+")]),
        (
            "typescript",
            vec![
                re(r"\b(interface|type)\s+\w+|:\s*(string|number|boolean)\b"),
                re(r"\b(const|let|function|export)\b"),
            ],
        ),
        (
            "javascript",
            vec![re(r"\b(function\s+\w+|const\s+\w+\s*=|=>)"), re(r"[;{]")],
        ),
        ("python", vec![re(r"\bdef\s+\w+\s*\(.*\)\s*:"), re(r"\b(import|return|self)\b")]),
        ("java", vec![re(r"\b(public|private|protected)\s+\w+"), re(r"\bclass\s+\w+")]),
        ("c", vec![re(r"#include\s*<\w+\.h>"), re(r"\b(int|void|char)\s+\w+\s*\(")]),
    ]
});

/// Detect the language of `code` from keyword heuristics.
///
/// Returns `None` when no family matches.
pub fn detect_language(code: &str) -> Option<&'static str> {
    LANGUAGE_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().all(|p| p.is_match(code)))
        .map(|(name, _)| *name)
}

/// Resolve the effective language label for a prompt.
///
/// A non-generic hint wins as-is. Otherwise detection runs over the
/// code, falling back to the hint (if any) and finally to `"unknown"`.
pub fn resolve_language(code: &str, hint: Option<&str>) -> String {
    match hint {
        Some(h) if !is_generic_hint(h) => h.to_string(),
        _ => detect_language(code)
            .map(str::to_string)
            .or_else(|| {
                hint.map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
            })
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

fn is_generic_hint(hint: &str) -> bool {
    GENERIC_HINTS.contains(&hint.trim().to_lowercase().as_str())
}

/// Map a file extension to a language label.
///
/// Cheaper and more reliable than content heuristics when a path is
/// available; the CLI uses it to label open files.
pub fn language_for_path(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    let label = match ext {
        "rs" => "rust",
        "go" => "go",
        "py" => "python",
        "ts" | "tsx" => "typescript",
        "js" | "jsx" | "mjs" => "javascript",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "rb" => "ruby",
        "sh" => "shell",
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_rust() {
        let code = "pub fn compute(input: &str) -> usize {\n    let n = input.len();\n    n\n}";
        assert_eq!(detect_language(code), Some("rust"));
    }

    #[test]
    fn detects_go() {
        let code = "package main\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}";
        assert_eq!(detect_language(code), Some("go"));
    }

    #[test]
    fn detects_python() {
        let code = "import os\n\ndef load(path):\n    return os.stat(path)";
        assert_eq!(detect_language(code), Some("python"));
    }

    #[test]
    fn detects_typescript_over_javascript() {
        let code = "interface User {\n  name: string;\n}\nconst u: User = { name: \"a\" };";
        assert_eq!(detect_language(code), Some("typescript"));
    }

    #[test]
    fn detects_javascript() {
        let code = "const add = (a, b) => {\n  return a + b;\n};";
        assert_eq!(detect_language(code), Some("javascript"));
    }

    #[test]
    fn detects_java() {
        let code = "public class Main {\n  private int count;\n}";
        assert_eq!(detect_language(code), Some("java"));
    }

    #[test]
    fn detects_c() {
        let code = "#include <stdio.h>\n\nint main(void) {\n  return 0;\n}";
        assert_eq!(detect_language(code), Some("c"));
    }

    #[test]
    fn prose_matches_nothing() {
        assert_eq!(detect_language("This is just a paragraph of text."), None);
        assert_eq!(detect_language(""), None);
    }

    #[test]
    fn explicit_hint_wins() {
        let code = "package main\n\nfunc main() {}";
        assert_eq!(resolve_language(code, Some("ruby")), "ruby");
    }

    #[test]
    fn generic_hint_defers_to_detection() {
        let code = "package main\n\nfunc main() {}";
        assert_eq!(resolve_language(code, Some("plaintext")), "go");
        assert_eq!(resolve_language(code, None), "go");
    }

    #[test]
    fn generic_hint_survives_failed_detection() {
        assert_eq!(resolve_language("just words", Some("plaintext")), "plaintext");
    }

    #[test]
    fn unknown_when_nothing_matches() {
        assert_eq!(resolve_language("just words", None), "unknown");
        assert_eq!(resolve_language("just words", Some("")), "unknown");
    }

    #[test]
    fn extension_labels() {
        use std::path::Path;
        assert_eq!(language_for_path(Path::new("src/main.rs")), Some("rust"));
        assert_eq!(language_for_path(Path::new("app.tsx")), Some("typescript"));
        assert_eq!(language_for_path(Path::new("script")), None);
        assert_eq!(language_for_path(Path::new("data.csv")), None);
    }
}
