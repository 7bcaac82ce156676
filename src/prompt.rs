//! Analysis prompt construction.
//!
//! The prompt asks the model for a fixed set of Markdown sections so every
//! summary in `docs/codebase/` has the same shape.

use std::path::Path;

/// Maximum number of characters of source text embedded in a prompt.
pub const CONTENT_CHAR_BUDGET: usize = 8000;

/// Appended after the source text when it exceeds [`CONTENT_CHAR_BUDGET`].
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Returns at most [`CONTENT_CHAR_BUDGET`] characters of `content`, and
/// whether anything was cut.
///
/// Counts `char`s, so a multibyte character is never split.
#[must_use]
pub fn truncate_content(content: &str) -> (&str, bool) {
    match content.char_indices().nth(CONTENT_CHAR_BUDGET) {
        Some((byte_idx, _)) => (&content[..byte_idx], true),
        None => (content, false),
    }
}

/// Builds the LLM prompt asking for a structured summary of one source file.
///
/// `file_ext` is the extension including its leading dot (`".rs"`), or empty.
#[must_use]
pub fn build_analysis_prompt(rel_path: &str, file_ext: &str, content: &str) -> String {
    let short_name =
        Path::new(rel_path).file_stem().map_or_else(|| rel_path.into(), |s| s.to_string_lossy());
    let fence_lang = file_ext.strip_prefix('.').filter(|e| !e.is_empty()).unwrap_or("txt");
    let (body, truncated) = truncate_content(content);
    let marker = if truncated { TRUNCATION_MARKER } else { "" };

    format!(
        "Analyze this source file and generate a structured Markdown summary optimized for AI consumption.

**File**: `{rel_path}`

**Your task**: Create a clear, structured summary that will help an AI assistant quickly understand this file's purpose, structure, and dependencies.

**Required sections** (use this exact format):

# {short_name}

## Purpose
One concise paragraph explaining what this file does and why it exists.

## Key Components
List the main classes, functions, or exports with brief descriptions:
- `ComponentName`: What it does
- `functionName()`: What it does

## Dependencies
### Internal (from this codebase)
- `path/to/file.py` - What you use from it
- `another/file.ts` - What you use from it

### External (libraries/packages)
- `library-name` - What features you use

## Public API
What this file exposes for other files to use:
- `export function doThing()`: Description
- `class MyClass`: Description

## Code Links
Direct references to key definitions (use format `[symbol_name](code:{rel_path}#symbol=symbol_name)`):
- [main_function](code:{rel_path}#symbol=main_function)
- [ClassName](code:{rel_path}#symbol=ClassName)

## Implementation Notes
Any important patterns, algorithms, or gotchas an AI should know about.

---

**Source code**:
```{fence_lang}
{body}  {marker}
```

Generate the summary now. Be precise and focused on information that would help an AI understand the codebase architecture."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_embedded_verbatim_without_marker() {
        let content = "fn main() {\n    println!(\"hi\");\n}";
        let prompt = build_analysis_prompt("src/main.rs", ".rs", content);

        assert!(prompt.contains(&format!("```rs\n{content}  \n```")));
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn content_exactly_at_budget_is_not_truncated() {
        let content = "a".repeat(CONTENT_CHAR_BUDGET);
        let (body, truncated) = truncate_content(&content);

        assert!(!truncated);
        assert_eq!(body.len(), CONTENT_CHAR_BUDGET);
        assert!(!build_analysis_prompt("a.txt", ".txt", &content).contains(TRUNCATION_MARKER));
    }

    #[test]
    fn long_content_is_cut_and_marked() {
        let content = format!("{}{}", "a".repeat(CONTENT_CHAR_BUDGET), "TAIL");
        let prompt = build_analysis_prompt("big.py", ".py", &content);

        assert!(prompt.contains(&format!("a  {TRUNCATION_MARKER}\n```")));
        assert!(!prompt.contains("TAIL"));
        assert!(prompt.contains(&"a".repeat(CONTENT_CHAR_BUDGET)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let content = "é".repeat(CONTENT_CHAR_BUDGET + 1);
        let (body, truncated) = truncate_content(&content);

        assert!(truncated);
        assert_eq!(body.chars().count(), CONTENT_CHAR_BUDGET);
        assert_eq!(body.len(), CONTENT_CHAR_BUDGET * 2);
    }

    #[test]
    fn embeds_path_short_name_and_code_links() {
        let prompt = build_analysis_prompt("src/foo/bar.ts", ".ts", "export {}");

        assert!(prompt.contains("**File**: `src/foo/bar.ts`"));
        assert!(prompt.contains("\n# bar\n"));
        assert!(prompt.contains("[main_function](code:src/foo/bar.ts#symbol=main_function)"));
        assert!(prompt.contains("```ts\n"));
    }

    #[test]
    fn lists_every_required_section() {
        let prompt = build_analysis_prompt("lib.rs", ".rs", "");
        for section in [
            "## Purpose",
            "## Key Components",
            "## Dependencies",
            "### Internal (from this codebase)",
            "### External (libraries/packages)",
            "## Public API",
            "## Code Links",
            "## Implementation Notes",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
    }

    #[test]
    fn missing_extension_fences_as_txt() {
        let prompt = build_analysis_prompt("Makefile", "", "all:\n");
        assert!(prompt.contains("```txt\nall:\n  \n```"));
        assert!(prompt.contains("\n# Makefile\n"));
    }
}
