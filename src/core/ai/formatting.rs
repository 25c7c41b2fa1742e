//! Reply planning for relay responses in Discord.
//!
//! Discord caps messages at 2000 characters, so anything at or over the
//! inline limit is delivered as a file attachment instead. The filename
//! extension is picked by scanning the text for fenced code blocks.

/// Replies at or over this many characters become file attachments.
pub const INLINE_LIMIT: usize = 1900;

/// Source languages we recognize in fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLanguage {
    Python,
    JavaScript,
    TypeScript,
}

impl CodeLanguage {
    pub fn extension(self) -> &'static str {
        match self {
            CodeLanguage::Python => "py",
            CodeLanguage::JavaScript => "js",
            CodeLanguage::TypeScript => "ts",
        }
    }
}

/// How a relay response should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPlan {
    /// Short enough to post as an ordinary message.
    Inline,
    /// Too long for a message; stage the full text under `filename` and
    /// attach it. The filename is fixed per detected language, so two
    /// oversized replies in flight at the same time can share a path.
    File { filename: String },
}

/// Best-effort detection of the dominant source language in `text`.
///
/// Matches fence tags case-insensitively, in the same precedence order the
/// tags are listed here. Anything unrecognized counts as untyped.
pub fn detect_code_language(text: &str) -> Option<CodeLanguage> {
    let lowered = text.to_lowercase();

    if lowered.contains("```python") {
        return Some(CodeLanguage::Python);
    }
    if ["```js", "```javascript", "```node"]
        .iter()
        .any(|tag| lowered.contains(tag))
    {
        return Some(CodeLanguage::JavaScript);
    }
    if lowered.contains("```ts") {
        return Some(CodeLanguage::TypeScript);
    }

    None
}

/// Decides how `text` should be delivered. Length is counted in characters,
/// matching how Discord measures message limits.
pub fn plan_reply(text: &str) -> ReplyPlan {
    if text.chars().count() < INLINE_LIMIT {
        return ReplyPlan::Inline;
    }

    let extension = detect_code_language(text)
        .map(CodeLanguage::extension)
        .unwrap_or("txt");

    ReplyPlan::File {
        filename: format!("response.{extension}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text(prefix: &str) -> String {
        let mut text = prefix.to_string();
        while text.chars().count() < INLINE_LIMIT {
            text.push('x');
        }
        text
    }

    #[test]
    fn test_short_reply_is_inline() {
        assert_eq!(plan_reply("hello"), ReplyPlan::Inline);
    }

    #[test]
    fn test_threshold_boundary() {
        let just_under = "a".repeat(INLINE_LIMIT - 1);
        assert_eq!(plan_reply(&just_under), ReplyPlan::Inline);

        let at_limit = "a".repeat(INLINE_LIMIT);
        assert_eq!(
            plan_reply(&at_limit),
            ReplyPlan::File {
                filename: "response.txt".to_string()
            }
        );
    }

    #[test]
    fn test_length_is_counted_in_characters_not_bytes() {
        // Multi-byte characters still count as one each.
        let text = "é".repeat(INLINE_LIMIT - 1);
        assert_eq!(plan_reply(&text), ReplyPlan::Inline);
    }

    #[test]
    fn test_python_fence_yields_py_extension() {
        let text = long_text("Here you go:\n```python\nprint('hi')\n```\n");
        assert_eq!(
            plan_reply(&text),
            ReplyPlan::File {
                filename: "response.py".to_string()
            }
        );
    }

    #[test]
    fn test_javascript_fences_yield_js_extension() {
        for tag in ["js", "javascript", "node"] {
            let text = long_text(&format!("```{tag}\nconsole.log(1)\n```\n"));
            assert_eq!(
                plan_reply(&text),
                ReplyPlan::File {
                    filename: "response.js".to_string()
                },
                "fence tag {tag}"
            );
        }
    }

    #[test]
    fn test_ts_fence_yields_ts_extension() {
        let text = long_text("```ts\nconst x: number = 1;\n```\n");
        assert_eq!(
            plan_reply(&text),
            ReplyPlan::File {
                filename: "response.ts".to_string()
            }
        );
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(
            detect_code_language("```PYTHON\npass\n```"),
            Some(CodeLanguage::Python)
        );
    }

    #[test]
    fn test_unrecognized_fence_is_untyped() {
        assert_eq!(detect_code_language("```rust\nfn main() {}\n```"), None);

        let text = long_text("```rust\nfn main() {}\n```\n");
        assert_eq!(
            plan_reply(&text),
            ReplyPlan::File {
                filename: "response.txt".to_string()
            }
        );
    }

    #[test]
    fn test_python_takes_precedence_over_later_tags() {
        let text = "```python\npass\n```\n```js\nconsole.log(1)\n```";
        assert_eq!(detect_code_language(text), Some(CodeLanguage::Python));
    }
}
