//! Response Renderer. Splits free-form model output into display blocks.
//!
//! Two delimiters are recognised, in a single pass over the lines:
//! a level-3 heading (`### `) starts a new section, and a ```` ``` ```` fence
//! opens or closes a code block. Heading markers inside a fence are code.
//! Rendering never fails; text with no delimiters becomes one section.

use serde::Serialize;

/// A unit of the rendered analysis. `Heading` carries a section of prose,
/// starting with its `###` line when it has one. `Code` is verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayBlock {
    Heading {
        text: String,
    },
    Code {
        language: Option<String>,
        text: String,
    },
}

pub fn render_response(response: &str) -> Vec<DisplayBlock> {
    let mut scanner = BlockScanner::default();
    for line in response.lines() {
        scanner.push_line(line);
    }
    scanner.finish()
}

struct OpenFence {
    language: Option<String>,
    body: String,
}

#[derive(Default)]
struct BlockScanner {
    blocks: Vec<DisplayBlock>,
    prose: String,
    fence: Option<OpenFence>,
}

impl BlockScanner {
    fn push_line(&mut self, line: &str) {
        if let Some(fence) = self.fence.as_mut() {
            if is_fence_close(line) {
                self.close_fence();
            } else {
                fence.body.push_str(line);
                fence.body.push('\n');
            }
            return;
        }

        let trimmed = line.trim_start();
        if let Some(info) = trimmed.strip_prefix("```") {
            self.flush_prose();
            let language = info.trim().trim_start_matches('`').trim();
            self.fence = Some(OpenFence {
                language: (!language.is_empty()).then(|| language.to_string()),
                body: String::new(),
            });
            return;
        }

        if is_section_heading(trimmed) {
            self.flush_prose();
        }
        self.prose.push_str(line);
        self.prose.push('\n');
    }

    fn flush_prose(&mut self) {
        let text = self.prose.trim();
        if !text.is_empty() {
            self.blocks.push(DisplayBlock::Heading {
                text: text.to_string(),
            });
        }
        self.prose.clear();
    }

    fn close_fence(&mut self) {
        if let Some(fence) = self.fence.take() {
            let text = fence.body.trim_end_matches('\n');
            if !text.trim().is_empty() {
                self.blocks.push(DisplayBlock::Code {
                    language: fence.language,
                    text: text.to_string(),
                });
            }
        }
    }

    /// An unclosed fence keeps everything after its opener as code.
    fn finish(mut self) -> Vec<DisplayBlock> {
        self.close_fence();
        self.flush_prose();
        self.blocks
    }
}

/// `### Title` but not `#### Title`.
fn is_section_heading(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("###")
        .is_some_and(|rest| !rest.starts_with('#'))
}

fn is_fence_close(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> DisplayBlock {
        DisplayBlock::Heading {
            text: text.to_string(),
        }
    }

    fn code(language: Option<&str>, text: &str) -> DisplayBlock {
        DisplayBlock::Code {
            language: language.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_splits_sections_and_code() {
        let response = "### Weather Analysis for Paris\n\
                        #### Current Conditions\n\
                        **Humidity:** 72%\n\
                        \n\
                        ### Agricultural Inputs\n\
                        ```plaintext\n\
                        FERTILIZERS:\n  - NPK 10-10-10\n\
                        ```\n\
                        ### Recommendations & Precautions\n\
                        - Irrigate early";

        assert_eq!(
            render_response(response),
            vec![
                heading("### Weather Analysis for Paris\n#### Current Conditions\n**Humidity:** 72%"),
                heading("### Agricultural Inputs"),
                code(Some("plaintext"), "FERTILIZERS:\n  - NPK 10-10-10"),
                heading("### Recommendations & Precautions\n- Irrigate early"),
            ]
        );
    }

    #[test]
    fn test_plain_text_is_one_section() {
        assert_eq!(
            render_response("Sorry, I can only help with weather and farming."),
            vec![heading("Sorry, I can only help with weather and farming.")]
        );
    }

    #[test]
    fn test_empty_and_blank_input_render_nothing() {
        assert!(render_response("").is_empty());
        assert!(render_response("\n   \n").is_empty());
    }

    #[test]
    fn test_heading_marker_inside_fence_is_code() {
        let blocks = render_response("```\n### not a heading\n```");
        assert_eq!(blocks, vec![code(None, "### not a heading")]);
    }

    #[test]
    fn test_unclosed_fence_keeps_remainder_as_code() {
        let blocks = render_response("### Inputs\n```plaintext\nPESTICIDES:\n### Precautions");
        assert_eq!(
            blocks,
            vec![
                heading("### Inputs"),
                code(Some("plaintext"), "PESTICIDES:\n### Precautions"),
            ]
        );
    }

    #[test]
    fn test_fence_with_language_does_not_close_fence() {
        let blocks = render_response("```text\na\n```json\nb\n```\nafter");
        assert_eq!(
            blocks,
            vec![code(Some("text"), "a\n```json\nb"), heading("after")]
        );
    }

    #[test]
    fn test_empty_fence_is_dropped() {
        assert_eq!(
            render_response("### A\n```\n\n```\n### B"),
            vec![heading("### A"), heading("### B")]
        );
    }

    #[test]
    fn test_code_indentation_is_preserved() {
        let blocks = render_response("```\n  - one\n    - two\n```");
        assert_eq!(blocks, vec![code(None, "  - one\n    - two")]);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let response = "intro\n### One\nbody\n```plaintext\nx\n```\n### Two";
        assert_eq!(render_response(response), render_response(response));
    }

    #[test]
    fn test_block_serialization() {
        let json = serde_json::to_value(code(Some("plaintext"), "x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "code", "language": "plaintext", "text": "x"})
        );
    }
}
