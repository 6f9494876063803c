//! Pipe-segment extraction: splitting a command line into the individual
//! commands joined by `|`/`|&`, tagging which ones are part of a pipeline.

use crate::parser::extract_command_words_lenient;
use crate::tokenizer::Token;
use crate::tokenizer::TokenKind;
use tree_sitter::Node;
use tree_sitter::Tree;

/// One command in a (possibly trivial) pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeSegment {
    pub command: Vec<String>,
    pub is_piped: bool,
}

/// Extract pipe segments from a parsed syntax tree.
pub fn extract_segments_from_tree(tree: &Tree, source: &str) -> Vec<PipeSegment> {
    let mut out = Vec::new();
    collect_segments(tree.root_node(), source.as_bytes(), &mut out);
    out
}

fn collect_segments(node: Node, src: &[u8], out: &mut Vec<PipeSegment>) {
    match node.kind() {
        "program" | "list" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_segments(child, src, out);
            }
        }
        "pipeline" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if let Some(words) = extract_command_words_lenient(child, src) {
                    if !words.is_empty() {
                        out.push(PipeSegment {
                            command: words,
                            is_piped: true,
                        });
                    }
                }
            }
        }
        "command" => {
            if let Some(words) = extract_command_words_lenient(node, src) {
                if !words.is_empty() {
                    out.push(PipeSegment {
                        command: words,
                        is_piped: false,
                    });
                }
            }
        }
        _ => {}
    }
}

/// Extract pipe segments from a token stream, used when tree-sitter parsing
/// isn't available.
pub fn extract_segments_from_tokens(tokens: &[Token]) -> Vec<PipeSegment> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    let mut saw_pipe = false;

    for token in tokens {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => continue,
            TokenKind::Operator if token.text.starts_with('|') => {
                out.push(PipeSegment {
                    command: std::mem::take(&mut current),
                    is_piped: true,
                });
                saw_pipe = true;
            }
            _ => current.push(token.unquoted_content().to_string()),
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(PipeSegment {
            command: current,
            is_piped: saw_pipe,
        });
    }

    out
}

#[cfg(test)]
#[path = "segments.test.rs"]
mod tests;
