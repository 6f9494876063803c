//! Redirection extraction from a parsed command's syntax tree.

use crate::tokenizer::Span;
use crate::tokenizer::Token;
use crate::tokenizer::TokenKind;
use tree_sitter::Node;
use tree_sitter::Tree;

/// The kind of redirection a [`Redirect`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>` — truncate and write.
    Output,
    /// `>>` — append.
    Append,
    /// `<` — read from file.
    Input,
    /// `>&`/`<&` — duplicate a file descriptor.
    Duplicate,
    /// `<<` / `<<-` — heredoc.
    HereDoc,
    /// `<<<` — herestring.
    HereString,
    /// Recognized as a redirect but not one of the above.
    Unknown,
}

/// A single redirection found in a command's syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub target: String,
    pub fd: Option<i32>,
    pub span: Span,
    pub is_top_level: bool,
}

impl Redirect {
    /// Construct a redirect directly (mainly useful in tests).
    pub fn new(kind: RedirectKind, target: String, fd: Option<i32>, span: Span, is_top_level: bool) -> Self {
        Self {
            kind,
            target,
            fd,
            span,
            is_top_level,
        }
    }

    /// Whether this redirect writes arbitrary content into a file on disk.
    pub fn writes_to_file(&self) -> bool {
        matches!(self.kind, RedirectKind::Output | RedirectKind::Append)
    }
}

const OUTPUT_OPERATORS: &[&str] = &[">", "&>"];
const APPEND_OPERATORS: &[&str] = &[">>", "&>>"];
const INPUT_OPERATORS: &[&str] = &["<"];
const DUPLICATE_OPERATORS: &[&str] = &[">&", "<&"];

/// Walk a syntax tree collecting every redirection, tagging each one with
/// whether it applies at the top level of the command (as opposed to inside
/// a subshell or compound statement, which isolates its effects).
pub fn extract_redirects_from_tree(tree: &Tree, source: &str) -> Vec<Redirect> {
    let mut out = Vec::new();
    walk_redirects(tree.root_node(), source.as_bytes(), true, &mut out);
    out
}

fn walk_redirects(node: Node, src: &[u8], top_level: bool, out: &mut Vec<Redirect>) {
    let child_top_level = top_level && !matches!(node.kind(), "subshell" | "compound_statement");

    match node.kind() {
        "file_redirect" => {
            if let Some(redirect) = parse_file_redirect(node, src, child_top_level) {
                out.push(redirect);
            }
        }
        "heredoc_redirect" => {
            if let Some(redirect) = parse_heredoc_redirect(node, src, child_top_level) {
                out.push(redirect);
            }
        }
        "herestring_redirect" => {
            if let Some(redirect) = parse_herestring_redirect(node, src, child_top_level) {
                out.push(redirect);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_redirects(child, src, child_top_level, out);
    }
}

fn parse_file_redirect(node: Node, src: &[u8], top_level: bool) -> Option<Redirect> {
    let mut op_cursor = node.walk();
    let operator_node = node.children(&mut op_cursor).find(|c| {
        !c.is_named()
            && c.utf8_text(src)
                .map(|t| {
                    OUTPUT_OPERATORS.contains(&t)
                        || APPEND_OPERATORS.contains(&t)
                        || INPUT_OPERATORS.contains(&t)
                        || DUPLICATE_OPERATORS.contains(&t)
                })
                .unwrap_or(false)
    })?;
    let operator = operator_node.utf8_text(src).ok()?;

    let mut named_cursor = node.walk();
    let named: Vec<Node> = node.named_children(&mut named_cursor).collect();
    let destination = named.last()?;
    let mut target = destination.utf8_text(src).ok()?.to_string();

    let fd = if named.len() > 1 {
        named[0].utf8_text(src).ok().and_then(|t| t.parse::<i32>().ok())
    } else {
        None
    };

    let kind = if OUTPUT_OPERATORS.contains(&operator) {
        RedirectKind::Output
    } else if APPEND_OPERATORS.contains(&operator) {
        RedirectKind::Append
    } else if INPUT_OPERATORS.contains(&operator) {
        RedirectKind::Input
    } else if DUPLICATE_OPERATORS.contains(&operator) {
        target = format!("&{target}");
        RedirectKind::Duplicate
    } else {
        RedirectKind::Unknown
    };

    Some(Redirect::new(
        kind,
        target,
        fd,
        Span::new(node.start_byte() as i32, node.end_byte() as i32),
        top_level,
    ))
}

fn parse_heredoc_redirect(node: Node, src: &[u8], top_level: bool) -> Option<Redirect> {
    let mut cursor = node.walk();
    let delimiter_node = node
        .children(&mut cursor)
        .find(|c| c.is_named() && c.kind() != "heredoc_body")?;
    let raw = delimiter_node.utf8_text(src).ok()?;
    let target = raw
        .trim_matches('\'')
        .trim_matches('"')
        .trim()
        .to_string();

    Some(Redirect::new(
        RedirectKind::HereDoc,
        target,
        None,
        Span::new(node.start_byte() as i32, node.end_byte() as i32),
        top_level,
    ))
}

fn parse_herestring_redirect(node: Node, src: &[u8], top_level: bool) -> Option<Redirect> {
    let mut cursor = node.walk();
    let target_node = node.named_children(&mut cursor).last()?;
    let target = target_node.utf8_text(src).ok()?.to_string();

    Some(Redirect::new(
        RedirectKind::HereString,
        target,
        None,
        Span::new(node.start_byte() as i32, node.end_byte() as i32),
        top_level,
    ))
}

/// Extract redirections from a token stream (tokenizer fallback, used when
/// tree-sitter parsing is unavailable or unnecessary).
pub fn extract_redirects_from_tokens(tokens: &[Token]) -> Vec<Redirect> {
    let mut out = Vec::new();
    let mut iter = tokens.iter().filter(|t| t.kind != TokenKind::Whitespace);
    let mut prev: Option<&Token> = None;

    while let Some(token) = iter.next() {
        if token.kind == TokenKind::Redirect {
            let (kind, fd) = classify_redirect_text(&token.text, prev);
            if let Some(target) = iter.next() {
                out.push(Redirect::new(
                    kind,
                    target.unquoted_content().to_string(),
                    fd,
                    token.span,
                    true,
                ));
            }
        } else if token.kind == TokenKind::Heredoc {
            let target = token
                .text
                .trim_start_matches("<<-")
                .trim_start_matches("<<")
                .trim()
                .trim_matches('\'')
                .trim_matches('"')
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            out.push(Redirect::new(
                RedirectKind::HereDoc,
                target,
                None,
                token.span,
                true,
            ));
        }
        prev = Some(token);
    }

    out
}

fn classify_redirect_text(text: &str, prev: Option<&Token>) -> (RedirectKind, Option<i32>) {
    let fd = prev
        .filter(|p| p.kind == TokenKind::Word)
        .and_then(|p| p.text.parse::<i32>().ok());

    let kind = match text {
        ">" | "&>" => RedirectKind::Output,
        ">>" | "&>>" => RedirectKind::Append,
        "<" => RedirectKind::Input,
        "<<<" => RedirectKind::HereString,
        ">&" | "<&" => RedirectKind::Duplicate,
        _ => RedirectKind::Unknown,
    };
    (kind, fd)
}

#[cfg(test)]
#[path = "redirects.test.rs"]
mod tests;
