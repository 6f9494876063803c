//! Tree-sitter-backed shell command parsing.
//!
//! Bash (and bash-compatible shells) are parsed with `tree-sitter-bash` into
//! a concrete syntax tree. Other shells fall back to the [`crate::Tokenizer`].

use std::path::Path;
use tree_sitter::Node;
use tree_sitter::Parser;
use tree_sitter::Tree;
use tree_sitter_bash::LANGUAGE as BASH;

/// Which shell a command line is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Sh,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
    Unknown,
}

/// Guess a shell's type from the executable named in its path or argv\[0\].
pub fn detect_shell_type(program: &Path) -> ShellType {
    let file_name = program
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let name = file_name.strip_suffix(".exe").unwrap_or(&file_name);
    match name {
        "bash" => ShellType::Bash,
        "sh" | "dash" => ShellType::Sh,
        "zsh" => ShellType::Zsh,
        "fish" => ShellType::Fish,
        "powershell" | "pwsh" => ShellType::PowerShell,
        "cmd" => ShellType::Cmd,
        _ => ShellType::Unknown,
    }
}

/// Extract the embedded script from a shell invocation's argv, e.g.
/// `["bash", "-c", "ls -la"]` -> `"ls -la"`. Returns `None` if `argv` isn't
/// a recognized `<shell> -c <script>` invocation.
pub fn extract_shell_script(argv: &[String]) -> Option<String> {
    let [shell, flag, script] = argv else {
        return None;
    };
    let name = Path::new(shell)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(shell.as_str());
    let is_shell = matches!(detect_shell_type(Path::new(name)), ShellType::Bash | ShellType::Sh | ShellType::Zsh);
    let is_c_flag = matches!(flag.as_str(), "-c" | "-lc" | "-lic" | "-ic");
    if is_shell && is_c_flag {
        Some(script.clone())
    } else {
        None
    }
}

/// Parses shell command strings into [`ParsedCommand`]s.
pub struct ShellParser {
    parser: Parser,
}

impl ShellParser {
    /// Create a new parser backed by the bash grammar.
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser
            .set_language(&BASH.into())
            .expect("failed to load bash grammar");
        Self { parser }
    }

    /// Parse a command string into a syntax tree.
    pub fn parse(&mut self, source: &str) -> ParsedCommand {
        let tree = self.parser.parse(source, None);
        ParsedCommand {
            source: source.to_string(),
            tree,
        }
    }

    /// Parse a shell invocation given as argv, e.g.
    /// `["bash", "-c", "ls -la"]`, extracting and parsing the embedded
    /// script. Returns `None` if `argv` doesn't look like a shell
    /// invocation this parser can handle.
    pub fn parse_shell_invocation(&mut self, argv: &[String]) -> Option<ParsedCommand> {
        let script = extract_shell_script(argv)?;
        Some(self.parse(&script))
    }
}

impl Default for ShellParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed shell command: its source text and (if parsing succeeded) its
/// syntax tree.
pub struct ParsedCommand {
    source: String,
    tree: Option<Tree>,
}

impl ParsedCommand {
    /// Whether a syntax tree was produced at all.
    pub fn has_tree(&self) -> bool {
        self.tree.is_some()
    }

    /// Whether the tree (if any) contains a syntax error node.
    pub fn has_errors(&self) -> bool {
        self.tree
            .as_ref()
            .map(|t| t.root_node().has_error())
            .unwrap_or(true)
    }

    /// The underlying syntax tree, if parsing produced one.
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// The exact source text that was parsed.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Extract the word-list of every command found anywhere in the source,
    /// on a best-effort basis. Used for risk analysis, where missing a
    /// command is worse than over-approximating one.
    pub fn extract_commands(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        if let Some(tree) = &self.tree {
            collect_commands_lenient(tree.root_node(), self.source.as_bytes(), &mut out);
        }
        out
    }

    /// Extract the word-list of every command in the source, but only if
    /// every part of the source is a plain-word command joined solely by
    /// `&&`/`||`/`|`/`|&` — no redirections, substitutions, subshells, or
    /// variable expansions anywhere. Returns `None` otherwise.
    pub fn try_extract_safe_commands(&self) -> Option<Vec<Vec<String>>> {
        let tree = self.tree.as_ref()?;
        if tree.root_node().has_error() {
            return None;
        }
        let mut out = Vec::new();
        collect_safe_commands(tree.root_node(), self.source.as_bytes(), &mut out)?;
        Some(out)
    }
}

fn collect_commands_lenient(node: Node, src: &[u8], out: &mut Vec<Vec<String>>) {
    if node.kind() == "command" {
        if let Some(words) = extract_command_words_lenient(node, src) {
            if !words.is_empty() {
                out.push(words);
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_commands_lenient(child, src, out);
    }
}

/// Best-effort extraction of a command's words: anything recognizable as a
/// word-like argument contributes its (unquoted) text; anything else is
/// simply skipped rather than rejecting the whole command.
pub(crate) fn extract_command_words_lenient(node: Node, src: &[u8]) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "command_name" => {
                if let Some(inner) = child.named_child(0) {
                    if let Ok(text) = inner.utf8_text(src) {
                        words.push(unquote_best_effort(inner.kind(), text));
                    }
                }
            }
            "word" | "number" | "raw_string" | "string" | "concatenation"
            | "simple_expansion" | "expansion" | "ansi_c_string" => {
                if let Ok(text) = child.utf8_text(src) {
                    words.push(unquote_best_effort(child.kind(), text));
                }
            }
            _ => {}
        }
    }
    Some(words)
}

fn unquote_best_effort(kind: &str, text: &str) -> String {
    match kind {
        "raw_string" => text
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .unwrap_or(text)
            .to_string(),
        "string" => text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(text)
            .to_string(),
        _ => text.to_string(),
    }
}

fn collect_safe_commands(node: Node, src: &[u8], out: &mut Vec<Vec<String>>) -> Option<()> {
    match node.kind() {
        "program" | "list" | "pipeline" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_safe_commands(child, src, out)?;
            }
            Some(())
        }
        "command" => {
            let words = extract_command_words_strict(node, src)?;
            if words.is_empty() {
                return None;
            }
            out.push(words);
            Some(())
        }
        // Redirections, subshells, negation, compound statements,
        // assignments and anything we don't explicitly recognize are not
        // safe to execute without shell semantics.
        _ => None,
    }
}

fn extract_command_words_strict(node: Node, src: &[u8]) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "command_name" => {
                let inner = child.named_child(0)?;
                words.push(extract_plain_word(inner, src)?);
            }
            "word" | "number" => {
                words.push(child.utf8_text(src).ok()?.to_string());
            }
            "raw_string" => {
                words.push(strip_raw_string(child.utf8_text(src).ok()?));
            }
            "string" => {
                words.push(extract_plain_string(child, src)?);
            }
            "concatenation" => {
                words.push(extract_concatenation(child, src)?);
            }
            // Redirects, assignments, substitutions and expansions make the
            // command unsafe to treat as plain words.
            _ => return None,
        }
    }
    Some(words)
}

fn extract_plain_word(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "word" | "number" => node.utf8_text(src).ok().map(str::to_string),
        "raw_string" => node.utf8_text(src).ok().map(strip_raw_string),
        "string" => extract_plain_string(node, src),
        _ => None,
    }
}

fn strip_raw_string(text: &str) -> String {
    text.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(text)
        .to_string()
}

fn extract_plain_string(node: Node, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    match children.as_slice() {
        [open, content, close]
            if open.utf8_text(src).ok() == Some("\"")
                && close.utf8_text(src).ok() == Some("\"")
                && content.kind() == "string_content" =>
        {
            content.utf8_text(src).ok().map(str::to_string)
        }
        [open, close]
            if open.utf8_text(src).ok() == Some("\"") && close.utf8_text(src).ok() == Some("\"") =>
        {
            Some(String::new())
        }
        _ => None,
    }
}

fn extract_concatenation(node: Node, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let mut out = String::new();
    for child in node.named_children(&mut cursor) {
        out.push_str(&extract_plain_word(child, src)?);
    }
    Some(out)
}

#[cfg(test)]
#[path = "parser.test.rs"]
mod tests;
