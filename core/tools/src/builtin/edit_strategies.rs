//! Matching strategies shared by the Edit and SmartEdit tools.
//!
//! Three tiers, tried in order by [`try_match`]: exact substring matching,
//! whitespace-flexible line matching, and token-based regex fuzzy matching
//! (first occurrence only). Also home to the pre-correction heuristics that
//! compensate for common LLM string-escaping mistakes.

use std::fmt;

/// Which tier ultimately produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Flexible,
    Regex,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::Flexible => "flexible",
            MatchStrategy::Regex => "regex",
        };
        f.write_str(s)
    }
}

/// Run the three-tier match/replace pipeline against `content`.
pub fn try_match(
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Result<(String, MatchStrategy), crate::error::ToolError> {
    if let Some((result, _)) = try_exact_replace(content, old, new, replace_all) {
        return Ok((result, MatchStrategy::Exact));
    }
    if let Some((result, _)) = try_flexible_replace(content, old, new, replace_all) {
        return Ok((result, MatchStrategy::Flexible));
    }
    if let Some((result, _)) = try_regex_replace(content, old, new) {
        return Ok((result, MatchStrategy::Regex));
    }
    Err(crate::error::tool_error::ExecutionFailedSnafu {
        message: "old_string not found in file".to_string(),
    }
    .build())
}

/// Literal substring replacement.
pub fn try_exact_replace(
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Option<(String, usize)> {
    let count = content.matches(old).count();
    if count == 0 {
        return None;
    }
    if replace_all {
        Some((content.replace(old, new), count))
    } else {
        Some((content.replacen(old, new, 1), 1))
    }
}

fn leading_whitespace(line: &str) -> String {
    line.chars().take_while(|c| c.is_whitespace()).collect()
}

/// Whitespace-tolerant line matching: compares `old`/content lines with
/// leading/trailing whitespace trimmed, then reapplies each matched line's
/// original indentation to the replacement.
pub fn try_flexible_replace(
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Option<(String, usize)> {
    let content_lines: Vec<&str> = content.lines().collect();
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    if old_lines.is_empty() || content_lines.is_empty() {
        return None;
    }

    let window = old_lines.len();
    let mut starts = Vec::new();
    let mut i = 0;
    while i + window <= content_lines.len() {
        let is_match = (0..window).all(|k| content_lines[i + k].trim() == old_lines[k].trim());
        if is_match {
            starts.push(i);
            i += window;
            if !replace_all {
                break;
            }
        } else {
            i += 1;
        }
    }
    if starts.is_empty() {
        return None;
    }

    let mut result_lines: Vec<String> = Vec::with_capacity(content_lines.len());
    let mut idx = 0;
    let mut match_idx = 0;
    let mut count = 0;
    while idx < content_lines.len() {
        if match_idx < starts.len() && starts[match_idx] == idx {
            let indent = leading_whitespace(content_lines[idx]);
            for (k, new_line) in new_lines.iter().enumerate() {
                let this_indent = if idx + k < idx + window {
                    leading_whitespace(content_lines[idx + k])
                } else {
                    indent.clone()
                };
                result_lines.push(format!("{this_indent}{}", new_line.trim_start()));
            }
            idx += window;
            match_idx += 1;
            count += 1;
        } else {
            result_lines.push(content_lines[idx].to_string());
            idx += 1;
        }
    }

    let mut result = result_lines.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    Some((result, count))
}

/// Escape a string for literal use inside a `regex-lite` pattern.
pub fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '.' | '$' | '|' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '+' | '*' | '?'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Token-based fuzzy matching: tokenizes `old` on whitespace, escapes each
/// token, and joins them with `\s*` so the match is tolerant of intra-line
/// whitespace differences. Replaces only the first occurrence; `new` is
/// spliced in literally (never expanded as a regex replacement template).
pub fn try_regex_replace(content: &str, old: &str, new: &str) -> Option<(String, usize)> {
    let tokens: Vec<&str> = old.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    let pattern = tokens
        .iter()
        .map(|t| escape_regex(t))
        .collect::<Vec<_>>()
        .join(r"\s*");
    let re = regex_lite::Regex::new(&pattern).ok()?;
    let m = re.find(content)?;

    let mut result = String::with_capacity(content.len());
    result.push_str(&content[..m.start()]);
    result.push_str(new);
    result.push_str(&content[m.end()..]);

    let had_trailing_nl = content.ends_with('\n');
    let now_trailing_nl = result.ends_with('\n');
    if had_trailing_nl && !now_trailing_nl {
        result.push('\n');
    } else if !had_trailing_nl && now_trailing_nl {
        result.pop();
    }

    Some((result, 1))
}

/// Correct common LLM string-escaping mistakes before matching.
///
/// If `old` isn't found verbatim in `content` but its unescaped form is,
/// the unescaped form is used instead. `new` is always unescaped, since it
/// never needs to match anything and over-escaped replacement text is a
/// more common mistake than intentional literal backslashes.
pub fn pre_correct_escaping(old: &str, new: &str, content: &str) -> (String, String) {
    let corrected_old = if content.contains(old) {
        old.to_string()
    } else {
        let unescaped = unescape_string_for_llm_bug(old);
        if content.contains(&unescaped) {
            unescaped
        } else {
            old.to_string()
        }
    };
    let corrected_new = unescape_string_for_llm_bug(new);
    (corrected_old, corrected_new)
}

/// Undo common over-escaping: `\\` collapses to `\`, then `\n`, `\t`, `\"`,
/// `\'` resolve to their literal characters.
pub fn unescape_string_for_llm_bug(s: &str) -> String {
    let collapsed = s.replace("\\\\", "\\");
    let mut out = String::with_capacity(collapsed.len());
    let mut chars = collapsed.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n') => {
                    out.push('\n');
                    chars.next();
                }
                Some('t') => {
                    out.push('\t');
                    chars.next();
                }
                Some('"') => {
                    out.push('"');
                    chars.next();
                }
                Some('\'') => {
                    out.push('\'');
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// If trimming `old`'s surrounding whitespace would make it match `content`
/// (and it doesn't already), return the trimmed `(old, new)` pair.
pub fn trim_pair_if_possible(old: &str, new: &str, content: &str) -> Option<(String, String)> {
    let trimmed_old = old.trim();
    if trimmed_old == old {
        return None;
    }
    if !content.contains(trimmed_old) {
        return None;
    }
    Some((trimmed_old.to_string(), new.trim().to_string()))
}

/// Build a hint for why `old` couldn't be matched, by looking for any of
/// its individual lines as a substring of `content`.
pub fn find_closest_match(content: &str, old: &str) -> String {
    for line in old.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && content.contains(trimmed) {
            return format!("Found a partial match for one line of old_string: {trimmed:?}");
        }
    }
    "old_string was not found anywhere in the file, even partially.".to_string()
}

/// Human-readable `" (+N/-M lines)"` summary of a content diff, or an empty
/// string when nothing changed.
pub fn diff_stats(old_content: &str, new_content: &str) -> String {
    if old_content == new_content {
        return String::new();
    }
    let old_lines: Vec<&str> = old_content.lines().collect();
    let new_lines: Vec<&str> = new_content.lines().collect();

    let mut prefix = 0;
    while prefix < old_lines.len()
        && prefix < new_lines.len()
        && old_lines[prefix] == new_lines[prefix]
    {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < old_lines.len() - prefix
        && suffix < new_lines.len() - prefix
        && old_lines[old_lines.len() - 1 - suffix] == new_lines[new_lines.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let removed = old_lines.len() - prefix - suffix;
    let added = new_lines.len() - prefix - suffix;
    format!(" (+{added}/-{removed} lines)")
}

#[cfg(test)]
#[path = "edit_strategies.test.rs"]
mod tests;
