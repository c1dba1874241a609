//! Snippet highlighting
//!
//! A cosmetic, line-oriented highlighter for the code excerpts shown on
//! the results page. It is not a lexer: each line runs through a fixed
//! sequence of regex passes, and a later pass operates on the output of
//! the one before it, so a region matched late (a comment) wraps the tags
//! inserted earlier. That ordering is part of the contract and is covered
//! by tests.
//!
//! Pass order per line: keywords, quoted strings, integers, comments.
//! Input text is escaped before the passes run; single quotes stay
//! literal so the string pass can pair them.

use regex::Regex;
use std::sync::OnceLock;

const KEYWORDS: &str = "function|return|if|else|for|while|var|let|const|class|import|export|from|try|catch|throw|new|this|null|undefined|true|false";

fn keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"\b({KEYWORDS})\b")).expect("keyword regex"))
}

fn string_re() -> &'static Regex {
    // Double quotes arrive as &quot; after escaping; span markup uses raw
    // quotes, so decorated text is never re-matched by this pass.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(&quot;.*?&quot;|'.*?')").expect("string regex"))
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d+)\b").expect("number regex"))
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(//.*|/\*.*?\*/)").expect("comment regex"))
}

/// One line of a snippet after decoration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetLine {
    /// The line content with token spans applied
    pub html: String,
    /// True when the line looks like the finding line of the excerpt
    pub highlighted: bool,
}

/// Heuristic for "this is the finding line": contains `": "` but no run
/// of two spaces. Excerpt lines carry a `N: ` prefix on the finding line
/// and `N  ` on context lines, which is what this keys off. False
/// positives on lines that merely look like that are accepted.
pub fn is_error_line(line: &str) -> bool {
    line.contains(": ") && !line.contains("  ")
}

/// Escape for embedding in markup. Single quotes are left alone: they are
/// harmless in text content and the string pass pairs on them.
fn escape_snippet(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Apply the four token passes to a single line, in fixed order
pub fn decorate_line(line: &str) -> String {
    let escaped = escape_snippet(line);
    let keywords = keyword_re().replace_all(&escaped, "<span class=\"keyword\">${1}</span>");
    let strings = string_re().replace_all(&keywords, "<span class=\"string\">${1}</span>");
    let numbers = number_re().replace_all(&strings, "<span class=\"number\">${1}</span>");
    let comments = comment_re().replace_all(&numbers, "<span class=\"comment\">${1}</span>");
    comments.into_owned()
}

/// Decorate every line of a snippet, preserving line order. A trailing
/// newline yields a final empty line, matching a plain split on '\n'.
pub fn snippet_lines(text: &str) -> Vec<SnippetLine> {
    text.split('\n')
        .map(|line| SnippetLine {
            html: decorate_line(line),
            highlighted: is_error_line(line),
        })
        .collect()
}

/// Render a snippet as a block of per-line divs, finding line flagged
/// with the `highlighted-line` class. The result replaces the code
/// element's content wholesale.
pub fn highlight_snippet(text: &str) -> String {
    snippet_lines(text)
        .iter()
        .map(|line| {
            let class = if line.highlighted { "highlighted-line" } else { "" };
            format!("<div class=\"{}\">{}</div>", class, line.html)
        })
        .collect()
}
