//! Phrase matching and snippet extraction
//!
//! Matching is case-insensitive. The cheap check runs over raw markup; snippets
//! are cut from the visible text of the document.

use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Characters of context kept around a match, split evenly before and after
pub const SNIPPET_CONTEXT_CHARS: usize = 150;

/// Elements whose content is data rather than text
const DATA_ELEMENTS: &[&str] = &["script", "style"];

/// Elements that start a new line when rendered, so their text is space-separated
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul", "body", "option", "title",
    "noscript",
];

/// Returns true if the raw markup contains the phrase, ignoring case
///
/// Case folding is the same per-character folding the snippet search uses, so
/// a page that passes this check is searched with the same notion of equality.
pub fn contains_phrase(html: &str, phrase: &str) -> bool {
    fold_str(html).contains(&fold_str(phrase))
}

/// Builds a context snippet around the first occurrence of `phrase`
///
/// The search runs over the document's visible text. When the phrase starts at
/// character `i`, the snippet spans `[i - 75, i + len(phrase) + 75)`, clamped to
/// the text, with whitespace runs collapsed and ends trimmed.
///
/// Returns an empty string when the phrase does not occur in the visible text.
///
/// # Example
///
/// ```
/// use site_word_finder::crawler::find_snippet;
///
/// let html = "<html><body><p>Say <b>Lorem</b> ipsum dolor</p></body></html>";
/// assert_eq!(find_snippet(html, "lorem ipsum"), "Say Lorem ipsum dolor");
/// ```
pub fn find_snippet(html: &str, phrase: &str) -> String {
    let text = visible_text(html);
    snippet_from_text(&text, phrase, SNIPPET_CONTEXT_CHARS)
}

/// Cuts a snippet out of already-extracted text
fn snippet_from_text(text: &str, phrase: &str, context_chars: usize) -> String {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = phrase.chars().map(fold_case).collect();

    if needle.is_empty() || needle.len() > haystack.len() {
        return String::new();
    }

    let folded: Vec<char> = haystack.iter().copied().map(fold_case).collect();
    let Some(idx) = folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
    else {
        return String::new();
    };

    let half = context_chars / 2;
    let start = idx.saturating_sub(half);
    let end = (idx + needle.len() + half).min(haystack.len());

    let excerpt: String = haystack[start..end].iter().collect();
    collapse_whitespace(&excerpt)
}

fn fold_str(s: &str) -> String {
    s.chars().map(fold_case).collect()
}

/// Lowercases a single character without changing character counts
///
/// Characters whose lowercase form is longer than one character (`İ`) are
/// left as they are.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Extracts the document text, whitespace-normalized
///
/// Everything except `script` and `style` content is kept, including the
/// title. `noscript` content arrives as raw markup and is re-parsed so its
/// tags do not leak into the text.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if DATA_ELEMENTS.contains(&name) {
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push(' ');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) if name == "noscript" => {
                let fragment = Html::parse_fragment(text);
                collect_text(fragment.root_element(), out);
            }
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push(' ');
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
