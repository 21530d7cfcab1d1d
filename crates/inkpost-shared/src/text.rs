//! Plain-text helpers for condensed views (cards, sidebars, comment
//! previews). Primary post content is rendered as trusted HTML elsewhere and
//! never goes through here.

use scraper::{ElementRef, Html, Node};

/// Zero-width space inserted as a line-break opportunity.
pub const BREAK_HINT: char = '\u{200B}';

/// Longest unbroken run allowed before break hints are inserted.
pub const DEFAULT_MAX_RUN_LENGTH: usize = 35;

/// Elements whose boundaries separate words in the rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p",
    "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Elements whose text content is never shown.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Strip all markup from `html`, returning entity-decoded plain text with
/// whitespace collapsed.
///
/// Decoding can surface new markup (`&lt;b&gt;` becomes `<b>`), so the pass
/// is repeated until the text stops changing. The result is idempotent and
/// contains no tags.
pub fn strip_markup(html: &str) -> String {
    let mut current = strip_once(html);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());
    collect_text(&mut raw, fragment.root_element());
    collapse_whitespace(&raw)
}

fn collect_text(output: &mut String, element: ElementRef<'_>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => output.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                let is_block = BLOCK_ELEMENTS.contains(&name);
                if is_block {
                    output.push(' ');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(output, child_el);
                }
                if is_block {
                    output.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Insert [`BREAK_HINT`]s into every non-whitespace run longer than
/// `max_run_length` characters, one after each full `max_run_length` chunk
/// except at the very end of the run.
///
/// A run of `L > max` characters receives exactly `(L - 1) / max` hints.
/// Shorter runs and all whitespace are left untouched.
pub fn insert_break_hints(text: &str, max_run_length: usize) -> String {
    if max_run_length == 0 {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut run: Vec<char> = Vec::new();

    for c in text.chars() {
        if c.is_whitespace() {
            flush_run(&mut output, &run, max_run_length);
            run.clear();
            output.push(c);
        } else {
            run.push(c);
        }
    }
    flush_run(&mut output, &run, max_run_length);

    output
}

fn flush_run(output: &mut String, run: &[char], max: usize) {
    if run.len() <= max {
        output.extend(run);
        return;
    }

    let mut chunks = run.chunks(max).peekable();
    while let Some(chunk) = chunks.next() {
        output.extend(chunk);
        if chunks.peek().is_some() {
            output.push(BREAK_HINT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use regex::Regex;

    static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Za-z/!?][^>]*>").unwrap());

    fn hints(s: &str) -> usize {
        s.chars().filter(|c| *c == BREAK_HINT).count()
    }

    #[test]
    fn strips_tags_and_decodes_entities() {
        let html = "<p>Hello <strong>world</strong> &amp; friends</p>";
        assert_eq!(strip_markup(html), "Hello world & friends");
    }

    #[test]
    fn block_boundaries_become_spaces() {
        let html = "<h1>Title</h1><p>First</p><ul><li>one</li><li>two</li></ul>";
        assert_eq!(strip_markup(html), "Title First one two");
    }

    #[test]
    fn inline_boundaries_do_not_split_words() {
        assert_eq!(strip_markup("Hel<em>lo</em>"), "Hello");
    }

    #[test]
    fn script_and_style_are_dropped() {
        let html = "<style>p{color:red}</style><p>Visible</p><script>alert(1)</script>";
        assert_eq!(strip_markup(html), "Visible");
    }

    #[test]
    fn escaped_markup_does_not_survive() {
        let html = "&lt;b&gt;bold&lt;/b&gt; text";
        let out = strip_markup(html);
        assert!(!TAG.is_match(&out), "{out}");
        assert_eq!(out, "bold text");
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(strip_markup("a < b and c > d"), "a < b and c > d");
    }

    #[test]
    fn strip_is_idempotent() {
        let samples = [
            "<p>Rust &amp; <em>WebAssembly</em></p>",
            "&amp;lt;i&amp;gt;nested&amp;lt;/i&amp;gt;",
            "plain text",
            "<div><p>  spaced\n\tout  </p></div>",
            "unclosed <b>bold",
            "",
        ];
        for s in samples {
            let once = strip_markup(s);
            assert_eq!(strip_markup(&once), once, "input: {s}");
            assert!(!TAG.is_match(&once), "input: {s}");
        }
    }

    #[test]
    fn layered_encodings_strip_to_text() {
        let cases = [
            (
                "<div><p>&amp;lt;div&amp;gt;&amp;lt;p&amp;gt;deep&amp;lt;/p&amp;gt;&amp;lt;/div&amp;gt;</p></div>",
                "deep",
            ),
            (
                "&amp;amp;lt;script&amp;amp;gt;alert(1)&amp;amp;lt;/script&amp;amp;gt;ok",
                "ok",
            ),
            ("<ul><li>&lt;em&gt;one&lt;/em&gt;</li><li>two</li></ul>", "one two"),
            ("&lt;!-- hidden --&gt;shown", "shown"),
            ("<p>x</p>&lt;", "x <"),
            ("text &lt;", "text <"),
            ("&lt;", "<"),
        ];
        for (input, expected) in cases {
            let out = strip_markup(input);
            assert_eq!(out, expected, "input: {input}");
            assert_eq!(strip_markup(&out), out, "input: {input}");
            assert!(!TAG.is_match(&out), "input: {input}");
        }
    }

    #[test]
    fn dangling_brackets_after_decoding_stay_tag_free() {
        let samples = [
            "a &lt;b",
            "x &lt;/b",
            "&lt;/",
            "<<b>>",
            "<p>&lt;</p><p>&gt;</p>",
            "&amp;lt;&amp;lt;i&amp;gt;&amp;gt;",
            "<div>&lt;p class=&quot;a&gt;b</div>",
        ];
        for s in samples {
            let once = strip_markup(s);
            assert_eq!(strip_markup(&once), once, "input: {s}");
            assert!(!TAG.is_match(&once), "input: {s}: {once}");
        }
    }

    #[test]
    fn short_runs_are_unchanged() {
        let prose = "The quick brown fox jumps over the lazy dog";
        assert_eq!(insert_break_hints(prose, DEFAULT_MAX_RUN_LENGTH), prose);

        let exact = "a".repeat(35);
        assert_eq!(insert_break_hints(&exact, 35), exact);
    }

    #[test]
    fn long_run_gets_floor_hints() {
        for len in [36usize, 70, 71, 105, 106, 200] {
            let run = "x".repeat(len);
            let out = insert_break_hints(&run, 35);
            assert_eq!(hints(&out), (len - 1) / 35, "len {len}");
            assert_eq!(out.replace(BREAK_HINT, ""), run);
        }
    }

    #[test]
    fn hints_land_every_max_chars() {
        let out = insert_break_hints("abcdefgh", 3);
        assert_eq!(out, "abc\u{200B}def\u{200B}gh");
    }

    #[test]
    fn only_long_tokens_are_touched() {
        let url = format!("https://example.com/{}", "p".repeat(40));
        let text = format!("see {url} now");
        let out = insert_break_hints(&text, 35);
        assert!(out.starts_with("see "));
        assert!(out.ends_with(" now"));
        assert_eq!(hints(&out), (url.chars().count() - 1) / 35);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let run = "é".repeat(36);
        assert_eq!(hints(&insert_break_hints(&run, 35)), 1);
    }
}
