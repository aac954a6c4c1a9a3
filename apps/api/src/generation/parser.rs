//! Response Parser — turns the model's free-text Learning Drop message into
//! typed, renderable blocks.
//!
//! The model is INSTRUCTED to follow the output contract in
//! `generation::prompts`, but its output is not guaranteed to comply. Each
//! line therefore degrades gracefully through an ordered chain:
//! structured resource entry → bare markdown link → plain text. Parsing
//! never fails; every line maps to exactly one block.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Literal marker the prompt contract puts on the title line.
pub const TITLE_MARKER: &str = "Your Learning Drop";

const HARD_SKILLS_MARKER: &str = "**Hard Skills**";
const SOFT_SKILLS_MARKER: &str = "**Soft Skills**";

/// Placeholder type for entries matched by the fallback pattern, where the
/// dash-separated price/type suffix was malformed or missing.
pub const FALLBACK_RESOURCE_TYPE: &str = "Link";

/// One renderable block of the parsed message. Order mirrors the input;
/// blank lines produce no block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedBlock {
    /// The title line ("Your Learning Drop 🚀").
    Heading { text: String },
    /// A subsection marker with the `**` emphasis stripped.
    SubHeading { text: String },
    /// A recommended resource. `price` is empty and `resource_type` is
    /// "Link" when only the fallback pattern matched.
    ResourceEntry {
        title: String,
        url: String,
        price: String,
        resource_type: String,
    },
    /// Anything else, verbatim and untrimmed.
    PlainLine { text: String },
}

/// Full structured entry, anchored to the whole trimmed line:
/// `[**Title**](https://url) — Price — (Type 🎓)`.
/// The separator class accepts hyphen, en-dash, and em-dash mixed with
/// whitespace, since models drift between dash variants.
fn primary_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\[\*\*(?P<title>.*?)\*\*\]\((?P<url>https?://\S+)\)[\s—–-]+(?P<price>.*?)[\s—–-]+\((?P<rtype>.*?)\)$",
        )
        .expect("primary resource pattern is valid")
    })
}

/// Bare markdown bold link anywhere in the line — the degraded form.
fn fallback_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\*\*(?P<title>.*?)\*\*\]\((?P<url>https?://\S+)\)")
            .expect("fallback resource pattern is valid")
    })
}

/// Parses a raw model message into ordered blocks. Total: never errors,
/// deterministic, one block per non-blank line.
pub fn parse(message: &str) -> Vec<ParsedBlock> {
    message.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ParsedBlock> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(TITLE_MARKER) {
        return Some(ParsedBlock::Heading {
            text: trimmed.to_string(),
        });
    }

    if trimmed == HARD_SKILLS_MARKER || trimmed == SOFT_SKILLS_MARKER {
        return Some(ParsedBlock::SubHeading {
            text: trimmed.replace("**", ""),
        });
    }

    if let Some(captures) = primary_pattern().captures(trimmed) {
        return Some(ParsedBlock::ResourceEntry {
            title: captures["title"].trim().to_string(),
            url: captures["url"].trim().to_string(),
            price: captures["price"].trim().to_string(),
            resource_type: captures["rtype"].trim().to_string(),
        });
    }

    if let Some(captures) = fallback_pattern().captures(trimmed) {
        return Some(ParsedBlock::ResourceEntry {
            title: captures["title"].trim().to_string(),
            url: captures["url"].trim().to_string(),
            price: String::new(),
            resource_type: FALLBACK_RESOURCE_TYPE.to_string(),
        });
    }

    Some(ParsedBlock::PlainLine {
        text: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, url: &str, price: &str, resource_type: &str) -> ParsedBlock {
        ParsedBlock::ResourceEntry {
            title: title.to_string(),
            url: url.to_string(),
            price: price.to_string(),
            resource_type: resource_type.to_string(),
        }
    }

    #[test]
    fn test_full_message_scenario() {
        let message = "Hey Sam, welcome.\nYour Learning Drop 🚀\n**Hard Skills**\n[**Go Programming**](https://example.com/go) — Free — (Book 📚)\n";
        let blocks = parse(message);
        assert_eq!(
            blocks,
            vec![
                ParsedBlock::PlainLine {
                    text: "Hey Sam, welcome.".to_string()
                },
                ParsedBlock::Heading {
                    text: "Your Learning Drop 🚀".to_string()
                },
                ParsedBlock::SubHeading {
                    text: "Hard Skills".to_string()
                },
                entry("Go Programming", "https://example.com/go", "Free", "Book 📚"),
            ]
        );
    }

    #[test]
    fn test_primary_pattern_trims_captures() {
        let blocks = parse("[** System Design **](https://ex.com/sd) —  $45 USD  — ( Book 📚 )");
        assert_eq!(
            blocks,
            vec![entry("System Design", "https://ex.com/sd", "$45 USD", "Book 📚")]
        );
    }

    #[test]
    fn test_primary_pattern_accepts_hyphen_and_en_dash_separators() {
        let hyphen = parse("[**Go**](https://ex.com/go) - Free - (Course 🎓)");
        assert_eq!(hyphen, vec![entry("Go", "https://ex.com/go", "Free", "Course 🎓")]);

        let en_dash = parse("[**Go**](https://ex.com/go) – Paid – (Video 🎬)");
        assert_eq!(en_dash, vec![entry("Go", "https://ex.com/go", "Paid", "Video 🎬")]);
    }

    #[test]
    fn test_primary_pattern_accepts_local_currency_price() {
        let blocks = parse("[**Kubernetes**](https://ex.com/k8s) — COP 120.000 — (Course 🎓)");
        assert_eq!(
            blocks,
            vec![entry("Kubernetes", "https://ex.com/k8s", "COP 120.000", "Course 🎓")]
        );
    }

    #[test]
    fn test_malformed_suffix_degrades_to_fallback_not_plain_line() {
        // Missing parentheses around the type.
        let blocks = parse("[**Mentorship**](https://ex.com/m) — Free — Course");
        assert_eq!(blocks, vec![entry("Mentorship", "https://ex.com/m", "", "Link")]);
    }

    #[test]
    fn test_missing_suffix_degrades_to_fallback() {
        let blocks = parse("Check out [**Go**](https://ex.com/go) when you can.");
        assert_eq!(blocks, vec![entry("Go", "https://ex.com/go", "", "Link")]);
    }

    #[test]
    fn test_non_http_url_is_plain_line() {
        let line = "[**Go**](ftp://ex.com/go) — Free — (Book 📚)";
        assert_eq!(
            parse(line),
            vec![ParsedBlock::PlainLine {
                text: line.to_string()
            }]
        );
    }

    #[test]
    fn test_url_with_whitespace_fails_primary_anchor() {
        // `\S+` forbids internal whitespace in the URL, and the space keeps
        // the closing paren unreachable for the fallback too.
        let line = "[**Go**](https://ex .com) — Free — (Book 📚)";
        assert_eq!(
            parse(line),
            vec![ParsedBlock::PlainLine {
                text: line.to_string()
            }]
        );
    }

    #[test]
    fn test_unstructured_lines_are_verbatim_and_untrimmed() {
        let message = "  leading spaces preserved\nplain text line";
        assert_eq!(
            parse(message),
            vec![
                ParsedBlock::PlainLine {
                    text: "  leading spaces preserved".to_string()
                },
                ParsedBlock::PlainLine {
                    text: "plain text line".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_blank_lines_produce_no_block() {
        assert!(parse("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_title_marker_matches_by_containment() {
        let blocks = parse("  ✨ Your Learning Drop 🚀 ✨  ");
        assert_eq!(
            blocks,
            vec![ParsedBlock::Heading {
                text: "✨ Your Learning Drop 🚀 ✨".to_string()
            }]
        );
    }

    #[test]
    fn test_subheadings_strip_emphasis() {
        let blocks = parse("**Hard Skills**\n**Soft Skills**");
        assert_eq!(
            blocks,
            vec![
                ParsedBlock::SubHeading {
                    text: "Hard Skills".to_string()
                },
                ParsedBlock::SubHeading {
                    text: "Soft Skills".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_subheading_requires_exact_match() {
        // A sentence mentioning the marker text is not a subheading.
        let blocks = parse("Here are your **Hard Skills** picks:");
        assert_eq!(
            blocks,
            vec![ParsedBlock::PlainLine {
                text: "Here are your **Hard Skills** picks:".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let message = "Hey Sam.\nYour Learning Drop 🚀\n**Hard Skills**\n\
            [**Go**](https://ex.com/go) — Free — (Book 📚)\n\
            [**K8s**](https://ex.com/k8s) broken suffix\nGo crush it.";
        assert_eq!(parse(message), parse(message));
    }

    #[test]
    fn test_ordering_is_preserved_across_mixed_lines() {
        let message = "intro\n[**A**](https://a.io) — Free — (Article 📰)\nmiddle\n[**B**](https://b.io)\noutro";
        let blocks = parse(message);
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], ParsedBlock::PlainLine { .. }));
        assert_eq!(blocks[1], entry("A", "https://a.io", "Free", "Article 📰"));
        assert!(matches!(blocks[2], ParsedBlock::PlainLine { .. }));
        assert_eq!(blocks[3], entry("B", "https://b.io", "", "Link"));
        assert!(matches!(blocks[4], ParsedBlock::PlainLine { .. }));
    }

    #[test]
    fn test_blocks_serialize_with_kind_tag() {
        let json = serde_json::to_value(ParsedBlock::SubHeading {
            text: "Hard Skills".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "sub_heading");
        assert_eq!(json["text"], "Hard Skills");
    }
}
