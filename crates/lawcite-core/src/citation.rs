//! Citation detection and link rewriting for assistant-generated text.
//!
//! Scans free-form text for Philippine statutory citations and rewrites
//! each mention as a markdown link under the custom `law:` scheme, so the
//! rendering layer can intercept clicks and route them to a lookup rather
//! than ordinary navigation:
//!
//! ```text
//! "RA 9514 requires..."  →  "[**RA 9514**](law:RA%209514) requires..."
//! ```
//!
//! # Recognised citation forms
//!
//! - Republic Acts: "RA 9514", "R.A. 9514", "Republic Act 9514"
//! - Presidential Decrees: "PD 1096", "P.D. 1096", "Presidential Decree 1096"
//! - Rules by roman numeral: "Rule VII"
//! - Batas Pambansa ("BP 344") is in the pattern table but disabled
//!
//! Keywords match case-insensitively; the visible label keeps the matched
//! text exactly as written, while the link target carries the normalised
//! `"<prefix> <number>"` identifier the lookup endpoint accepts.
//!
//! # Overlap avoidance
//!
//! Patterns run in a fixed order over the original input with explicit
//! consumed-span tracking: spans already wrapped in a `law:` link token,
//! spans sitting against link brackets, and spans claimed by an earlier
//! pattern are all skipped. This makes [`annotate`] idempotent without
//! relying on regex lookaround.

use std::ops::Range;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters escaped in `law:` link targets.
///
/// Everything non-alphanumeric except the URL-unreserved marks, so standard
/// URL decoding on the consumer side recovers the identifier exactly
/// ("RA 9514" → "RA%209514").
const LAW_TARGET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The closed set of citation families the annotator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationKind {
    RepublicAct,
    PresidentialDecree,
    /// Kept in the pattern table but disabled: upstream sources encode the
    /// "BP" abbreviation too unreliably to link, so "BP 344" stays plain
    /// text until that is fixed.
    BatasPambansa,
    Rule,
}

impl CitationKind {
    /// Canonical prefix used in normalised identifiers ("RA 9514").
    pub fn prefix(self) -> &'static str {
        match self {
            CitationKind::RepublicAct => "RA",
            CitationKind::PresidentialDecree => "PD",
            CitationKind::BatasPambansa => "BP",
            CitationKind::Rule => "Rule",
        }
    }
}

/// A single citation occurrence found in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationMention {
    /// The exact substring that matched, casing and spacing preserved.
    pub matched: String,
    pub kind: CitationKind,
    /// Canonical lookup key: `"<prefix> <number>"` with one space and the
    /// number verbatim from the match.
    pub normalized_id: String,
    /// Byte range of the match in the input. Mentions never overlap.
    pub span: Range<usize>,
}

struct CitationPattern {
    kind: CitationKind,
    regex: Regex,
    enabled: bool,
}

/// Patterns in application order. The number is always capture group 1.
static PATTERNS: LazyLock<Vec<CitationPattern>> = LazyLock::new(|| {
    let pattern = |kind, re: &str, enabled| CitationPattern {
        kind,
        regex: Regex::new(re).expect("valid citation pattern"),
        enabled,
    };
    vec![
        pattern(
            CitationKind::RepublicAct,
            r"(?i)(?:R\.?A\.?|Republic Act)\s+(\d+)",
            true,
        ),
        pattern(
            CitationKind::PresidentialDecree,
            r"(?i)(?:P\.?D\.?|Presidential Decree)\s+(\d+)",
            true,
        ),
        // Disabled at user request: bad source encoding of "BP".
        pattern(
            CitationKind::BatasPambansa,
            r"(?i)(?:B\.?P\.?|Batas Pambansa)\s+(\d+)",
            false,
        ),
        pattern(CitationKind::Rule, r"(?i)Rule\s+([IVXLCDM]+)", true),
    ]
});

/// Matches a link token this module itself emits. Spans matched here were
/// rewritten by a previous [`annotate`] pass and must not match again.
static LINK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\*\*[^\]]*\*\*\]\(law:[^)]*\)").expect("valid link token pattern")
});

/// Find every linkable citation in `text`, in order of appearance.
///
/// Candidates inside an existing `law:` link token, candidates sitting
/// directly against link brackets, and candidates overlapping a span
/// claimed by an earlier pattern are skipped.
pub fn detect(text: &str) -> Vec<CitationMention> {
    if text.is_empty() {
        return Vec::new();
    }

    // Spans a previous annotate pass already rewrote.
    let mut claimed: Vec<Range<usize>> = LINK_TOKEN.find_iter(text).map(|m| m.range()).collect();

    let mut mentions = Vec::new();
    for pattern in PATTERNS.iter().filter(|p| p.enabled) {
        for caps in pattern.regex.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always participates");
            if overlaps_any(&claimed, &whole.range()) || bracket_adjacent(text, &whole.range()) {
                continue;
            }
            let number = caps.get(1).expect("citation patterns capture the number");
            claimed.push(whole.range());
            mentions.push(CitationMention {
                matched: whole.as_str().to_string(),
                kind: pattern.kind,
                normalized_id: format!("{} {}", pattern.kind.prefix(), number.as_str()),
                span: whole.range(),
            });
        }
    }

    mentions.sort_by_key(|m| m.span.start);
    tracing::debug!(count = mentions.len(), "citation mentions detected");
    mentions
}

/// Rewrite every detected citation in `text` as a `law:` markdown link.
///
/// Text outside mentions is copied byte for byte; the visible label keeps
/// the matched text exactly; the link target is the percent-encoded
/// normalised identifier. Running the output through `annotate` again is a
/// no-op. Never fails: any input string is valid.
pub fn annotate(text: &str) -> String {
    let mentions = detect(text);
    if mentions.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + mentions.len() * 16);
    let mut cursor = 0;
    for mention in &mentions {
        out.push_str(&text[cursor..mention.span.start]);
        let target = utf8_percent_encode(&mention.normalized_id, LAW_TARGET);
        out.push_str(&format!("[**{}**](law:{})", mention.matched, target));
        cursor = mention.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn overlaps_any(claimed: &[Range<usize>], span: &Range<usize>) -> bool {
    claimed.iter().any(|c| span.start < c.end && c.start < span.end)
}

/// True when the match starts straight after `[` or ends straight before
/// `]` — half-rewritten markup from the caller's side, left alone.
fn bracket_adjacent(text: &str, span: &Range<usize>) -> bool {
    let bytes = text.as_bytes();
    (span.start > 0 && bytes[span.start - 1] == b'[') || bytes.get(span.end) == Some(&b']')
}
