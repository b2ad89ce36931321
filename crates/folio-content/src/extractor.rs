//! Project content extraction.
//!
//! Scrapes the display fields of a project write-up out of its markdown
//! body. Each field is an independent scan of the whole document, and a
//! field whose section is missing or malformed is left empty. Nothing in
//! this module returns an error.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::section::{NEXT_H2, Terminator, slice_section};

/// Header of the problem statement.
pub const PROBLEM_MARKER: &str = "## The Problem:";
/// Header of the solution statement.
pub const SOLUTION_MARKER: &str = "## The Solution:";
/// Header of the feature list.
pub const FEATURES_MARKER: &str = "### Key Features";
/// Header of the results/impact block.
pub const RESULTS_MARKER: &str = "## The Results";

/// Sentences at or below this many characters are dropped by the impact
/// prose fallback.
pub const DEFAULT_MIN_SENTENCE_LEN: usize = 20;

static FEATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*:?\s*([^:\s].*)$").expect("valid feature regex"));

static CHIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<Chip>([^<]+)</Chip>").expect("valid chip regex"));

static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+").expect("valid sentence regex"));

// ============================================================================
// Types
// ============================================================================

/// Display fields extracted from one project document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedContent {
    /// Problem statement.
    pub problem: String,
    /// Solution statement.
    pub solution: String,
    /// Feature bullets, `"Label: detail"` where the bullet had a bold label.
    pub features: Vec<String>,
    /// Impact statements.
    pub impact: Vec<String>,
    /// Labels of every `<Chip>` tag, in document order.
    pub tech_stack: Vec<String>,
}

impl ParsedContent {
    /// Names of the fields that came back empty.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if self.problem.is_empty() {
            empty.push("problem");
        }
        if self.solution.is_empty() {
            empty.push("solution");
        }
        if self.features.is_empty() {
            empty.push("features");
        }
        if self.impact.is_empty() {
            empty.push("impact");
        }
        if self.tech_stack.is_empty() {
            empty.push("techStack");
        }
        empty
    }

    /// True if nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.empty_fields().len() == 5
    }
}

/// Tunables for [`ContentExtractor`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Minimum sentence length (exclusive, in characters) kept by the
    /// impact prose fallback.
    #[serde(deserialize_with = "usize_or_string")]
    pub min_sentence_len: usize,
}

/// Accepts `5` or `"5"`; environment overlays hand every value over as a
/// string.
fn usize_or_string<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid length '{s}': {e}"))),
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_sentence_len: DEFAULT_MIN_SENTENCE_LEN,
        }
    }
}

/// How the impact entries were obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImpactSource {
    /// No results section.
    Missing,
    /// A results header with nothing under it.
    Empty,
    /// Bullet lines of the results section.
    Bullets,
    /// Prose split into sentences; `dropped` sentences were too short.
    Sentences { dropped: usize },
    /// No sentence qualified, so the whole block became one entry.
    WholeBlock,
}

/// Impact entries together with how they were produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImpactExtraction {
    /// The entries.
    pub entries: Vec<String>,
    /// How they were produced.
    pub source: ImpactSource,
}

// ============================================================================
// Extractor
// ============================================================================

/// Extracts [`ParsedContent`] from a document body.
#[derive(Clone, Debug, Default)]
pub struct ContentExtractor {
    options: ExtractOptions,
}

impl ContentExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every field. Pure: the same text always yields the same result.
    pub fn parse(&self, document: &str) -> ParsedContent {
        let text = normalize_newlines(document);
        ParsedContent {
            problem: problem(&text),
            solution: solution(&text),
            features: features(&text),
            impact: self.impact(&text).entries,
            tech_stack: tech_stack(&text),
        }
    }

    /// Extract the impact entries and report how they were derived.
    pub fn impact(&self, document: &str) -> ImpactExtraction {
        let text = normalize_newlines(document);
        let Some(block) = slice_section(
            &text,
            RESULTS_MARKER,
            &[Terminator::Line("<div"), NEXT_H2, Terminator::EndOfInput],
        ) else {
            return ImpactExtraction {
                entries: Vec::new(),
                source: ImpactSource::Missing,
            };
        };

        let block = block.trim();
        if block.is_empty() {
            return ImpactExtraction {
                entries: Vec::new(),
                source: ImpactSource::Empty,
            };
        }

        let bullets: Vec<String> = block.lines().filter_map(bullet_body).map(String::from).collect();
        if !bullets.is_empty() {
            return ImpactExtraction {
                entries: bullets,
                source: ImpactSource::Bullets,
            };
        }

        let sentences = split_sentences(block);
        let total = sentences.len();
        let kept: Vec<String> = sentences
            .into_iter()
            .filter(|s| s.chars().count() > self.options.min_sentence_len)
            .map(String::from)
            .collect();

        if kept.is_empty() {
            log::debug!("no impact sentence longer than {} chars; using whole block", self.options.min_sentence_len);
            return ImpactExtraction {
                entries: vec![block.to_string()],
                source: ImpactSource::WholeBlock,
            };
        }

        let dropped = total - kept.len();
        if dropped > 0 {
            log::debug!("impact fallback dropped {dropped} short sentence(s)");
        }
        ImpactExtraction {
            entries: kept,
            source: ImpactSource::Sentences { dropped },
        }
    }
}

/// Extract with default options.
///
/// ```
/// let doc = "## The Problem:\n\nFoo bar.\n\n## The Solution:\n\nBaz.\n";
/// let parsed = folio_content::parse(doc);
/// assert_eq!(parsed.problem, "Foo bar.");
/// assert_eq!(parsed.solution, "Baz.");
/// ```
pub fn parse(document: &str) -> ParsedContent {
    ContentExtractor::default().parse(document)
}

// ============================================================================
// Field scrapers
// ============================================================================

fn problem(text: &str) -> String {
    slice_section(text, PROBLEM_MARKER, &[NEXT_H2])
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn solution(text: &str) -> String {
    slice_section(
        text,
        SOLUTION_MARKER,
        &[Terminator::Line(FEATURES_MARKER), Terminator::EndOfInput],
    )
    .map(|s| s.trim().to_string())
    .unwrap_or_default()
}

fn features(text: &str) -> Vec<String> {
    let Some(block) = slice_section(text, FEATURES_MARKER, &[NEXT_H2]) else {
        return Vec::new();
    };
    block.lines().filter_map(bullet_body).map(format_feature).collect()
}

fn format_feature(body: &str) -> String {
    match FEATURE_RE.captures(body) {
        Some(caps) => {
            let label = caps[1].trim().trim_end_matches(':').trim_end();
            format!("{}: {}", label, caps[2].trim())
        }
        None => body.to_string(),
    }
}

fn tech_stack(text: &str) -> Vec<String> {
    CHIP_RE
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// The text of a `- item` line, without the marker. Only lines that start
/// at column zero count.
fn bullet_body(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let body = rest.trim();
    (!body.is_empty()).then_some(body)
}

/// Split prose after each `". "`; the period stays with its sentence.
fn split_sentences(prose: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK_RE.find_iter(prose) {
        sentences.push(prose[start..m.start() + 1].trim());
        start = m.end();
    }
    sentences.push(prose[start..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}

// ============================================================================
// Tests
// ============================================================================
