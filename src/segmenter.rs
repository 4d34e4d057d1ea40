//! Division/subtitle segmentation for regulatory documents.
//!
//! Documents follow a two-level marker convention: `DIVISION <roman numeral>`
//! for top-level units and `SUBTITLE <number><optional letters>. <description>`
//! for the units nested under them. [`Segmenter`] scans for those markers and
//! produces a flat, document-ordered list of labeled sections. No deeper
//! nesting is recognized.
//!
//! Malformed documents never fail segmentation; they silently produce
//! incomplete or empty results instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SegmenterConfig;
use crate::types::{DivisionOutline, Section};

static DIVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DIVISION [IVXLCDM]+").unwrap());
static SUBTITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"SUBTITLE \d+[A-Z]*\.").unwrap());

const SUBTITLE_PREFIX_LEN: usize = "SUBTITLE ".len();

/// Marker substrings that denote empty regulatory slots. Subtitles ending in
/// one of these carry no retrievable content and are dropped from output.
const PLACEHOLDER_SUFFIXES: [&str; 2] = ["{Reserved}", "{Vacant}"];

// ── Segmenter ──────────────────────────────────────────────────────────

/// Scans a document for division/subtitle markers and extracts section
/// records.
///
/// The segmenter is stateless between calls; sections only live for the
/// duration of one [`split_sections`](Self::split_sections) pass.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Create a segmenter with the given configuration.
    #[must_use]
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Create a segmenter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SegmenterConfig::default())
    }

    /// Map each division marker to the cleaned subtitles found in its span,
    /// in document order.
    ///
    /// A division's span runs from its marker to the next division marker
    /// (or end of document). A division whose span contains no retained
    /// subtitles still appears in the outline with an empty subtitle list.
    pub fn outline(&self, document: &str) -> Vec<DivisionOutline> {
        let divisions: Vec<regex::Match<'_>> = DIVISION_RE.find_iter(document).collect();
        let mut outlines = Vec::with_capacity(divisions.len());

        for (idx, division) in divisions.iter().enumerate() {
            let span_end = divisions
                .get(idx + 1)
                .map_or(document.len(), |next| next.start());
            let span = &document[division.start()..span_end];

            outlines.push(DivisionOutline {
                title: division.as_str().to_string(),
                subtitles: self.subtitles_in_span(span),
            });
        }

        outlines
    }

    /// Extract the content belonging to `title` from the full document.
    ///
    /// The content spans from the first literal occurrence of `title` to the
    /// next literal `DIVISION` strictly after the start, so a title that
    /// itself begins a division block does not terminate on its own marker.
    /// A missing title is non-fatal: a warning is logged and `""` returned.
    pub fn section_content(&self, title: &str, document: &str) -> String {
        let Some(start) = document.find(title) else {
            tracing::warn!(title, "section title not found in document");
            return String::new();
        };

        let end = document[start..]
            .match_indices("DIVISION")
            .find(|(offset, _)| *offset > 0)
            .map_or(document.len(), |(offset, _)| start + offset);

        document[start..end].to_string()
    }

    /// Segment the full document into one [`Section`] per retained subtitle.
    ///
    /// Order follows division order, then subtitle order within each
    /// division, as produced by [`outline`](Self::outline). Subtitles whose
    /// text cannot be located in the document yield empty content (see
    /// [`section_content`](Self::section_content)).
    pub fn split_sections(&self, document: &str) -> Vec<Section> {
        let mut sections = Vec::new();

        for outline in self.outline(document) {
            for subtitle in outline.subtitles {
                let content = self.section_content(&subtitle, document);
                sections.push(Section {
                    title: outline.title.clone(),
                    subtitle,
                    content,
                });
            }
        }

        sections
    }

    /// Collect cleaned subtitles from one division span.
    ///
    /// Each description runs from its `SUBTITLE <n>.` header to the next
    /// `SUBTITLE` or `DIVISION` occurrence within the span (or the span
    /// end). Descriptions shorter than the configured minimum are treated
    /// as truncated fragments and skipped.
    fn subtitles_in_span(&self, span: &str) -> Vec<String> {
        let mut subtitles = Vec::new();

        for header in SUBTITLE_RE.find_iter(span) {
            let marker = header.as_str();
            // "SUBTITLE 12A." → "12A": drop the prefix and trailing period.
            let number = &marker[SUBTITLE_PREFIX_LEN..marker.len() - 1];

            let boundary = next_marker(span, header.end());
            let raw = span[header.end()..boundary].trim_start();
            if raw.chars().count() < self.config.min_description_chars {
                continue;
            }

            // Guard against a mis-scoped description spilling past a bare
            // "DIVISION" token the boundary scan could not anchor on.
            let description = raw.split("DIVISION").next().unwrap_or(raw);
            let description = description.replace('\n', " ");
            let subtitle = format!("{number} {}", description.trim());

            if PLACEHOLDER_SUFFIXES
                .iter()
                .any(|suffix| subtitle.ends_with(suffix))
            {
                continue;
            }

            subtitles.push(subtitle);
        }

        subtitles
    }
}

/// Position of the next `SUBTITLE` or `DIVISION` occurrence at or after
/// `from`, or the span length when neither occurs.
fn next_marker(span: &str, from: usize) -> usize {
    let rest = &span[from..];
    match (rest.find("SUBTITLE"), rest.find("DIVISION")) {
        (Some(a), Some(b)) => from + a.min(b),
        (Some(a), None) => from + a,
        (None, Some(b)) => from + b,
        (None, None) => span.len(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
