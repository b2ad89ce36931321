//! Section slicing.
//!
//! Every structured field in a project document lives in a block that
//! starts at a literal header and runs until the next header of some kind.
//! [`slice_section`] is the one primitive all field extractors share.

/// Where a section body stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminator<'a> {
    /// A line beginning with this literal (matched as `"\n" + literal`).
    Line(&'a str),
    /// The end of the document.
    EndOfInput,
}

/// Top-level `## ` header.
pub const NEXT_H2: Terminator<'static> = Terminator::Line("## ");

/// Return the body of the section introduced by `marker`.
///
/// The rest of the marker's line is ignored. The body starts after the
/// blank line that follows the header line and ends at the earliest
/// terminator. Returns `None` if the marker is absent, the header line is
/// not followed by a blank line, or no terminator matches.
///
/// If the first occurrence of `marker` does not open a well-formed section,
/// later occurrences are tried in order.
///
/// ```
/// use folio_content::section::{slice_section, Terminator, NEXT_H2};
///
/// let doc = "## The Problem: why\n\nSlow builds.\n\n## The Solution:\n\nCache.";
/// assert_eq!(
///     slice_section(doc, "## The Problem:", &[NEXT_H2]),
///     Some("Slow builds.\n")
/// );
/// assert_eq!(
///     slice_section(doc, "## The Solution:", &[Terminator::EndOfInput]),
///     Some("Cache.")
/// );
/// ```
pub fn slice_section<'t>(
    text: &'t str,
    marker: &str,
    terminators: &[Terminator<'_>],
) -> Option<&'t str> {
    if marker.is_empty() {
        return None;
    }
    text.match_indices(marker)
        .find_map(|(start, _)| body_at(text, start + marker.len(), terminators))
}

fn body_at<'t>(text: &'t str, after_marker: usize, terminators: &[Terminator<'_>]) -> Option<&'t str> {
    let line_end = after_marker + text[after_marker..].find('\n')?;
    if !text[line_end..].starts_with("\n\n") {
        return None;
    }
    let rest = &text[line_end + 2..];
    let end = terminators
        .iter()
        .filter_map(|t| match t {
            Terminator::Line(prefix) => rest.find(&format!("\n{prefix}")),
            Terminator::EndOfInput => Some(rest.len()),
        })
        .min()?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_marker() {
        assert_eq!(slice_section("nothing here", "## The Problem:", &[NEXT_H2]), None);
    }

    #[test]
    fn test_empty_marker() {
        assert_eq!(slice_section("text", "", &[Terminator::EndOfInput]), None);
    }

    #[test]
    fn test_trailing_header_text_ignored() {
        let doc = "## The Problem: Why it hurts\n\nBody.\n## Next\n";
        assert_eq!(slice_section(doc, "## The Problem:", &[NEXT_H2]), Some("Body."));
    }

    #[test]
    fn test_requires_blank_line_after_header() {
        let doc = "## The Problem:\nBody.\n\n## Next\n";
        assert_eq!(slice_section(doc, "## The Problem:", &[NEXT_H2]), None);
    }

    #[test]
    fn test_no_terminator_without_end_of_input() {
        let doc = "## The Problem:\n\nBody without a following header.";
        assert_eq!(slice_section(doc, "## The Problem:", &[NEXT_H2]), None);
    }

    #[test]
    fn test_end_of_input() {
        let doc = "## The Solution:\n\nAll the rest.";
        assert_eq!(
            slice_section(doc, "## The Solution:", &[Terminator::EndOfInput]),
            Some("All the rest.")
        );
    }

    #[test]
    fn test_earliest_terminator_wins() {
        let doc = "## The Solution:\n\nA\n### Key Features\n\nB\n## Tail\n";
        let body = slice_section(
            doc,
            "## The Solution:",
            &[Terminator::Line("### Key Features"), Terminator::EndOfInput],
        );
        assert_eq!(body, Some("A"));
    }

    #[test]
    fn test_h3_is_not_an_h2_terminator() {
        let doc = "## The Problem:\n\nA\n### Detail\n\nB\n## Next\n";
        assert_eq!(
            slice_section(doc, "## The Problem:", &[NEXT_H2]),
            Some("A\n### Detail\n\nB")
        );
    }

    #[test]
    fn test_later_occurrence_tried() {
        let doc = "See ## The Problem: inline\nno blank\n## The Problem:\n\nReal.\n## End\n";
        assert_eq!(slice_section(doc, "## The Problem:", &[NEXT_H2]), Some("Real."));
    }

    #[test]
    fn test_marker_at_end_of_text() {
        assert_eq!(slice_section("## The Results", "## The Results", &[Terminator::EndOfInput]), None);
    }
}
