//! Attribute extraction from fetched player pages.
//!
//! Each attribute kind has one structural query and one parse rule. The
//! `try_*` functions report why extraction failed; [`extract`] collapses
//! any failure into [`AttributeValue::Missing`].

use crate::fetch::RawDocument;
use crate::normalize::{normalize_text, take_chars};
use crate::query::{first_descendant, next_in_document, StructuralQuery};
use courtside_model::{AttributeKind, AttributeValue};
use scraper::{ElementRef, Html, Node};
use thiserror::Error;

/// The nbasavant.com container holding the measurements block.
pub const WINGSPAN_QUERY: StructuralQuery = StructuralQuery::id("div", "boxes");
/// The nba.com player summary value cell; the first one holds height.
pub const HEIGHT_QUERY: StructuralQuery =
    StructuralQuery::class("p", "PlayerSummary_playerInfoValue__mSfou");
/// The nba.com header line, "Los Angeles Lakers | #23 | Forward" style.
pub const POSITION_QUERY: StructuralQuery = StructuralQuery::class("p", "t11 md:t2");

const WINGSPAN_LABEL: &str = "Wingspan: ";
const WINGSPAN_WIDTH: usize = 5;
const POSITION_FIELD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected format: {0}")]
    UnexpectedFormat(String),

    #[error("parse failure: {0}")]
    ParseFailure(String),
}

/// Extract one attribute, reporting the failure cause.
pub fn try_extract(
    doc: &RawDocument,
    kind: AttributeKind,
) -> Result<AttributeValue, ExtractionError> {
    match kind {
        AttributeKind::Wingspan => try_wingspan(doc.html()).map(AttributeValue::Float),
        AttributeKind::Height => try_height(doc.html()).map(AttributeValue::Integer),
        AttributeKind::Position => try_position(doc.html()).map(AttributeValue::Text),
    }
}

/// Extract one attribute; any failure becomes `Missing`.
pub fn extract(doc: &RawDocument, kind: AttributeKind) -> AttributeValue {
    collapse(kind, try_extract(doc, kind))
}

/// Height and position from a single nba.com page.
pub fn extract_height_and_position(doc: &RawDocument) -> (AttributeValue, AttributeValue) {
    (
        extract(doc, AttributeKind::Height),
        extract(doc, AttributeKind::Position),
    )
}

/// Turn an extraction result into a table value, logging the cause of a miss.
pub fn collapse(
    kind: AttributeKind,
    result: Result<AttributeValue, ExtractionError>,
) -> AttributeValue {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(kind = %kind, error = %e, "Attribute missing");
            AttributeValue::Missing
        }
    }
}

/// Wingspan: the text after the first `<br>` in `div#boxes`, after the
/// `Wingspan: ` label, truncated to five characters and read as a float.
fn try_wingspan(html: &Html) -> Result<f64, ExtractionError> {
    let boxes = WINGSPAN_QUERY
        .find_first(html)
        .ok_or_else(|| ExtractionError::NotFound(WINGSPAN_QUERY.to_string()))?;
    let br = first_descendant(boxes, "br")
        .ok_or_else(|| ExtractionError::NotFound(format!("<br> inside {WINGSPAN_QUERY}")))?;
    let next = next_in_document(*br)
        .ok_or_else(|| ExtractionError::NotFound("node after <br>".to_string()))?;

    let text = match next.value() {
        Node::Text(t) => normalize_text(t),
        _ => {
            return Err(ExtractionError::UnexpectedFormat(
                "node after <br> is not text".to_string(),
            ))
        }
    };

    let (_, rest) = text.split_once(WINGSPAN_LABEL).ok_or_else(|| {
        ExtractionError::UnexpectedFormat(format!("no '{WINGSPAN_LABEL}' label in {text:?}"))
    })?;
    let token = take_chars(rest, WINGSPAN_WIDTH);
    parse_float(token)
}

/// Height: the `F'II"` token of the first summary value, as total inches.
fn try_height(html: &Html) -> Result<i64, ExtractionError> {
    let text = first_text_child(html, &HEIGHT_QUERY)?;
    parse_feet_inches(&text)
}

/// Position: the third `|`-separated field of the header line.
fn try_position(html: &Html) -> Result<String, ExtractionError> {
    let text = first_text_child(html, &POSITION_QUERY)?;
    let field = text.split('|').nth(POSITION_FIELD).ok_or_else(|| {
        ExtractionError::UnexpectedFormat(format!(
            "expected at least {} '|' fields in {text:?}",
            POSITION_FIELD + 1
        ))
    })?;
    Ok(field.trim_matches(' ').to_string())
}

/// The first child node of the first element matching `query`, which must
/// be a text node.
fn first_text_child(html: &Html, query: &StructuralQuery) -> Result<String, ExtractionError> {
    let element: ElementRef = query
        .find_first(html)
        .ok_or_else(|| ExtractionError::NotFound(query.to_string()))?;
    let child = element
        .first_child()
        .ok_or_else(|| ExtractionError::NotFound(format!("content of {query}")))?;
    match child.value() {
        Node::Text(t) => Ok(normalize_text(t)),
        _ => Err(ExtractionError::UnexpectedFormat(format!(
            "first child of {query} is not text"
        ))),
    }
}

/// Parse a feet-inches string such as `6'8"` or `6' 8" (2.03m)` into
/// total inches.
pub fn parse_feet_inches(text: &str) -> Result<i64, ExtractionError> {
    let (feet, rest) = text.split_once('\'').ok_or_else(|| {
        ExtractionError::UnexpectedFormat(format!("no feet separator in {text:?}"))
    })?;
    let inches = rest
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '\'')
        .next()
        .unwrap_or("")
        .replace('"', "");

    let feet = parse_int(feet)?;
    let inches = parse_int(&inches)?;
    feet.checked_mul(12)
        .and_then(|f| f.checked_add(inches))
        .ok_or_else(|| ExtractionError::ParseFailure(format!("{text:?} overflows total inches")))
}

fn parse_int(s: &str) -> Result<i64, ExtractionError> {
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .map_err(|e| ExtractionError::ParseFailure(format!("{trimmed:?} as integer: {e}")))
}

fn parse_float(s: &str) -> Result<f64, ExtractionError> {
    let trimmed = s.trim();
    trimmed
        .parse::<f64>()
        .map_err(|e| ExtractionError::ParseFailure(format!("{trimmed:?} as float: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn savant_page(boxes: &str) -> RawDocument {
        RawDocument::parse(&format!(
            r#"<html><body><div id="header">Player</div><div id="boxes">{boxes}</div></body></html>"#
        ))
    }

    fn nba_page(summary: &str, header: &str) -> RawDocument {
        RawDocument::parse(&format!(
            r#"<html><body>
            <p class="t11 md:t2">{header}</p>
            <div class="PlayerSummary_playerInfo__om2G4">
              <p class="PlayerSummary_playerInfoLabel__hb5fs">HEIGHT</p>
              <p class="PlayerSummary_playerInfoValue__mSfou">{summary}</p>
            </div>
            <div class="PlayerSummary_playerInfo__om2G4">
              <p class="PlayerSummary_playerInfoLabel__hb5fs">WEIGHT</p>
              <p class="PlayerSummary_playerInfoValue__mSfou">250lb (113kg)</p>
            </div>
            </body></html>"#
        ))
    }

    #[test]
    fn test_wingspan_inches() {
        let doc = savant_page("<b>Measurements</b><br>Wingspan: 84.50 inches<br>Reach: 9'1\"");
        assert_eq!(
            try_extract(&doc, AttributeKind::Wingspan),
            Ok(AttributeValue::Float(84.5))
        );
    }

    #[test]
    fn test_wingspan_truncates_to_five_chars() {
        let doc = savant_page("Info<br>Height: 6'9\" Wingspan: 7' 2.25\"");
        let result = try_extract(&doc, AttributeKind::Wingspan);
        assert!(matches!(result, Err(ExtractionError::ParseFailure(ref s)) if s.contains("7' 2.")));
        assert_eq!(extract(&doc, AttributeKind::Wingspan), AttributeValue::Missing);
    }

    #[test]
    fn test_wingspan_short_value() {
        let doc = savant_page("Info<br>Wingspan: 83");
        assert_eq!(extract(&doc, AttributeKind::Wingspan), AttributeValue::Float(83.0));
    }

    #[test]
    fn test_wingspan_failure_causes() {
        let no_boxes = RawDocument::parse("<html><body><p>nothing</p></body></html>");
        assert!(matches!(
            try_extract(&no_boxes, AttributeKind::Wingspan),
            Err(ExtractionError::NotFound(_))
        ));

        let no_br = savant_page("Wingspan: 84.50");
        assert!(matches!(
            try_extract(&no_br, AttributeKind::Wingspan),
            Err(ExtractionError::NotFound(_))
        ));

        let element_after_br = savant_page("Info<br><span>Wingspan: 84.50</span>");
        assert!(matches!(
            try_extract(&element_after_br, AttributeKind::Wingspan),
            Err(ExtractionError::UnexpectedFormat(_))
        ));

        let no_label = savant_page("Info<br>Reach: 9'1\"");
        assert!(matches!(
            try_extract(&no_label, AttributeKind::Wingspan),
            Err(ExtractionError::UnexpectedFormat(_))
        ));
    }

    #[test]
    fn test_height() {
        let doc = nba_page("6' 8\"", "Los Angeles Lakers | #6 | Forward");
        assert_eq!(extract(&doc, AttributeKind::Height), AttributeValue::Integer(80));

        let doc = nba_page("6'8\" (2.03m)", "Los Angeles Lakers | #6 | Forward");
        assert_eq!(extract(&doc, AttributeKind::Height), AttributeValue::Integer(80));

        let doc = nba_page("7'0\" (2.13m)", "Philadelphia 76ers | #21 | Center");
        assert_eq!(extract(&doc, AttributeKind::Height), AttributeValue::Integer(84));
    }

    #[test]
    fn test_height_failures() {
        let no_inches = nba_page("6'", "x | y | z");
        assert!(matches!(
            try_extract(&no_inches, AttributeKind::Height),
            Err(ExtractionError::ParseFailure(_))
        ));

        let no_separator = nba_page("2.03m", "x | y | z");
        assert!(matches!(
            try_extract(&no_separator, AttributeKind::Height),
            Err(ExtractionError::UnexpectedFormat(_))
        ));

        let wrapped = nba_page("<span>6'8\"</span>", "x | y | z");
        assert!(matches!(
            try_extract(&wrapped, AttributeKind::Height),
            Err(ExtractionError::UnexpectedFormat(_))
        ));

        let empty = nba_page("", "x | y | z");
        assert!(matches!(
            try_extract(&empty, AttributeKind::Height),
            Err(ExtractionError::NotFound(_))
        ));

        let oversized = nba_page("999999999999999999'8\"", "x | y | z");
        assert!(matches!(
            try_extract(&oversized, AttributeKind::Height),
            Err(ExtractionError::ParseFailure(_))
        ));
        assert_eq!(extract(&oversized, AttributeKind::Height), AttributeValue::Missing);
    }

    #[test]
    fn test_position() {
        let doc = nba_page("6'3\"", "PG | Guard | Point Guard");
        assert_eq!(
            extract(&doc, AttributeKind::Position),
            AttributeValue::Text("Point Guard".into())
        );
    }

    #[test]
    fn test_position_too_few_fields() {
        let doc = nba_page("6'3\"", "Guard | Point Guard");
        assert!(matches!(
            try_extract(&doc, AttributeKind::Position),
            Err(ExtractionError::UnexpectedFormat(_))
        ));
    }

    #[test]
    fn test_position_only_strips_spaces() {
        let doc = nba_page("6'3\"", "Boston Celtics | #0 |  Forward ");
        assert_eq!(
            extract(&doc, AttributeKind::Position),
            AttributeValue::Text("Forward".into())
        );
    }

    #[test]
    fn test_height_and_position_combined() {
        let doc = nba_page("6'9\" (2.06m)", "Los Angeles Lakers | #23 | Forward");
        let (height, position) = extract_height_and_position(&doc);
        assert_eq!(height, AttributeValue::Integer(81));
        assert_eq!(position, AttributeValue::Text("Forward".into()));
    }

    #[test]
    fn test_malformed_documents_are_missing() {
        let inputs = [
            "",
            "not html at all",
            "<html><body></body></html>",
            "<div id=\"boxes\"><br></div>",
            "<p class=\"PlayerSummary_playerInfoValue__mSfou\"></p><p class=\"t11 md:t2\">|</p>",
            "<<<>>>\u{0}\u{feff}",
        ];
        for input in inputs {
            let doc = RawDocument::parse(input);
            for kind in AttributeKind::ALL {
                assert_eq!(extract(&doc, kind), AttributeValue::Missing, "{kind} on {input:?}");
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = nba_page("6'8\"", "PG | Guard | Point Guard");
        for kind in AttributeKind::ALL {
            assert_eq!(try_extract(&doc, kind), try_extract(&doc, kind));
        }
    }

    #[test]
    fn test_parse_feet_inches() {
        assert_eq!(parse_feet_inches("6'8\""), Ok(80));
        assert_eq!(parse_feet_inches(" 6' 11\" "), Ok(83));
        assert_eq!(parse_feet_inches("5'9\" (1.75m)"), Ok(69));
        assert_eq!(parse_feet_inches("6'8'"), Ok(80));
        assert!(parse_feet_inches("9223372036854775807'0\"").is_err());
        assert!(parse_feet_inches("six'8\"").is_err());
        assert!(parse_feet_inches("").is_err());
    }
}
