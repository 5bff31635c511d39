use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Marker written wherever an attribute could not be determined.
pub const MISSING_MARKER: &str = "NA";

/// The player attributes that can be scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    /// Wingspan in inches, from nbasavant.com.
    Wingspan,
    /// Height in total inches, from nba.com.
    Height,
    /// Position label (e.g., "Point Guard"), from nba.com.
    Position,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 3] = [
        AttributeKind::Height,
        AttributeKind::Position,
        AttributeKind::Wingspan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Wingspan => "wingspan",
            AttributeKind::Height => "height",
            AttributeKind::Position => "position",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown attribute kind: '{0}' (expected wingspan, height or position)")]
pub struct UnknownAttributeKind(pub String);

impl FromStr for AttributeKind {
    type Err = UnknownAttributeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wingspan" => Ok(AttributeKind::Wingspan),
            "height" => Ok(AttributeKind::Height),
            "position" => Ok(AttributeKind::Position),
            _ => Err(UnknownAttributeKind(s.to_string())),
        }
    }
}

/// A scraped attribute value, or the `Missing` sentinel.
///
/// `Missing` covers every failure cause uniformly: unreachable page,
/// relocated markup, or text that did not parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Text(String),
    #[default]
    Missing,
}

impl AttributeValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, AttributeValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value as a table cell: floats always keep a fractional
/// part, and `Missing` becomes `NA`.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{v}"),
            AttributeValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Missing => f.write_str(MISSING_MARKER),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Integer(v) => serializer.serialize_i64(*v),
            AttributeValue::Float(v) => serializer.serialize_f64(*v),
            AttributeValue::Text(s) => serializer.serialize_str(s),
            AttributeValue::Missing => serializer.serialize_str(MISSING_MARKER),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_cells() {
        assert_eq!(AttributeValue::Integer(80).to_string(), "80");
        assert_eq!(AttributeValue::Float(84.5).to_string(), "84.5");
        assert_eq!(AttributeValue::Float(84.0).to_string(), "84.0");
        assert_eq!(AttributeValue::from("Point Guard").to_string(), "Point Guard");
        assert_eq!(AttributeValue::Missing.to_string(), "NA");
    }

    #[test]
    fn test_serialize_json() {
        let values = vec![
            AttributeValue::Integer(80),
            AttributeValue::Float(84.5),
            AttributeValue::from("Center"),
            AttributeValue::Missing,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[80,84.5,"Center","NA"]"#);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(AttributeValue::from("C").as_text(), Some("C"));
        assert!(AttributeValue::default().is_missing());
        assert!(!AttributeValue::Float(1.0).is_missing());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("wingspan".parse(), Ok(AttributeKind::Wingspan));
        assert_eq!(" Height ".parse(), Ok(AttributeKind::Height));
        assert_eq!("POSITION".parse(), Ok(AttributeKind::Position));
        assert_eq!(
            "weight".parse::<AttributeKind>(),
            Err(UnknownAttributeKind("weight".into()))
        );
        for kind in AttributeKind::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }
}
