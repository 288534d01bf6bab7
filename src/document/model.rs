//! Document types: collections, variables, text styles and frame nodes
//!
//! Per-mode values are decided once, at deserialization, into the
//! [`ModeValue`] tagged union.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// A named variant axis of a collection (breakpoint, theme, ...)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

/// A named group of variables sharing one set of modes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub default_mode_id: Option<String>,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

impl Collection {
    /// Mode at `index`, falling back to the default mode, then the first mode
    pub fn mode_at(&self, index: usize) -> Option<&Mode> {
        self.modes
            .get(index)
            .or_else(|| {
                let default = self.default_mode_id.as_deref()?;
                self.modes.iter().find(|m| m.mode_id == default)
            })
            .or_else(|| self.modes.first())
    }
}

/// One named, per-mode-varying value (an "entry")
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(rename = "variableCollectionId")]
    pub collection_id: String,
    #[serde(default)]
    pub resolved_type: Option<String>,
    #[serde(default)]
    pub values_by_mode: HashMap<String, ModeValue>,
}

impl Variable {
    pub fn value_for(&self, mode_id: &str) -> Option<&ModeValue> {
        self.values_by_mode.get(mode_id)
    }
}

/// A plain value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// RGBA color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default)]
    pub a: Option<f64>,
}

impl Color {
    /// Channel name and value pairs, alpha last when present
    pub fn components(&self) -> Vec<(&'static str, f64)> {
        let mut out = vec![("r", self.r), ("g", self.g), ("b", self.b)];
        if let Some(a) = self.a {
            out.push(("a", a));
        }
        out
    }
}

/// Reference to another variable, possibly in a different collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRef {
    pub id: String,
}

/// A variable's value for one mode
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawModeValue")]
pub enum ModeValue {
    Scalar(Scalar),
    Composite(Color),
    Alias(AliasRef),
}

const ALIAS_TYPE: &str = "VARIABLE_ALIAS";

/// Wire shape of a per-mode value, before classification
#[derive(Deserialize)]
#[serde(untagged)]
enum RawModeValue {
    Alias {
        #[serde(rename = "type")]
        kind: String,
        id: String,
    },
    Color(Color),
    Bool(bool),
    Number(f64),
    Text(String),
}

impl TryFrom<RawModeValue> for ModeValue {
    type Error = String;

    fn try_from(raw: RawModeValue) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawModeValue::Alias { kind, id } if kind == ALIAS_TYPE => {
                ModeValue::Alias(AliasRef { id })
            }
            RawModeValue::Alias { kind, .. } => {
                return Err(format!("unsupported value reference type '{}'", kind))
            }
            RawModeValue::Color(c) => ModeValue::Composite(c),
            RawModeValue::Bool(b) => ModeValue::Scalar(Scalar::Bool(b)),
            RawModeValue::Number(n) => ModeValue::Scalar(Scalar::Number(n)),
            RawModeValue::Text(s) => ModeValue::Scalar(Scalar::Text(s)),
        })
    }
}

/// Font family and style of a text style
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Pixels,
    Percent,
    Auto,
}

/// Line height or letter spacing with its unit
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Measure {
    pub unit: Unit,
    #[serde(default)]
    pub value: Option<f64>,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.unit, self.value) {
            (Unit::Auto, _) | (_, None) => write!(f, "normal"),
            (Unit::Pixels, Some(v)) => write!(f, "{}px", v),
            (Unit::Percent, Some(v)) => write!(f, "{}%", v),
        }
    }
}

/// A local text style
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub id: String,
    pub name: String,
    pub font_name: FontName,
    pub font_size: f64,
    pub line_height: Measure,
    pub letter_spacing: Measure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Frame,
    Text,
    #[serde(other)]
    Other,
}

/// A node of the document's frame tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Text content, for text nodes
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn is_frame(&self) -> bool {
        self.kind == NodeKind::Frame
    }

    /// Text content when this is a text node
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Text => Some(self.characters.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    /// Depth-first search for a node by id, including `self`
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_value_classification() {
        let values: Vec<ModeValue> = serde_json::from_str(
            r#"[
                4,
                "1rem",
                true,
                {"r": 1, "g": 0.5, "b": 0, "a": 1},
                {"type": "VARIABLE_ALIAS", "id": "VariableID:1:2"}
            ]"#,
        )
        .expect("Should parse");

        assert_eq!(values[0], ModeValue::Scalar(Scalar::Number(4.0)));
        assert_eq!(values[1], ModeValue::Scalar(Scalar::Text("1rem".into())));
        assert_eq!(values[2], ModeValue::Scalar(Scalar::Bool(true)));
        assert!(matches!(values[3], ModeValue::Composite(Color { a: Some(_), .. })));
        assert_eq!(
            values[4],
            ModeValue::Alias(AliasRef {
                id: "VariableID:1:2".into()
            })
        );
    }

    #[test]
    fn test_unknown_reference_type_rejected() {
        let result: Result<ModeValue, _> =
            serde_json::from_str(r#"{"type": "EXPRESSION", "id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Number(16.0).to_string(), "16");
        assert_eq!(Scalar::Number(0.5).to_string(), "0.5");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_measure_display() {
        let px = Measure { unit: Unit::Pixels, value: Some(24.0) };
        let pct = Measure { unit: Unit::Percent, value: Some(150.0) };
        let auto = Measure { unit: Unit::Auto, value: None };
        assert_eq!(px.to_string(), "24px");
        assert_eq!(pct.to_string(), "150%");
        assert_eq!(auto.to_string(), "normal");
    }

    #[test]
    fn test_mode_at_fallback() {
        let collection = Collection {
            id: "c".into(),
            name: "Spacing".into(),
            modes: vec![
                Mode { mode_id: "1".into(), name: "Small".into() },
                Mode { mode_id: "2".into(), name: "Large".into() },
            ],
            default_mode_id: Some("2".into()),
            variable_ids: vec![],
        };
        assert_eq!(collection.mode_at(0).map(|m| m.name.as_str()), Some("Small"));
        assert_eq!(collection.mode_at(5).map(|m| m.name.as_str()), Some("Large"));
    }
}
