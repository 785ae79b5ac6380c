use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single positioned field on a template page.
///
/// Only the attributes the orchestrator actually reasons about are typed;
/// everything else the widget attaches (font name, alignment, colors, ...)
/// is kept verbatim in `style` so round-tripping a template through the
/// store or a JSON file never loses information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field type tag, e.g. `"text"`, `"image"`, `"qrcode"`. Open set,
    /// owned by the rendering side.
    #[serde(rename = "type")]
    pub kind: String,

    /// Top-left corner of the field on the page, in mm.
    pub position: Position,

    pub width: f64,
    pub height: f64,

    /// Pass-through styling attributes.
    #[serde(flatten)]
    pub style: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
