//! User-added canvas elements.
//!
//! Text boxes, photos, graphs and QR codes share one ordered collection per
//! view. Each element is a frame (id, position, size, stacking) plus a
//! kind-tagged payload.

use crate::error::DesignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of element a user can add to a view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    TextBox,
    Photo,
    Graph,
    QrCode,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::TextBox,
        ElementKind::Photo,
        ElementKind::Graph,
        ElementKind::QrCode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::TextBox => "textBox",
            ElementKind::Photo => "photo",
            ElementKind::Graph => "graph",
            ElementKind::QrCode => "qrCode",
        }
    }

    /// Default frame size for a new element of this kind
    fn default_size(self) -> (f64, f64) {
        match self {
            ElementKind::TextBox => (200.0, 50.0),
            ElementKind::Photo => (200.0, 200.0),
            ElementKind::Graph => (300.0, 120.0),
            ElementKind::QrCode => (100.0, 100.0),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DesignError::UnknownKind(s.to_string()))
    }
}

fn default_true() -> bool {
    true
}

/// Position, size and stacking shared by every canvas element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFrame {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub z_index: i32,
}

impl ElementFrame {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64, z_index: i32) -> Self {
        Self {
            id: id.into(),
            visible: true,
            x,
            y,
            width,
            height,
            z_index,
        }
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Kind-specific payload of a user element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementContent {
    TextBox {
        text: String,
        font_size: f64,
        font_family: String,
        color: String,
        #[serde(default)]
        bold: bool,
    },
    Photo {
        /// Image URL or data URI
        src: String,
        #[serde(default)]
        border_radius: f64,
    },
    Graph {
        /// Activity stream plotted, e.g. "altitude" or "heartrate"
        metric: String,
        line_color: String,
        #[serde(default)]
        fill: bool,
    },
    QrCode {
        url: String,
        foreground: String,
        background: String,
    },
}

impl ElementContent {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::TextBox { .. } => ElementKind::TextBox,
            ElementContent::Photo { .. } => ElementKind::Photo,
            ElementContent::Graph { .. } => ElementKind::Graph,
            ElementContent::QrCode { .. } => ElementKind::QrCode,
        }
    }
}

/// A user-added element on a design view
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    #[serde(flatten)]
    pub frame: ElementFrame,
    #[serde(flatten)]
    pub content: ElementContent,
}

impl CanvasElement {
    /// Element with a fresh id at the origin, sized for its kind
    pub fn new(content: ElementContent) -> Self {
        let (width, height) = content.kind().default_size();
        Self {
            frame: ElementFrame::new(new_element_id(content.kind()), 0.0, 0.0, width, height, 5),
            content,
        }
    }

    pub fn text_box(text: impl Into<String>) -> Self {
        Self::new(ElementContent::TextBox {
            text: text.into(),
            font_size: 24.0,
            font_family: "Arial".to_string(),
            color: "#333333".to_string(),
            bold: false,
        })
    }

    pub fn photo(src: impl Into<String>) -> Self {
        Self::new(ElementContent::Photo {
            src: src.into(),
            border_radius: 0.0,
        })
    }

    pub fn graph(metric: impl Into<String>) -> Self {
        Self::new(ElementContent::Graph {
            metric: metric.into(),
            line_color: "#ff0000".to_string(),
            fill: false,
        })
    }

    pub fn qr_code(url: impl Into<String>) -> Self {
        Self::new(ElementContent::QrCode {
            url: url.into(),
            foreground: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.frame.id = id.into();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.frame.x = x;
        self.frame.y = y;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.frame.width = width;
        self.frame.height = height;
        self
    }

    pub fn id(&self) -> &str {
        &self.frame.id
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }
}

/// Unique element id, prefixed with the kind for readability
pub fn new_element_id(kind: ElementKind) -> String {
    format!("{}_{}", kind.as_str(), uuid::Uuid::new_v4())
}
