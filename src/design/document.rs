//! The design document of one product view.
//!
//! A document holds the always-present singleton elements (map, data-field
//! panel, weather badge, badge list), the user-added elements and the
//! achievement badges picked for the view. `DesignDocument::default()` is the
//! template every new view starts from.

use super::element::{CanvasElement, ElementFrame, ElementKind};
use super::selection::Selection;
use crate::achievements::AchievementOption;
use crate::constants::PLACEHOLDER;
use serde::{Deserialize, Serialize};

// ============================================================================
// Singleton Elements
// ============================================================================

/// Route map frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapElement {
    #[serde(flatten)]
    pub frame: ElementFrame,
}

impl Default for MapElement {
    fn default() -> Self {
        Self {
            frame: ElementFrame::new("map", 0.0, 0.0, 300.0, 300.0, 1),
        }
    }
}

/// How the route map is drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub line_color: String,
    pub line_weight: f64,
    pub gradient_data: String,
    /// Tile layer key, see [`crate::tiles`]
    pub style: String,
    pub visuals: String,
    pub fade_edges: bool,
    pub show_start_end_markers: bool,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            line_color: "#ff0000".to_string(),
            line_weight: 3.0,
            gradient_data: "none".to_string(),
            style: crate::tiles::DEFAULT_TILE_LAYER.to_string(),
            visuals: "standard".to_string(),
            fade_edges: false,
            show_start_end_markers: true,
            pitch: 45.0,
            bearing: 0.0,
        }
    }
}

/// One metric slot of the data-field panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    pub id: String,
    pub label: String,
    pub value: String,
    pub selected: bool,
    pub order: u32,
}

impl DataField {
    fn new(id: &str, label: &str, selected: bool, order: u32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: PLACEHOLDER.to_string(),
            selected,
            order,
        }
    }
}

/// Default metric slots: (id, label, selected)
const DEFAULT_FIELDS: [(&str, &str, bool); 16] = [
    ("distance", "Distance", true),
    ("time", "Time", true),
    ("moving_time", "Moving Time", false),
    ("elapsed_time", "Elapsed Time", false),
    ("elevation_gain", "Elevation Gain", true),
    ("max_elevation", "Max Elevation", false),
    ("avg_pace", "Avg Pace", true),
    ("max_pace", "Max Pace", false),
    ("avg_speed", "Avg Speed", false),
    ("max_speed", "Max Speed", false),
    ("avg_hr", "Avg HR", false),
    ("max_hr", "Max HR", false),
    ("avg_cadence", "Avg Cadence", false),
    ("max_cadence", "Max Cadence", false),
    ("avg_power", "Avg Power", false),
    ("max_power", "Max Power", false),
];

/// Panel listing the selected activity metrics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFieldPanel {
    #[serde(flatten)]
    pub frame: ElementFrame,
    pub columns: u32,
    pub label_size: f64,
    pub label_color: String,
    pub value_size: f64,
    pub value_color: String,
    pub border_style: String,
    pub border_color: String,
    pub available_fields: Vec<DataField>,
}

impl Default for DataFieldPanel {
    fn default() -> Self {
        Self {
            frame: ElementFrame::new("dataFields", 50.0, -150.0, 300.0, 120.0, 2).hidden(),
            columns: 2,
            label_size: 12.0,
            label_color: "#666666".to_string(),
            value_size: 24.0,
            value_color: "#333333".to_string(),
            border_style: "inner".to_string(),
            border_color: "rgba(150, 150, 150, 0.8)".to_string(),
            available_fields: DEFAULT_FIELDS
                .iter()
                .zip(1..)
                .map(|(&(id, label, selected), order)| DataField::new(id, label, selected, order))
                .collect(),
        }
    }
}

impl DataFieldPanel {
    pub fn field(&self, id: &str) -> Option<&DataField> {
        self.available_fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut DataField> {
        self.available_fields.iter_mut().find(|f| f.id == id)
    }

    /// Selected fields in display order
    pub fn selected_fields(&self) -> Vec<&DataField> {
        let mut fields: Vec<&DataField> = self.available_fields.iter().filter(|f| f.selected).collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    /// Move a field to `index` in display order and renumber orders 1..n.
    ///
    /// Returns false if the field doesn't exist. Out-of-range indices move
    /// the field to the end.
    pub fn move_field(&mut self, id: &str, index: usize) -> bool {
        self.available_fields.sort_by_key(|f| f.order);
        let Some(from) = self.available_fields.iter().position(|f| f.id == id) else {
            return false;
        };
        let field = self.available_fields.remove(from);
        let to = index.min(self.available_fields.len());
        self.available_fields.insert(to, field);
        for (field, order) in self.available_fields.iter_mut().zip(1..) {
            field.order = order;
        }
        true
    }
}

/// Weather badge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherElement {
    #[serde(flatten)]
    pub frame: ElementFrame,
    pub font_size: f64,
    pub text_color: String,
    pub show_icon: bool,
    pub background_color: String,
    pub transparent_bg: bool,
    pub border_radius: f64,
}

impl Default for WeatherElement {
    fn default() -> Self {
        Self {
            frame: ElementFrame::new("weather", 150.0, -200.0, 200.0, 80.0, 10).hidden(),
            font_size: 18.0,
            text_color: "#333333".to_string(),
            show_icon: true,
            background_color: "#FFFFFF".to_string(),
            transparent_bg: true,
            border_radius: 0.0,
        }
    }
}

/// Achievement badge list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeListElement {
    #[serde(flatten)]
    pub frame: ElementFrame,
    pub font_size: f64,
    pub text_color: String,
    pub background_color: String,
    pub transparent_bg: bool,
    pub font_family: String,
    pub border_enabled: bool,
    pub border_color: String,
    pub border_width: f64,
}

impl Default for BadgeListElement {
    fn default() -> Self {
        Self {
            frame: ElementFrame::new("badgeList", 0.0, 180.0, 350.0, 150.0, 10).hidden(),
            font_size: 14.0,
            text_color: "#333333".to_string(),
            background_color: "#FFFFFF".to_string(),
            transparent_bg: true,
            font_family: "Arial".to_string(),
            border_enabled: false,
            border_color: "#333333".to_string(),
            border_width: 2.0,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// Everything placed on one view of the product
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignDocument {
    pub map_element: MapElement,
    pub map_settings: MapSettings,
    pub data_fields: DataFieldPanel,
    pub weather_element: WeatherElement,
    pub badge_list_element: BadgeListElement,
    /// User-added elements in insertion order
    pub elements: Vec<CanvasElement>,
    pub achievements: Vec<AchievementOption>,
}

impl DesignDocument {
    pub fn element(&self, kind: ElementKind, id: &str) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.kind() == kind && e.id() == id)
    }

    pub fn element_mut(&mut self, kind: ElementKind, id: &str) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|e| e.kind() == kind && e.id() == id)
    }

    /// Elements of one kind, in insertion order
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &CanvasElement> {
        self.elements.iter().filter(move |e| e.kind() == kind)
    }

    /// Frame of a selected singleton, `None` for user elements
    pub fn singleton_frame_mut(&mut self, selection: &Selection) -> Option<&mut ElementFrame> {
        match selection {
            Selection::Map => Some(&mut self.map_element.frame),
            Selection::DataFields => Some(&mut self.data_fields.frame),
            Selection::Weather => Some(&mut self.weather_element.frame),
            Selection::BadgeList => Some(&mut self.badge_list_element.frame),
            Selection::Element { .. } => None,
        }
    }

    /// Remove the first element with this kind and id
    pub(crate) fn remove_element(&mut self, kind: ElementKind, id: &str) -> Option<CanvasElement> {
        let index = self.elements.iter().position(|e| e.kind() == kind && e.id() == id)?;
        Some(self.elements.remove(index))
    }
}
