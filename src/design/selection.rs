use super::element::ElementKind;
use serde::{Deserialize, Serialize};

/// The element currently selected in the editor
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selection {
    Map,
    DataFields,
    Weather,
    BadgeList,
    Element { kind: ElementKind, id: String },
}

impl Selection {
    pub fn element(kind: ElementKind, id: impl Into<String>) -> Self {
        Selection::Element { kind, id: id.into() }
    }

    /// True for the always-present elements of a view
    pub fn is_singleton(&self) -> bool {
        !matches!(self, Selection::Element { .. })
    }

    /// Id of the selected element as stored in the document
    pub fn id(&self) -> &str {
        match self {
            Selection::Map => "map",
            Selection::DataFields => "dataFields",
            Selection::Weather => "weather",
            Selection::BadgeList => "badgeList",
            Selection::Element { id, .. } => id,
        }
    }
}
