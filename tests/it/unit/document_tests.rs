//! Design Document Unit Tests

use miles_to_merch::design::{CanvasElement, DesignDocument, ElementContent, ElementKind};
use serde_json::json;

#[test]
fn test_default_singletons() {
    let doc = DesignDocument::default();

    assert_eq!(doc.map_element.frame.id, "map");
    assert!(doc.map_element.frame.visible);
    assert_eq!(doc.map_element.frame.z_index, 1);

    assert_eq!(doc.data_fields.frame.id, "dataFields");
    assert!(!doc.data_fields.frame.visible);
    assert_eq!(doc.data_fields.frame.y, -150.0);
    assert_eq!(doc.data_fields.columns, 2);

    assert!(!doc.weather_element.frame.visible);
    assert_eq!(doc.weather_element.frame.z_index, 10);
    assert!(!doc.badge_list_element.frame.visible);
    assert_eq!(doc.badge_list_element.font_family, "Arial");

    assert_eq!(doc.map_settings.style, "streets");
    assert_eq!(doc.map_settings.pitch, 45.0);
    assert!(doc.elements.is_empty());
    assert!(doc.achievements.is_empty());
}

#[test]
fn test_default_data_fields() {
    let panel = DesignDocument::default().data_fields;

    assert_eq!(panel.available_fields.len(), 16);
    assert!(panel.available_fields.iter().all(|f| f.value == "-"));

    let orders: Vec<u32> = panel.available_fields.iter().map(|f| f.order).collect();
    assert_eq!(orders, (1..=16).collect::<Vec<u32>>());

    let selected: Vec<&str> = panel.selected_fields().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(selected, vec!["distance", "time", "elevation_gain", "avg_pace"]);
    assert_eq!(panel.available_fields[15].id, "max_power");
}

#[test]
fn test_defaults_are_fresh_values() {
    let mut a = DesignDocument::default();
    let b = DesignDocument::default();
    a.map_settings.line_color = "#000000".to_string();
    a.data_fields.available_fields[0].selected = false;

    assert_eq!(b.map_settings.line_color, "#ff0000");
    assert!(b.data_fields.available_fields[0].selected);
}

#[test]
fn test_new_elements_get_prefixed_unique_ids() {
    let a = CanvasElement::qr_code("https://example.com");
    let b = CanvasElement::qr_code("https://example.com");
    assert!(a.id().starts_with("qrCode_"));
    assert_ne!(a.id(), b.id());
    assert_eq!(a.kind(), ElementKind::QrCode);
}

#[test]
fn test_element_serializes_flat_with_kind() {
    let element = CanvasElement::text_box("Finish strong").with_id("t1").with_position(5.0, 6.0);
    let value = serde_json::to_value(&element).unwrap();

    assert_eq!(value["id"], "t1");
    assert_eq!(value["kind"], "textBox");
    assert_eq!(value["text"], "Finish strong");
    assert_eq!(value["fontSize"], 24.0);
    assert_eq!(value["zIndex"], 5);
    assert_eq!(value["x"], 5.0);
}

#[test]
fn test_element_deserializes_with_defaults() {
    let element: CanvasElement = serde_json::from_value(json!({
        "id": "photo_9",
        "kind": "photo",
        "src": "https://example.com/me.jpg",
        "x": 1.0,
        "y": 2.0,
        "width": 50.0,
        "height": 60.0
    }))
    .unwrap();

    assert!(element.frame.visible);
    assert_eq!(element.frame.z_index, 0);
    assert_eq!(
        element.content,
        ElementContent::Photo {
            src: "https://example.com/me.jpg".to_string(),
            border_radius: 0.0
        }
    );
}

#[test]
fn test_unknown_element_kind_is_rejected() {
    let result: Result<CanvasElement, _> = serde_json::from_value(json!({
        "id": "s1",
        "kind": "sticker",
        "x": 0.0,
        "y": 0.0,
        "width": 1.0,
        "height": 1.0
    }));
    assert!(result.is_err());
}

#[test]
fn test_document_uses_camel_case_keys() {
    let value = serde_json::to_value(DesignDocument::default()).unwrap();
    for key in [
        "mapElement",
        "mapSettings",
        "dataFields",
        "weatherElement",
        "badgeListElement",
        "elements",
        "achievements",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["dataFields"]["availableFields"][0]["id"], "distance");
    assert_eq!(value["mapSettings"]["showStartEndMarkers"], true);
}

#[test]
fn test_partial_document_fills_defaults() {
    let doc: DesignDocument = serde_json::from_value(json!({
        "mapSettings": {
            "lineColor": "#123456",
            "lineWeight": 5.0,
            "gradientData": "elevation",
            "style": "topo",
            "visuals": "standard",
            "fadeEdges": true,
            "showStartEndMarkers": false,
            "pitch": 0.0,
            "bearing": 90.0
        }
    }))
    .unwrap();

    assert_eq!(doc.map_settings.style, "topo");
    assert_eq!(doc.data_fields, DesignDocument::default().data_fields);
}
