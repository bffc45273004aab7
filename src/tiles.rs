//! Map tile providers available to the map element.
//!
//! Each entry carries a URL template with `{z}`, `{x}`, `{y}` (and `{s}` for
//! OpenStreetMap) placeholders plus a `{key}` slot for the provider's API
//! key. The 3D terrain entry is a vector style document rather than a raster
//! template.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key used when a design does not name a known style
pub const DEFAULT_TILE_LAYER: &str = "streets";

const MAPTILER_ATTRIBUTION: &str = r#"<a href="https://www.maptiler.com/copyright/" target="_blank">&copy; MapTiler</a> <a href="https://www.openstreetmap.org/copyright" target="_blank">&copy; OpenStreetMap</a>"#;
const MAPTILER_ONLY_ATTRIBUTION: &str =
    r#"<a href="https://www.maptiler.com/copyright/" target="_blank">&copy; MapTiler</a>"#;
const STADIA_ATTRIBUTION: &str = r#"&copy; <a href="https://www.stadiamaps.com/" target="_blank">Stadia Maps</a> &copy; <a href="https://stamen.com/" target="_blank">Stamen Design</a>"#;
const OSM_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

/// API keys for the tile providers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileApiKeys {
    pub maptiler: Option<String>,
    pub stadia: Option<String>,
}

/// Which key a provider's template needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySource {
    MapTiler,
    Stadia,
    None,
}

/// How the map renderer consumes the URL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerFormat {
    /// `{z}/{x}/{y}` raster tiles
    Raster,
    /// Vector style document (3D terrain)
    VectorStyle,
}

/// A named tile provider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayer {
    pub key: &'static str,
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub format: LayerFormat,
    pub key_source: KeySource,
}

const fn maptiler(
    key: &'static str,
    name: &'static str,
    url_template: &'static str,
    attribution: &'static str,
) -> TileLayer {
    TileLayer {
        key,
        name,
        url_template,
        attribution,
        format: LayerFormat::Raster,
        key_source: KeySource::MapTiler,
    }
}

/// Every available tile layer, in menu order
pub static TILE_LAYERS: &[TileLayer] = &[
    TileLayer {
        key: "3d-terrain",
        name: "3D Terrain",
        url_template: "https://api.maptiler.com/maps/outdoor-v2/style.json?key={key}",
        attribution: MAPTILER_ATTRIBUTION,
        format: LayerFormat::VectorStyle,
        key_source: KeySource::MapTiler,
    },
    maptiler("streets", "Streets", "https://api.maptiler.com/maps/streets-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("satellite", "Satellite", "https://api.maptiler.com/maps/satellite/{z}/{x}/{y}.jpg?key={key}", MAPTILER_ONLY_ATTRIBUTION),
    maptiler("topo", "Topo", "https://api.maptiler.com/maps/topo-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("outdoor", "Outdoor", "https://api.maptiler.com/maps/outdoor-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("winter", "Winter", "https://api.maptiler.com/maps/winter-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("ocean", "Ocean", "https://api.maptiler.com/maps/ocean/{z}/{x}/{y}.png?key={key}", MAPTILER_ONLY_ATTRIBUTION),
    maptiler("basic", "Basic", "https://api.maptiler.com/maps/basic-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("bright", "Bright", "https://api.maptiler.com/maps/bright-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("dataviz", "Dataviz", "https://api.maptiler.com/maps/dataviz/{z}/{x}/{y}.png?key={key}", MAPTILER_ONLY_ATTRIBUTION),
    maptiler("toner", "Toner", "https://api.maptiler.com/maps/toner-v2/{z}/{x}/{y}.png?key={key}", MAPTILER_ATTRIBUTION),
    maptiler("backdrop", "Backdrop", "https://api.maptiler.com/maps/backdrop/{z}/{x}/{y}.png?key={key}", MAPTILER_ONLY_ATTRIBUTION),
    TileLayer {
        key: "aquarelle",
        name: "Aquarelle (Watercolor)",
        url_template: "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.jpg?api_key={key}",
        attribution: STADIA_ATTRIBUTION,
        format: LayerFormat::Raster,
        key_source: KeySource::Stadia,
    },
    TileLayer {
        key: "openstreetmap",
        name: "OpenStreetMap",
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: OSM_ATTRIBUTION,
        format: LayerFormat::Raster,
        key_source: KeySource::None,
    },
];

/// Look up a layer by its key
pub fn tile_layer(key: &str) -> Option<&'static TileLayer> {
    TILE_LAYERS.iter().find(|layer| layer.key == key)
}

/// Layer for `key`, falling back to [`DEFAULT_TILE_LAYER`]
pub fn tile_layer_or_default(key: &str) -> &'static TileLayer {
    tile_layer(key)
        .or_else(|| tile_layer(DEFAULT_TILE_LAYER))
        .unwrap_or(&TILE_LAYERS[0])
}

/// Slippy-map tile address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Tile containing the given point at `zoom` (clamped to 22)
    pub fn from_lat_lon(latitude: f64, longitude: f64, zoom: u8) -> Self {
        let zoom = zoom.min(22);
        let n = 1_i64 << zoom;
        let x_raw = ((longitude + 180.0) / 360.0 * (n as f64)).floor() as i64;
        let lat_rad = latitude.to_radians();
        let y_raw = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI)
            / 2.0
            * (n as f64))
            .floor() as i64;

        Self {
            z: zoom,
            x: (((x_raw % n) + n) % n) as u32,
            y: y_raw.clamp(0, n - 1) as u32,
        }
    }
}

impl TileLayer {
    fn api_key<'a>(&self, keys: &'a TileApiKeys) -> &'a str {
        match self.key_source {
            KeySource::MapTiler => keys.maptiler.as_deref().unwrap_or_default(),
            KeySource::Stadia => keys.stadia.as_deref().unwrap_or_default(),
            KeySource::None => "",
        }
    }

    /// Whether the key this provider needs is configured
    pub fn has_key(&self, keys: &TileApiKeys) -> bool {
        self.key_source == KeySource::None || !self.api_key(keys).is_empty()
    }

    /// Template with the API key filled in, tile placeholders intact
    pub fn url(&self, keys: &TileApiKeys) -> String {
        self.url_template
            .replace("{key}", &urlencoding::encode(self.api_key(keys)))
    }

    /// Concrete URL of one raster tile
    pub fn tile_url(&self, keys: &TileApiKeys, coord: TileCoord) -> String {
        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("z", coord.z.to_string());
        values.insert("x", coord.x.to_string());
        values.insert("y", coord.y.to_string());
        values.insert("s", "a".to_string());

        let mut url = self.url(keys);
        for (key, value) in &values {
            url = url.replace(&format!("{{{key}}}"), value);
        }
        url
    }
}
