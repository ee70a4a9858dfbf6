//! Map renderer — builds a self-contained Leaflet HTML page.
//!
//! One `L.layerGroup` per crop, wired into a layers control so crops
//! can be toggled; one marker per dataset row with a resolved state.

use crate::dataset::CropRecord;
use crate::location::Coordinate;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Geographic center of the base map (roughly central India).
pub const MAP_CENTER: Coordinate = Coordinate { lat: 22.0, lon: 78.0 };

/// Initial zoom level.
pub const MAP_ZOOM: u8 = 5;

/// Fixed marker color.
pub const MARKER_COLOR: &str = "green";

/// Default output file name.
pub const OUTPUT_FILE: &str = "india_crops_map.html";

const LEGEND_HTML: &str = r#"<div style="position: fixed;
            bottom: 50px; left: 50px; width: 250px; height: auto;
            background-color: white; z-index: 9999; font-size: 14px;
            border: 2px solid grey; padding: 10px;">
<b>Legend:</b><br>
<ul>
  <li><span style="color: green;">Green Markers</span>: Crop Data</li>
  <li>Use layers to filter crops</li>
</ul>
</div>"#;

struct Marker {
    coord: Coordinate,
    popup: String,
    tooltip: String,
}

/// An interactive crop map under construction.
pub struct CropMap {
    center: Coordinate,
    zoom: u8,
    // Crop name → markers, in layer-creation order.
    layers: Vec<(String, Vec<Marker>)>,
}

impl CropMap {
    pub fn new() -> Self {
        Self::with_view(MAP_CENTER, MAP_ZOOM)
    }

    pub fn with_view(center: Coordinate, zoom: u8) -> Self {
        Self { center, zoom, layers: Vec::new() }
    }

    /// Create an (initially empty) layer for a crop. No-op if the
    /// layer already exists.
    pub fn add_layer(&mut self, crop: &str) {
        if !self.layers.iter().any(|(name, _)| name == crop) {
            self.layers.push((crop.to_string(), Vec::new()));
        }
    }

    /// Place a marker for a record at a resolved coordinate, on the
    /// layer matching the record's crop.
    pub fn add_marker(&mut self, record: &CropRecord, coord: Coordinate) {
        self.add_layer(&record.crop);
        let marker = Marker {
            coord,
            popup: popup_html(record),
            tooltip: record.season.trim().to_string(),
        };
        if let Some((_, markers)) = self.layers.iter_mut().find(|(name, _)| name == &record.crop) {
            markers.push(marker);
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|(_, m)| m.len()).sum()
    }

    /// Render the full self-contained HTML document.
    pub fn to_html(&self) -> String {
        let mut script = String::new();
        let _ = writeln!(
            script,
            "var map = L.map('map').setView([{}, {}], {});",
            self.center.lat, self.center.lon, self.zoom,
        );
        script.push_str(
            "L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', \
             {attribution: '&copy; OpenStreetMap contributors'}).addTo(map);\n",
        );
        script.push_str("var overlays = {};\n");

        for (i, (crop, markers)) in self.layers.iter().enumerate() {
            let _ = writeln!(script, "var layer_{} = L.layerGroup().addTo(map);", i);
            let _ = writeln!(script, "overlays[{}] = layer_{};", js_str(crop), i);
            for m in markers {
                let _ = writeln!(
                    script,
                    "L.circleMarker([{}, {}], {{radius: 7, color: {color}, \
                     fillColor: {color}, fillOpacity: 0.8}})\
                     .bindPopup({popup}).bindTooltip({tooltip}).addTo(layer_{i});",
                    m.coord.lat,
                    m.coord.lon,
                    color = js_str(MARKER_COLOR),
                    popup = js_str(&m.popup),
                    tooltip = js_str(&m.tooltip),
                    i = i,
                );
            }
        }
        script.push_str("L.control.layers(null, overlays, {collapsed: false}).addTo(map);\n");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>India Crop Production Map</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css"
    crossorigin="anonymous" referrerpolicy="no-referrer"/>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js"
    crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  <style>
    html, body, #map {{ height: 100%; margin: 0; }}
  </style>
</head>
<body>
  <div id="map"></div>
  {legend}
  <script>
{script}  </script>
</body>
</html>
"#,
            legend = LEGEND_HTML,
            script = script,
        )
    }

    /// Write the map to disk, overwriting any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_html())
    }
}

impl Default for CropMap {
    fn default() -> Self {
        Self::new()
    }
}

/// The marker popup: all ten dataset fields with their units.
fn popup_html(r: &CropRecord) -> String {
    format!(
        "Crop: {}<br>\
         Year: {}<br>\
         Season: {}<br>\
         State: {}<br>\
         Area: {} hectares<br>\
         Production: {} metric tons<br>\
         Rainfall: {} mm<br>\
         Fertilizer Used: {} kg/ha<br>\
         Pesticide Used: {} L/ha<br>\
         Yield: {} metric tons/ha",
        r.crop,
        r.crop_year,
        r.season.trim(),
        r.state,
        r.area,
        r.production,
        r.annual_rainfall,
        r.fertilizer,
        r.pesticide,
        r.yield_,
    )
}

/// Encode a string as a JS string literal (JSON is a JS subset).
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(crop: &str, state: &str, season: &str) -> CropRecord {
        CropRecord {
            crop: crop.to_string(),
            crop_year: 1997,
            season: season.to_string(),
            state: state.to_string(),
            area: 100.0,
            production: 300.0,
            annual_rainfall: 1200.0,
            fertilizer: 80.0,
            pesticide: 0.5,
            yield_: 3.0,
        }
    }

    const KARNATAKA: Coordinate = Coordinate { lat: 15.3173, lon: 75.7139 };

    #[test]
    fn test_one_layer_per_distinct_crop() {
        let mut map = CropMap::new();
        map.add_marker(&record("Rice", "Karnataka", "Kharif"), KARNATAKA);
        map.add_marker(&record("Wheat", "Karnataka", "Rabi"), KARNATAKA);
        map.add_marker(&record("Rice", "Karnataka", "Rabi"), KARNATAKA);

        assert_eq!(map.layer_count(), 2);
        assert_eq!(map.marker_count(), 3);
    }

    #[test]
    fn test_add_layer_idempotent() {
        let mut map = CropMap::new();
        map.add_layer("Rice");
        map.add_layer("Rice");
        assert_eq!(map.layer_count(), 1);
        assert_eq!(map.marker_count(), 0);
    }

    #[test]
    fn test_html_contains_markers_and_layers() {
        let mut map = CropMap::new();
        map.add_marker(&record("Rice", "Karnataka", "Kharif"), KARNATAKA);
        map.add_marker(&record("Wheat", "Karnataka", "Rabi"), KARNATAKA);

        let html = map.to_html();
        assert_eq!(html.matches("[15.3173, 75.7139]").count(), 2);
        assert!(html.contains("overlays[\"Rice\"]"));
        assert!(html.contains("overlays[\"Wheat\"]"));
        assert!(html.contains("setView([22, 78], 5)"));
        assert!(html.contains("bindTooltip(\"Kharif\")"));
        assert!(html.contains("Area: 100 hectares"));
        assert!(html.contains("Legend:"));
    }

    #[test]
    fn test_html_deterministic() {
        let build = || {
            let mut map = CropMap::new();
            map.add_marker(&record("Rice", "Karnataka", "Kharif"), KARNATAKA);
            map.add_marker(&record("Wheat", "Punjab", "Rabi"), Coordinate::new(31.1471, 75.3412));
            map.to_html()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_popup_has_all_ten_fields() {
        let html = popup_html(&record("Rice", "Karnataka", "Kharif"));
        for label in [
            "Crop:", "Year:", "Season:", "State:", "Area:", "Production:",
            "Rainfall:", "Fertilizer Used:", "Pesticide Used:", "Yield:",
        ] {
            assert!(html.contains(label), "missing {}", label);
        }
    }

    #[test]
    fn test_quotes_in_crop_name_escaped() {
        let mut map = CropMap::new();
        map.add_marker(&record("Paddy \"local\"", "Karnataka", "Kharif"), KARNATAKA);
        let html = map.to_html();
        assert!(html.contains("overlays[\"Paddy \\\"local\\\"\"]"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        std::fs::write(&path, "stale").unwrap();

        let mut map = CropMap::new();
        map.add_marker(&record("Rice", "Karnataka", "Kharif"), KARNATAKA);
        map.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
        assert!(!contents.contains("stale"));
    }
}
