use serde::Serialize;

use crate::api::AccidentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: GeoPoint,
    pub label: String,
}

/// Third word of a location name, or empty.
pub fn marker_label(location_name: &str) -> String {
    location_name
        .split_whitespace()
        .nth(2)
        .unwrap_or_default()
        .to_string()
}

pub fn to_markers(records: &[AccidentRecord]) -> Vec<Marker> {
    records
        .iter()
        .map(|record| Marker {
            position: GeoPoint {
                lat: record.latitude,
                lng: record.longitude,
            },
            label: marker_label(&record.location_name),
        })
        .collect()
}

/// Position of the first record; `None` when there are no records.
pub fn initial_center(records: &[AccidentRecord]) -> Option<GeoPoint> {
    records.first().map(|record| GeoPoint {
        lat: record.latitude,
        lng: record.longitude,
    })
}

/// Half-span in degrees shown around the center at the default zoom level.
pub const MIN_HALF_SPAN: f64 = 0.02;
const MARGIN: f64 = 1.2;

/// Visible map area, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub half_span: f64,
}

impl Viewport {
    /// Centered on `center` and wide enough to show every marker.
    pub fn framing(center: GeoPoint, markers: &[Marker]) -> Self {
        let furthest = markers
            .iter()
            .map(|marker| {
                (marker.position.lat - center.lat)
                    .abs()
                    .max((marker.position.lng - center.lng).abs())
            })
            .fold(0.0_f64, f64::max);

        Self {
            center,
            half_span: (furthest * MARGIN).max(MIN_HALF_SPAN),
        }
    }

    pub fn lng_bounds(&self) -> [f64; 2] {
        [
            self.center.lng - self.half_span,
            self.center.lng + self.half_span,
        ]
    }

    pub fn lat_bounds(&self) -> [f64; 2] {
        [
            self.center.lat - self.half_span,
            self.center.lat + self.half_span,
        ]
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let [west, east] = self.lng_bounds();
        let [south, north] = self.lat_bounds();
        (west..=east).contains(&point.lng) && (south..=north).contains(&point.lat)
    }
}
