// SPDX-License-Identifier: MPL-2.0
//! Signed decimal location derived from the GPS IFD.

// =============================================================================
// GpsCoordinates
// =============================================================================

/// Map zoom level used for generated map links.
const MAP_ZOOM: u8 = 6;

/// GPS coordinates in signed decimal degrees.
///
/// This is what map consumers get out of a metadata store: the DMS triplets
/// combined with their hemisphere references. `(0.0, 0.0)` doubles as the
/// "no coordinate" value, since an absent axis decodes to `0.0`.
///
/// # Example
///
/// ```ignore
/// let coords = GpsCoordinates::new(48.8566, 2.3522); // Paris
/// assert_eq!(coords.format(), "48.856600° N, 2.352200° E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsCoordinates {
    /// Latitude in decimal degrees (-90.0 to 90.0)
    latitude: f64,
    /// Longitude in decimal degrees (-180.0 to 180.0)
    longitude: f64,
}

impl GpsCoordinates {
    /// Creates new GPS coordinates, clamping each axis to its valid range.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether this is the null island (0,0), i.e. no stored location.
    #[must_use]
    pub fn is_null_island(&self) -> bool {
        self.latitude.abs() < f64::EPSILON && self.longitude.abs() < f64::EPSILON
    }

    /// Hemisphere reference for the latitude (`N` or `S`).
    #[must_use]
    pub fn latitude_reference(&self) -> u8 {
        if self.latitude >= 0.0 {
            b'N'
        } else {
            b'S'
        }
    }

    /// Hemisphere reference for the longitude (`E` or `W`).
    #[must_use]
    pub fn longitude_reference(&self) -> u8 {
        if self.longitude >= 0.0 {
            b'E'
        } else {
            b'W'
        }
    }

    /// Formats the coordinates as a human-readable string.
    ///
    /// Format: "48.856600° N, 2.352200° E"
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{:.6}° {}, {:.6}° {}",
            self.latitude.abs(),
            char::from(self.latitude_reference()),
            self.longitude.abs(),
            char::from(self.longitude_reference())
        )
    }

    /// OpenStreetMap link centered on the location.
    #[must_use]
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={MAP_ZOOM}/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
