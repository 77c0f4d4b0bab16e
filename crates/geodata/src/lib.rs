//! Geographic data for the globe chart.
//!
//! The globe consumes a [`GeoData`] set (countries, borders, land) through the
//! asynchronous [`GeoDataProvider`] seam. A GeoJSON reader is provided for
//! country collections; topology formats are expected to be converted before
//! they reach this crate.

pub mod geojson;
pub mod provider;

pub use geojson::*;
pub use provider::*;

use foundation::math::{GeoPoint, geo_centroid};

pub type Ring = Vec<GeoPoint>;
/// Exterior ring first, then holes.
pub type Polygon = Vec<Ring>;

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: Option<String>,
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Country {
    /// Spherical centroid of the country's exterior rings.
    pub fn centroid(&self) -> Option<GeoPoint> {
        let exteriors: Vec<Ring> = self
            .polygons
            .iter()
            .filter_map(|p| p.first().cloned())
            .collect();
        geo_centroid(&exteriors)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoData {
    pub countries: Vec<Country>,
    pub borders: Vec<Vec<GeoPoint>>,
    pub land: Vec<Polygon>,
}

impl GeoData {
    /// Builds the set from countries alone: land is the union of all country
    /// polygons (kept as separate polygons) and borders are the country
    /// outlines.
    pub fn from_countries(countries: Vec<Country>) -> Self {
        let land: Vec<Polygon> = countries
            .iter()
            .flat_map(|c| c.polygons.iter().cloned())
            .collect();
        let borders = land.iter().filter_map(|p| p.first().cloned()).collect();
        Self {
            countries,
            borders,
            land,
        }
    }

    pub fn country_index(&self, name: &str) -> Option<usize> {
        self.countries
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug)]
pub enum GeoDataError {
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    Parse(String),
    NotAFeatureCollection,
    InvalidFeature {
        index: usize,
        reason: String,
    },
}

impl std::fmt::Display for GeoDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoDataError::Io { path, source } => {
                write!(f, "failed to read geo data {}: {source}", path.display())
            }
            GeoDataError::Parse(msg) => write!(f, "geo data parse error: {msg}"),
            GeoDataError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoDataError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoDataError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
