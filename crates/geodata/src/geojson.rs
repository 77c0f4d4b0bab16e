//! Country collections from GeoJSON.

use serde_json::Value;
use tracing::debug;

use foundation::math::GeoPoint;

use crate::{Country, GeoData, GeoDataError, Polygon, Ring};

/// Parses a `FeatureCollection` of `Polygon`/`MultiPolygon` features into a
/// [`GeoData`] set. Features with other geometry types are skipped.
pub fn parse_countries(payload: &str) -> Result<GeoData, GeoDataError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| GeoDataError::Parse(e.to_string()))?;
    countries_from_value(&value).map(GeoData::from_countries)
}

pub fn countries_from_value(value: &Value) -> Result<Vec<Country>, GeoDataError> {
    let obj = value.as_object().ok_or(GeoDataError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(GeoDataError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(GeoDataError::NotAFeatureCollection);
    }
    let features = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeoDataError::NotAFeatureCollection)?;

    let mut countries = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let invalid = |reason: String| GeoDataError::InvalidFeature { index, reason };
        let feature = feature
            .as_object()
            .ok_or_else(|| invalid("feature must be an object".to_string()))?;

        let id = match feature.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let properties = feature.get("properties").and_then(|v| v.as_object());
        let name = properties
            .and_then(|p| p.get("name_en").or_else(|| p.get("name")))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| id.clone())
            .unwrap_or_default();

        let geometry = feature
            .get("geometry")
            .ok_or_else(|| invalid("feature missing geometry".to_string()))?;
        let Some(polygons) = parse_areal(geometry).map_err(invalid)? else {
            debug!(index, %name, "skipping non-areal feature");
            continue;
        };
        countries.push(Country { id, name, polygons });
    }
    Ok(countries)
}

/// `Ok(None)` for geometry types that carry no area.
fn parse_areal(value: &Value) -> Result<Option<Vec<Polygon>>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    let coords = || {
        obj.get("coordinates")
            .ok_or("geometry missing coordinates".to_string())
    };

    match ty {
        "Polygon" => Ok(Some(vec![parse_polygon(coords()?)?])),
        "MultiPolygon" => {
            let polys = coords()?
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            polys.iter().map(parse_polygon).collect::<Result<_, _>>().map(Some)
        }
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" => Ok(None),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_polygon(coords: &Value) -> Result<Polygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_position(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}
