//! Shared data structures for the catalog
//!
//! These structs mirror the records of the static data file. Every field is
//! deserialized leniently: a missing or mistyped optional field degrades to an
//! empty list, an empty string or zero instead of failing the whole document.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A single point of interest
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Opaque identifier, unique across the places collection
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    /// Short teaser line shown on featured tiles
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub hook: Option<String>,
    /// Category, e.g. "Fort" or "Lake"
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub moods: Vec<String>,
    /// 0 to 5, displayed with one decimal
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub what_to_see: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub best_shots: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub respect_notes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub source_links: Vec<SourceLink>,
    /// Owned exclusively by this place, in display order
    #[serde(default, deserialize_with = "lenient_vec")]
    pub images: Vec<Image>,
}

/// Geographic position of a place
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    #[serde(deserialize_with = "lenient_number")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub lng: f64,
}

/// Labelled external reference shown in the place detail view
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SourceLink {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
}

/// Image descriptor
///
/// At least one of `direct_url` / `commons_file_page` should be present for
/// the image to be displayable. See [`crate::media::resolver`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub direct_url: Option<String>,
    /// Human-browsable file page, e.g. `https://commons.wikimedia.org/wiki/File:X.jpg`
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub commons_file_page: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub attribution: Option<String>,
}

/// Curated, ordered grouping of places
///
/// Referenced ids need not exist in the places collection.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub place_ids: Vec<String>,
}

/// The whole data file: `{ "places": [...], "routes": [...] }`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub places: Vec<Place>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub routes: Vec<Route>,
}

impl CatalogDocument {
    /// Parse a catalog from raw bytes.
    ///
    /// Only malformed JSON is an error. A well-formed document of the wrong
    /// shape (an array, a string, `null`) yields an empty catalog.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(value))
    }

    /// Build a catalog from an already-parsed JSON value
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

// ========== Lenient field decoders ==========

/// Sequence field: anything that is not an array becomes empty, and elements
/// that do not decode are dropped.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if decoded.len() < total {
        tracing::debug!(
            dropped = total - decoded.len(),
            "skipped malformed entries in catalog sequence"
        );
    }

    Ok(decoded)
}

fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Empty strings count as absent
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if number.is_finite() { number } else { 0.0 })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_place_decodes() {
        let doc = CatalogDocument::from_value(json!({
            "places": [{
                "id": "p1",
                "name": "Koilkonda Fort",
                "summary": "Hilltop ruins",
                "hook": "Sunrise over the ramparts",
                "type": "Fort",
                "moods": ["quiet", "history"],
                "rating": 4.5,
                "coordinates": { "lat": 16.7, "lng": 77.9 },
                "featured": true,
                "tags": ["ruins"],
                "whatToSee": ["Gateway"],
                "bestShots": ["West wall at dusk"],
                "respectNotes": ["Carry water"],
                "sourceLinks": [{ "label": "Wiki", "url": "https://example.com" }],
                "images": [{ "directUrl": "https://example.com/a.jpg", "title": "Gate" }]
            }],
            "routes": [{ "id": "r1", "name": "Forts", "placeIds": ["p1"] }]
        }));

        let place = &doc.places[0];
        assert_eq!(place.kind, "Fort");
        assert_eq!(place.hook.as_deref(), Some("Sunrise over the ramparts"));
        assert_eq!(place.coordinates, Some(Coordinates { lat: 16.7, lng: 77.9 }));
        assert!(place.featured);
        assert_eq!(place.what_to_see, vec!["Gateway"]);
        assert_eq!(place.source_links[0].label, "Wiki");
        assert_eq!(place.images[0].direct_url.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(doc.routes[0].place_ids, vec!["p1"]);
    }

    #[test]
    fn test_missing_optional_fields_degrade() {
        let doc = CatalogDocument::from_value(json!({
            "places": [{ "id": "p1", "name": "Bare" }]
        }));

        let place = &doc.places[0];
        assert!(place.tags.is_empty());
        assert!(place.images.is_empty());
        assert!(place.moods.is_empty());
        assert_eq!(place.rating, 0.0);
        assert_eq!(place.summary, "");
        assert_eq!(place.hook, None);
        assert_eq!(place.coordinates, None);
        assert!(doc.routes.is_empty());
    }

    #[test]
    fn test_mistyped_fields_degrade() {
        let doc = CatalogDocument::from_value(json!({
            "places": [{
                "id": 7,
                "name": "Odd",
                "tags": "not-a-list",
                "moods": null,
                "rating": "3.5",
                "coordinates": "somewhere",
                "featured": 0,
                "images": [{ "directUrl": "" }, 42]
            }],
            "routes": "nope"
        }));

        let place = &doc.places[0];
        assert_eq!(place.id, "7");
        assert!(place.tags.is_empty());
        assert!(place.moods.is_empty());
        assert_eq!(place.rating, 3.5);
        assert_eq!(place.coordinates, None);
        assert!(!place.featured);
        // The numeric entry is dropped, the empty url reads as absent
        assert_eq!(place.images, vec![Image::default()]);
        assert!(doc.routes.is_empty());
    }

    #[test]
    fn test_wrong_top_level_shape_is_empty() {
        let doc = CatalogDocument::from_slice(b"[1, 2, 3]").unwrap();
        assert_eq!(doc, CatalogDocument::default());

        let doc = CatalogDocument::from_slice(b"null").unwrap();
        assert_eq!(doc, CatalogDocument::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(CatalogDocument::from_slice(b"{ \"places\": [").is_err());
    }
}
