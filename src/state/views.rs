//! Derived view builders
//!
//! Read-only projections over the pipeline output (and, for the image
//! library, over the full catalog). Each produces owned view models the
//! presentation layer renders without touching the catalog again.

use std::collections::BTreeSet;
use std::fmt;

use super::data::{Place, Route, SourceLink};
use super::lightbox::FocusTarget;
use super::selection::Filter;
use crate::media::resolver::{encode_uri_component, ImageResolver};

/// Shown in place of an empty detail list
pub const EMPTY_LIST_FALLBACK: &str = "Check official updates before visiting.";

/// One entry in the place card grid
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCard {
    pub place_id: String,
    pub name: String,
    /// "Type: Fort · Rating: 4.5"
    pub meta: String,
    pub summary: String,
    pub moods: Vec<String>,
}

/// One tile in the featured strip
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedTile {
    pub place_id: String,
    pub name: String,
    /// Resolved at featured width, never empty
    pub src: String,
    pub alt: String,
    /// The place's hook, or its summary when it has none
    pub blurb: String,
}

/// An image tagged with its owning place.
///
/// Backs the gallery, the lightbox and the image library.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub place_id: String,
    pub place_name: String,
    /// Position among the owning place's images
    pub image_index: usize,
    /// Resolved display URL, empty if the descriptor had nothing usable
    pub src: String,
    pub title: Option<String>,
    pub license: Option<String>,
    pub author: Option<String>,
    pub attribution: Option<String>,
    pub file_page: Option<String>,
}

impl ImageEntry {
    /// Gallery and lightbox heading: the title, or the place name
    pub fn heading(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.place_name)
    }

    /// "Place · License · Author"
    pub fn credit_line(&self) -> String {
        let mut line = format!(
            "{} · {}",
            self.place_name,
            self.license.as_deref().unwrap_or("License pending")
        );
        if let Some(author) = &self.author {
            line.push_str(" · ");
            line.push_str(author);
        }
        line
    }

    pub fn attribution_line(&self) -> &str {
        self.attribution.as_deref().unwrap_or("Attribution pending")
    }

    pub fn source_link(&self) -> &str {
        self.file_page.as_deref().unwrap_or("#")
    }

    /// Image library heading
    pub fn library_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled image")
    }

    pub fn is_displayable(&self) -> bool {
        !self.src.is_empty()
    }

    /// Focus key for the gallery figure showing this image
    pub fn focus_target(&self) -> FocusTarget {
        FocusTarget::GalleryFigure {
            place_id: self.place_id.clone(),
            image: self.image_index,
        }
    }
}

/// Everything the place detail (modal) view shows
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    pub hook: String,
    pub summary: String,
    /// "Rating: 4.5 / 5"
    pub rating_line: String,
    pub what_to_see: Vec<String>,
    pub best_shots: Vec<String>,
    pub respect_notes: Vec<String>,
    pub tags: Vec<String>,
    pub sources: Vec<SourceLink>,
    pub map_url: String,
}

/// Choice in a filter select box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: Filter<String>,
    pub label: String,
}

impl FilterOption {
    fn all(label: &str) -> Self {
        Self { value: Filter::All, label: label.to_string() }
    }

    fn only(value: &str, label: &str) -> Self {
        Self { value: Filter::Only(value.to_string()), label: label.to_string() }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// ========== Pipeline projections ==========

/// Featured places that have a displayable first image, in pipeline order
pub fn featured_strip(visible: &[&Place], resolver: &ImageResolver) -> Vec<FeaturedTile> {
    visible
        .iter()
        .filter(|place| place.featured)
        .filter_map(|place| {
            let first = place.images.first()?;
            let src = resolver.featured_url(first);
            if src.is_empty() {
                return None;
            }
            Some(FeaturedTile {
                place_id: place.id.clone(),
                name: place.name.clone(),
                src,
                alt: first.title.clone().unwrap_or_else(|| place.name.clone()),
                blurb: place.hook.clone().unwrap_or_else(|| place.summary.clone()),
            })
        })
        .collect()
}

/// Flatten places into their images: outer order is place order, inner order
/// is each place's image order.
pub fn gallery_images<'a, I>(places: I, resolver: &ImageResolver) -> Vec<ImageEntry>
where
    I: IntoIterator<Item = &'a Place>,
{
    places
        .into_iter()
        .flat_map(|place| {
            place.images.iter().enumerate().map(move |(image_index, image)| ImageEntry {
                place_id: place.id.clone(),
                place_name: place.name.clone(),
                image_index,
                src: resolver.gallery_url(image),
                title: image.title.clone(),
                license: image.license.clone(),
                author: image.author.clone(),
                attribution: image.attribution.clone(),
                file_page: image.commons_file_page.clone(),
            })
        })
        .collect()
}

/// Image library listing.
///
/// Scoped independently of the search/type/mood/route filters: `All` lists
/// every image in the full catalog, otherwise only the selected place's.
pub fn image_library(places: &[Place], place_filter: &Filter<String>, resolver: &ImageResolver) -> Vec<ImageEntry> {
    gallery_images(places.iter().filter(|place| place_filter.matches(&place.id)), resolver)
}

pub fn place_cards(visible: &[&Place]) -> Vec<PlaceCard> {
    visible
        .iter()
        .map(|place| PlaceCard {
            place_id: place.id.clone(),
            name: place.name.clone(),
            meta: format!("Type: {} · Rating: {}", place.kind, rating_one_decimal(place.rating)),
            summary: place.summary.clone(),
            moods: place.moods.clone(),
        })
        .collect()
}

pub fn place_detail(place: &Place, maps_base: &str) -> PlaceDetail {
    PlaceDetail {
        place_id: place.id.clone(),
        name: place.name.clone(),
        hook: place.hook.clone().unwrap_or_default(),
        summary: place.summary.clone(),
        rating_line: format!("Rating: {} / 5", rating_one_decimal(place.rating)),
        what_to_see: with_fallback(&place.what_to_see),
        best_shots: with_fallback(&place.best_shots),
        respect_notes: with_fallback(&place.respect_notes),
        tags: place.tags.clone(),
        sources: place.source_links.clone(),
        map_url: maps_url(place, maps_base),
    }
}

/// One decimal place, halves rounded up: 4.25 shows as "4.3"
fn rating_one_decimal(rating: f64) -> String {
    format!("{:.1}", (rating * 10.0).round() / 10.0)
}

fn with_fallback(items: &[String]) -> Vec<String> {
    if items.is_empty() {
        vec![EMPTY_LIST_FALLBACK.to_string()]
    } else {
        items.to_vec()
    }
}

/// Map deep link: by coordinates when both are set (and non-zero), by name
/// otherwise
pub fn maps_url(place: &Place, maps_base: &str) -> String {
    let base = maps_base.trim_end_matches('/');
    match place.coordinates {
        Some(coords) if coords.lat != 0.0 && coords.lng != 0.0 => {
            format!("{}?q={},{}", base, coords.lat, coords.lng)
        }
        _ => format!("{}/search/?api=1&query={}", base, encode_uri_component(&place.name)),
    }
}

// ========== Select box options ==========

/// Distinct non-empty types, sorted
pub fn type_options(places: &[Place]) -> Vec<FilterOption> {
    let types: BTreeSet<&str> = places
        .iter()
        .map(|place| place.kind.as_str())
        .filter(|kind| !kind.is_empty())
        .collect();

    std::iter::once(FilterOption::all("All types"))
        .chain(types.into_iter().map(|kind| FilterOption::only(kind, kind)))
        .collect()
}

/// Distinct moods across every place, sorted
pub fn mood_options(places: &[Place]) -> Vec<FilterOption> {
    let moods: BTreeSet<&str> = places
        .iter()
        .flat_map(|place| place.moods.iter().map(String::as_str))
        .collect();

    std::iter::once(FilterOption::all("All moods"))
        .chain(moods.into_iter().map(|mood| FilterOption::only(mood, mood)))
        .collect()
}

/// Routes in document order
pub fn route_options(routes: &[Route]) -> Vec<FilterOption> {
    std::iter::once(FilterOption::all("All routes"))
        .chain(routes.iter().map(|route| FilterOption::only(&route.id, &route.name)))
        .collect()
}

/// Places in document order, for the image library
pub fn image_place_options(places: &[Place]) -> Vec<FilterOption> {
    std::iter::once(FilterOption::all("All places"))
        .chain(places.iter().map(|place| FilterOption::only(&place.id, &place.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Coordinates, Image};

    fn direct(url: &str) -> Image {
        Image {
            direct_url: Some(url.to_string()),
            ..Image::default()
        }
    }

    fn place(id: &str, images: Vec<Image>) -> Place {
        Place {
            id: id.to_string(),
            name: format!("Place {id}"),
            summary: format!("About {id}"),
            images,
            ..Place::default()
        }
    }

    #[test]
    fn test_featured_needs_flag_and_displayable_first_image() {
        let mut with_image = place("a", vec![direct("https://example.com/a.jpg")]);
        with_image.featured = true;
        with_image.hook = Some("Hook A".to_string());
        let mut no_images = place("b", vec![]);
        no_images.featured = true;
        let not_featured = place("c", vec![direct("https://example.com/c.jpg")]);
        let mut unresolvable = place("d", vec![Image::default(), direct("https://example.com/d.jpg")]);
        unresolvable.featured = true;
        let mut no_hook = place("e", vec![direct("https://example.com/e.jpg")]);
        no_hook.featured = true;

        let visible = vec![&with_image, &no_images, &not_featured, &unresolvable, &no_hook];
        let tiles = featured_strip(&visible, &ImageResolver::default());

        let ids: Vec<&str> = tiles.iter().map(|t| t.place_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(tiles[0].blurb, "Hook A");
        assert_eq!(tiles[0].alt, "Place a");
        assert_eq!(tiles[1].blurb, "About e");
    }

    #[test]
    fn test_featured_resolves_at_featured_width() {
        let mut featured = place(
            "a",
            vec![Image {
                commons_file_page: Some("https://commons.wikimedia.org/wiki/File:Lake.jpg".to_string()),
                title: Some("Lake at dawn".to_string()),
                ..Image::default()
            }],
        );
        featured.featured = true;

        let tiles = featured_strip(&[&featured], &ImageResolver::default());
        assert!(tiles[0].src.ends_with("?width=900"));
        assert_eq!(tiles[0].alt, "Lake at dawn");
    }

    #[test]
    fn test_gallery_order_is_place_then_image() {
        let first = place("a", vec![direct("https://example.com/a1.jpg"), direct("https://example.com/a2.jpg")]);
        let second = place("b", vec![direct("https://example.com/b1.jpg")]);

        let entries = gallery_images([&second, &first], &ImageResolver::default());
        let srcs: Vec<&str> = entries.iter().map(|e| e.src.as_str()).collect();

        assert_eq!(
            srcs,
            vec!["https://example.com/b1.jpg", "https://example.com/a1.jpg", "https://example.com/a2.jpg"]
        );
        assert_eq!(entries[1].place_id, "a");
        assert_eq!(entries[1].place_name, "Place a");
        assert_eq!(entries[2].image_index, 1);
        assert_eq!(
            entries[2].focus_target(),
            FocusTarget::GalleryFigure {
                place_id: "a".to_string(),
                image: 1
            }
        );
    }

    #[test]
    fn test_gallery_keeps_unresolvable_entries_with_empty_src() {
        let p = place("a", vec![Image::default()]);
        let entries = gallery_images([&p], &ImageResolver::default());

        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_displayable());
    }

    #[test]
    fn test_image_library_scope() {
        let places = vec![
            place("a", vec![direct("https://example.com/a.jpg")]),
            place("b", vec![direct("https://example.com/b1.jpg"), direct("https://example.com/b2.jpg")]),
            place("c", vec![]),
        ];
        let resolver = ImageResolver::default();

        assert_eq!(image_library(&places, &Filter::All, &resolver).len(), 3);

        let only_b = image_library(&places, &Filter::Only("b".to_string()), &resolver);
        assert_eq!(only_b.len(), 2);
        assert!(only_b.iter().all(|e| e.place_id == "b"));

        assert!(image_library(&places, &Filter::Only("zzz".to_string()), &resolver).is_empty());
    }

    #[test]
    fn test_entry_captions() {
        let mut entry = gallery_images([&place("a", vec![Image::default()])], &ImageResolver::default()).remove(0);
        assert_eq!(entry.heading(), "Place a");
        assert_eq!(entry.credit_line(), "Place a · License pending");
        assert_eq!(entry.attribution_line(), "Attribution pending");
        assert_eq!(entry.source_link(), "#");
        assert_eq!(entry.library_title(), "Untitled image");

        entry.title = Some("Gate".to_string());
        entry.license = Some("CC BY-SA 4.0".to_string());
        entry.author = Some("R. Rao".to_string());
        assert_eq!(entry.heading(), "Gate");
        assert_eq!(entry.credit_line(), "Place a · CC BY-SA 4.0 · R. Rao");
    }

    #[test]
    fn test_card_meta_uses_one_decimal() {
        let mut p = place("a", vec![]);
        p.kind = "Fort".to_string();
        p.rating = 4.0;
        p.moods = vec!["quiet".to_string()];

        let cards = place_cards(&[&p]);
        assert_eq!(cards[0].meta, "Type: Fort · Rating: 4.0");
        assert_eq!(cards[0].moods, vec!["quiet"]);
    }

    #[test]
    fn test_rating_ties_round_up() {
        let mut p = place("a", vec![]);
        p.kind = "Fort".to_string();
        p.rating = 4.25;

        assert_eq!(place_cards(&[&p])[0].meta, "Type: Fort · Rating: 4.3");
        assert_eq!(place_detail(&p, "https://www.google.com/maps").rating_line, "Rating: 4.3 / 5");

        p.rating = 4.75;
        assert_eq!(place_cards(&[&p])[0].meta, "Type: Fort · Rating: 4.8");
    }

    #[test]
    fn test_detail_lists_fall_back() {
        let mut p = place("a", vec![]);
        p.rating = 3.26;
        p.what_to_see = vec!["Stepwell".to_string()];

        let detail = place_detail(&p, "https://www.google.com/maps");
        assert_eq!(detail.rating_line, "Rating: 3.3 / 5");
        assert_eq!(detail.what_to_see, vec!["Stepwell"]);
        assert_eq!(detail.best_shots, vec![EMPTY_LIST_FALLBACK]);
        assert_eq!(detail.respect_notes, vec![EMPTY_LIST_FALLBACK]);
        assert_eq!(detail.hook, "");
    }

    #[test]
    fn test_maps_url() {
        let mut p = place("a", vec![]);
        p.name = "Mallela Theertham".to_string();
        assert_eq!(
            maps_url(&p, "https://www.google.com/maps"),
            "https://www.google.com/maps/search/?api=1&query=Mallela%20Theertham"
        );

        p.coordinates = Some(Coordinates { lat: 16.25, lng: 78.5 });
        assert_eq!(maps_url(&p, "https://www.google.com/maps"), "https://www.google.com/maps?q=16.25,78.5");

        p.coordinates = Some(Coordinates { lat: 0.0, lng: 78.5 });
        assert!(maps_url(&p, "https://www.google.com/maps").contains("/search/"));
    }

    #[test]
    fn test_filter_options() {
        let mut a = place("a", vec![]);
        a.kind = "Lake".to_string();
        a.moods = vec!["quiet".to_string(), "birds".to_string()];
        let mut b = place("b", vec![]);
        b.kind = "Fort".to_string();
        b.moods = vec!["quiet".to_string()];
        let c = place("c", vec![]);
        let places = vec![a, b, c];

        let types: Vec<String> = type_options(&places).iter().map(|o| o.label.clone()).collect();
        assert_eq!(types, vec!["All types", "Fort", "Lake"]);

        let moods: Vec<String> = mood_options(&places).iter().map(|o| o.label.clone()).collect();
        assert_eq!(moods, vec!["All moods", "birds", "quiet"]);

        let image_places = image_place_options(&places);
        assert_eq!(image_places[0].value, Filter::All);
        assert_eq!(image_places[1].value, Filter::Only("a".to_string()));
        assert_eq!(image_places[1].to_string(), "Place a");

        let routes = route_options(&[Route {
            id: "r1".to_string(),
            name: "Fort loop".to_string(),
            place_ids: vec![],
        }]);
        assert_eq!(routes[1], FilterOption::only("r1", "Fort loop"));
    }
}
