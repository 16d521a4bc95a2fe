//! Filter/sort pipeline
//!
//! Pure function of (places, routes, selection) → ordered visible places.
//! Every derived view is built from its output.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::collate;
use super::data::{Place, Route};
use super::selection::{Filter, Selection, SortKey};

/// Derive the currently visible places.
///
/// Never fails: an unknown route, an empty catalog or an over-constrained
/// selection all yield an empty (but valid) result.
pub fn filter_places<'a>(places: &'a [Place], routes: &[Route], selection: &Selection) -> Vec<&'a Place> {
    let query = selection.query.trim().to_lowercase();
    let route_members = route_membership(routes, &selection.route);

    let mut visible: Vec<&Place> = places
        .iter()
        .filter(|place| matches_query(place, &query))
        .filter(|place| selection.kind.matches(&place.kind))
        .filter(|place| selection.mood.matches_any(&place.moods))
        .filter(|place| {
            route_members
                .as_ref()
                .map_or(true, |members| members.contains(place.id.as_str()))
        })
        .collect();

    sort_places(&mut visible, selection.sort);
    visible
}

/// Ids referenced by the selected route.
///
/// `None` means unconstrained. A route id that does not exist yields an
/// empty set, so nothing matches.
fn route_membership<'r>(routes: &'r [Route], route: &Filter<String>) -> Option<HashSet<&'r str>> {
    let Filter::Only(route_id) = route else {
        return None;
    };

    let members = routes
        .iter()
        .find(|route| &route.id == route_id)
        .map(|route| route.place_ids.iter().map(String::as_str).collect())
        .unwrap_or_default();

    Some(members)
}

/// Case-insensitive substring match over "name summary tag1 tag2 ...".
/// `query` must already be trimmed and lower-cased; empty matches everything.
fn matches_query(place: &Place, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    searchable_text(place).contains(query)
}

fn searchable_text(place: &Place) -> String {
    format!("{} {} {}", place.name, place.summary, place.tags.join(" ")).to_lowercase()
}

/// Stable sort by the selected key
pub fn sort_places(places: &mut [&Place], key: SortKey) {
    match key {
        SortKey::Rating => places.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Type => places.sort_by(|a, b| {
            collate::compare(&a.kind, &b.kind).then_with(|| collate::compare(&a.name, &b.name))
        }),
        SortKey::Az => places.sort_by(|a, b| by_name(a, b)),
    }
}

fn by_name(a: &Place, b: &Place) -> Ordering {
    collate::compare(&a.name, &b.name)
}
