//! Application controller
//!
//! Single owner of the catalog, the selection criteria, the derived views
//! and the overlay state. Every user event goes through one of its methods;
//! each mutation that affects the visible set re-runs the pipeline
//! synchronously, so views always reflect the latest selection.

use super::data::{CatalogDocument, Place, Route};
use super::lightbox::{Direction, FocusTarget, Lightbox, Modal};
use super::pipeline::filter_places;
use super::selection::{Filter, Selection, SortKey};
use super::views::{self, FeaturedTile, FilterOption, ImageEntry, PlaceCard, PlaceDetail};
use crate::error::LoadError;
use crate::media::resolver::ImageResolver;

pub const STATUS_LOADING: &str = "Loading places…";
pub const STATUS_LOAD_FAILED: &str = "Could not load place data.";

/// Keys handled while an overlay is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Select box choices, computed once per load
#[derive(Debug, Clone, Default)]
struct Options {
    types: Vec<FilterOption>,
    moods: Vec<FilterOption>,
    routes: Vec<FilterOption>,
    image_places: Vec<FilterOption>,
}

/// Derived views for the current selection
#[derive(Debug, Clone, Default)]
struct Derived {
    cards: Vec<PlaceCard>,
    featured: Vec<FeaturedTile>,
    gallery: Vec<ImageEntry>,
}

#[derive(Debug)]
pub struct Controller {
    places: Vec<Place>,
    routes: Vec<Route>,
    selection: Selection,
    image_place: Filter<String>,
    resolver: ImageResolver,
    maps_base: String,

    load_state: LoadState,
    status: String,
    options: Options,
    derived: Derived,
    library: Vec<ImageEntry>,

    modal: Modal,
    lightbox: Lightbox,
    /// Element that should hold focus after the last overlay closed
    focus: Option<FocusTarget>,
}

impl Controller {
    pub fn new(resolver: ImageResolver, maps_base: impl Into<String>) -> Self {
        Self {
            places: Vec::new(),
            routes: Vec::new(),
            selection: Selection::default(),
            image_place: Filter::All,
            resolver,
            maps_base: maps_base.into(),
            load_state: LoadState::Loading,
            status: STATUS_LOADING.to_string(),
            options: Options::default(),
            derived: Derived::default(),
            library: Vec::new(),
            modal: Modal::default(),
            lightbox: Lightbox::default(),
            focus: None,
        }
    }

    /// Start from a non-default sort key
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.selection.sort = sort;
        self
    }

    // ========== Load ==========

    /// Apply the outcome of the initial load.
    ///
    /// A failure leaves the catalog empty and sets the one status message.
    pub fn finish_load(&mut self, result: Result<CatalogDocument, LoadError>) {
        match result {
            Ok(document) => {
                self.places = document.places;
                self.routes = document.routes;
                self.load_state = LoadState::Ready;
                self.options = Options {
                    types: views::type_options(&self.places),
                    moods: views::mood_options(&self.places),
                    routes: views::route_options(&self.routes),
                    image_places: views::image_place_options(&self.places),
                };
                self.rederive();
                self.refresh_library();
            }
            Err(err) => {
                tracing::error!(error = %err, "could not load place data");
                self.places.clear();
                self.routes.clear();
                self.load_state = LoadState::Failed;
                self.options = Options::default();
                self.derived = Derived::default();
                self.library.clear();
                self.status = STATUS_LOAD_FAILED.to_string();
            }
        }
    }

    // ========== Selection ==========

    pub fn set_query(&mut self, query: String) {
        self.selection.query = query;
        self.rederive();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.selection.sort = sort;
        self.rederive();
    }

    pub fn set_type(&mut self, kind: Filter<String>) {
        self.selection.kind = kind;
        self.rederive();
    }

    pub fn set_mood(&mut self, mood: Filter<String>) {
        self.selection.mood = mood;
        self.rederive();
    }

    pub fn set_route(&mut self, route: Filter<String>) {
        self.selection.route = route;
        self.rederive();
    }

    /// The image library has its own scope and does not re-run the pipeline
    pub fn set_image_place(&mut self, place: Filter<String>) {
        self.image_place = place;
        self.refresh_library();
    }

    /// Re-run the pipeline and rebuild cards, featured strip and gallery
    fn rederive(&mut self) {
        if self.load_state != LoadState::Ready {
            return;
        }

        let visible = filter_places(&self.places, &self.routes, &self.selection);
        self.derived = Derived {
            cards: views::place_cards(&visible),
            featured: views::featured_strip(&visible, &self.resolver),
            gallery: views::gallery_images(visible.iter().copied(), &self.resolver),
        };
        self.status = format!("{} places found.", visible.len());
        self.lightbox.rebase(self.derived.gallery.len());

        tracing::debug!(
            visible = visible.len(),
            gallery = self.derived.gallery.len(),
            "re-derived views"
        );
    }

    fn refresh_library(&mut self) {
        self.library = views::image_library(&self.places, &self.image_place, &self.resolver);
    }

    // ========== Modal ==========

    /// Open the detail view for a place. Unknown ids are ignored.
    pub fn open_place(&mut self, place_id: &str, trigger: FocusTarget) {
        if self.place(place_id).is_none() {
            tracing::warn!(place_id, "ignoring request to open unknown place");
            return;
        }
        self.focus = None;
        self.modal.open(place_id.to_string(), trigger);
    }

    pub fn close_place(&mut self) {
        if let Some(trigger) = self.modal.close() {
            self.focus = Some(trigger);
        }
    }

    pub fn place_detail(&self) -> Option<PlaceDetail> {
        let place = self.place(self.modal.place_id()?)?;
        Some(views::place_detail(place, &self.maps_base))
    }

    // ========== Lightbox ==========

    /// Open the lightbox on gallery entry `index`
    pub fn open_lightbox(&mut self, index: usize) {
        let len = self.derived.gallery.len();
        let Some(trigger) = self.derived.gallery.get(index).map(ImageEntry::focus_target) else {
            tracing::warn!(index, len, "ignoring lightbox request outside the gallery");
            return;
        };
        if self.lightbox.open(index, len, trigger) {
            self.focus = None;
            tracing::trace!(index, len, "lightbox opened");
        }
    }

    pub fn step_lightbox(&mut self, direction: Direction) {
        self.lightbox.step(direction, self.derived.gallery.len());
        tracing::trace!(index = ?self.lightbox.index(), ?direction, "lightbox step");
    }

    pub fn close_lightbox(&mut self) {
        if let Some(trigger) = self.lightbox.close() {
            self.focus = Some(trigger);
            tracing::trace!("lightbox closed");
        }
    }

    /// The image the lightbox shows, if it is open
    pub fn lightbox_image(&self) -> Option<&ImageEntry> {
        self.lightbox.current(&self.derived.gallery)
    }

    /// "3 / 12"
    pub fn lightbox_position(&self) -> Option<String> {
        let index = self.lightbox.index()?;
        Some(format!("{} / {}", index + 1, self.derived.gallery.len()))
    }

    // ========== Keyboard ==========

    /// Escape closes whatever is open (lightbox first, then the modal);
    /// arrows step the lightbox only while it is open.
    pub fn handle_key(&mut self, key: NavKey) {
        match key {
            NavKey::Escape => {
                if self.lightbox.is_open() {
                    self.close_lightbox();
                }
                if self.modal.is_open() {
                    self.close_place();
                }
            }
            NavKey::ArrowLeft if self.lightbox.is_open() => self.step_lightbox(Direction::Previous),
            NavKey::ArrowRight if self.lightbox.is_open() => self.step_lightbox(Direction::Next),
            NavKey::ArrowLeft | NavKey::ArrowRight => {}
        }
    }

    // ========== Accessors ==========

    pub fn place(&self, place_id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == place_id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn image_place(&self) -> &Filter<String> {
        &self.image_place
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// The single status line shown above the results
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn cards(&self) -> &[PlaceCard] {
        &self.derived.cards
    }

    pub fn featured(&self) -> &[FeaturedTile] {
        &self.derived.featured
    }

    pub fn gallery(&self) -> &[ImageEntry] {
        &self.derived.gallery
    }

    pub fn library(&self) -> &[ImageEntry] {
        &self.library
    }

    pub fn type_options(&self) -> &[FilterOption] {
        &self.options.types
    }

    pub fn mood_options(&self) -> &[FilterOption] {
        &self.options.moods
    }

    pub fn route_options(&self) -> &[FilterOption] {
        &self.options.routes
    }

    pub fn image_place_options(&self) -> &[FilterOption] {
        &self.options.image_places
    }

    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    pub fn modal_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox.is_open()
    }

    /// Resolved URLs the presentation displays as bitmaps: the featured
    /// strip, then every displayable gallery figure (which includes the
    /// lightbox's current image). Duplicates are dropped.
    pub fn wanted_images(&self) -> Vec<String> {
        let featured = self.derived.featured.iter().map(|tile| &tile.src);
        let gallery = self
            .derived
            .gallery
            .iter()
            .filter(|entry| entry.is_displayable())
            .map(|entry| &entry.src);

        let mut urls: Vec<String> = Vec::new();
        for src in featured.chain(gallery) {
            if !urls.contains(src) {
                urls.push(src.clone());
            }
        }
        urls
    }
}

/// The option in `options` whose value equals `filter`
pub fn selected_option<'a>(options: &'a [FilterOption], filter: &Filter<String>) -> Option<&'a FilterOption> {
    options.iter().find(|option| &option.value == filter)
}
