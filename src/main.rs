use clap::Parser;
use iced::keyboard::{self, key::Named, Key};
use iced::widget::Stack;
use iced::{Element, Subscription, Task, Theme};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::AppConfig;
use error::{LoadError, MediaError};
use media::fetch::{fetch_image, ImageCache};
use state::controller::{Controller, NavKey};
use state::data::CatalogDocument;
use state::lightbox::{Direction, FocusTarget};
use state::loader::load_catalog;
use state::selection::{Filter, SortKey};

/// Command line flags
#[derive(Parser, Debug)]
#[command(name = "hidden-places", version)]
#[command(about = "Browse a curated catalog of hidden places, routes and photos")]
struct Cli {
    /// Catalog document: a local path or an http(s) URL
    #[arg(long)]
    data: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not download image bitmaps (captions are shown instead)
    #[arg(long)]
    no_remote_images: bool,
}

/// Main application state
struct HiddenPlaces {
    /// Catalog, selection, derived views and overlays
    controller: Controller,
    /// Bitmaps downloaded this session
    images: ImageCache,
    remote_images: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The initial catalog load finished
    CatalogLoaded(Result<CatalogDocument, LoadError>),
    QueryChanged(String),
    SortSelected(SortKey),
    TypeSelected(Filter<String>),
    MoodSelected(Filter<String>),
    RouteSelected(Filter<String>),
    ImagePlaceSelected(Filter<String>),
    /// A card or featured tile was clicked
    OpenPlace { place_id: String, trigger: FocusTarget },
    ClosePlace,
    /// A gallery figure was clicked
    OpenLightbox(usize),
    LightboxStep(Direction),
    CloseLightbox,
    /// Escape / arrow keys, handled only while an overlay is open
    KeyPressed(NavKey),
    /// A background image download finished
    ImageFetched {
        url: String,
        result: Result<Vec<u8>, MediaError>,
    },
}

impl HiddenPlaces {
    /// Create the application and start the one catalog load
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let controller = Controller::new(config.resolver(), config.maps_base.clone()).with_sort(config.sort_key());
        let source = config.data_source();

        tracing::info!(source = %source, remote_images = config.remote_images, "starting");

        (
            HiddenPlaces {
                controller,
                images: ImageCache::new(),
                remote_images: config.remote_images,
            },
            Task::perform(load_catalog(source), Message::CatalogLoaded),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(result) => self.controller.finish_load(result),
            Message::QueryChanged(query) => self.controller.set_query(query),
            Message::SortSelected(sort) => self.controller.set_sort(sort),
            Message::TypeSelected(kind) => self.controller.set_type(kind),
            Message::MoodSelected(mood) => self.controller.set_mood(mood),
            Message::RouteSelected(route) => self.controller.set_route(route),
            Message::ImagePlaceSelected(place) => self.controller.set_image_place(place),
            Message::OpenPlace { place_id, trigger } => self.controller.open_place(&place_id, trigger),
            Message::ClosePlace => self.controller.close_place(),
            Message::OpenLightbox(index) => self.controller.open_lightbox(index),
            Message::LightboxStep(direction) => self.controller.step_lightbox(direction),
            Message::CloseLightbox => self.controller.close_lightbox(),
            Message::KeyPressed(key) => self.controller.handle_key(key),
            Message::ImageFetched { url, result } => {
                self.images.complete(url, result);
                return Task::none();
            }
        }

        // Any of the above may have changed which bitmaps are on screen
        self.fetch_missing_images()
    }

    /// Start downloads for displayed images that are not cached yet
    fn fetch_missing_images(&mut self) -> Task<Message> {
        if !self.remote_images {
            return Task::none();
        }

        let tasks: Vec<Task<Message>> = self
            .controller
            .wanted_images()
            .into_iter()
            .filter(|url| self.images.request(url))
            .map(|url| {
                let key = url.clone();
                Task::perform(fetch_image(url), move |result| Message::ImageFetched {
                    url: key.clone(),
                    result,
                })
            })
            .collect();

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut layers = vec![ui::browse::view(&self.controller, &self.images)];

        if let Some(detail) = self.controller.place_detail() {
            layers.push(ui::overlay::place_modal(detail));
        }

        if let Some(entry) = self.controller.lightbox_image() {
            let position = self.controller.lightbox_position().unwrap_or_default();
            let handle = self.images.get(&entry.src).cloned();
            layers.push(ui::overlay::lightbox(entry, position, handle));
        }

        Stack::with_children(layers).into()
    }

    /// Keyboard shortcuts for the overlays
    fn subscription(&self) -> Subscription<Message> {
        if !self.controller.modal_open() && !self.controller.lightbox_open() {
            return Subscription::none();
        }
        keyboard::on_key_press(|key, _modifiers| nav_key(&key).map(Message::KeyPressed))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn nav_key(key: &Key) -> Option<NavKey> {
    match key {
        Key::Named(Named::Escape) => Some(NavKey::Escape),
        Key::Named(Named::ArrowLeft) => Some(NavKey::ArrowLeft),
        Key::Named(Named::ArrowRight) => Some(NavKey::ArrowRight),
        _ => None,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wgpu=warn,naga=warn,iced=warn,cosmic_text=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref());
    config.apply_overrides(cli.data, cli.no_remote_images);

    iced::application("Hidden Places", HiddenPlaces::update, HiddenPlaces::view)
        .theme(HiddenPlaces::theme)
        .subscription(HiddenPlaces::subscription)
        .centered()
        .run_with(move || HiddenPlaces::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_keys() {
        assert_eq!(nav_key(&Key::Named(Named::Escape)), Some(NavKey::Escape));
        assert_eq!(nav_key(&Key::Named(Named::ArrowLeft)), Some(NavKey::ArrowLeft));
        assert_eq!(nav_key(&Key::Named(Named::ArrowRight)), Some(NavKey::ArrowRight));
        assert_eq!(nav_key(&Key::Named(Named::Enter)), None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["hidden-places", "--data", "https://example.com/data.json", "--no-remote-images"]);
        assert_eq!(cli.data.as_deref(), Some("https://example.com/data.json"));
        assert!(cli.no_remote_images);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_update_flow_without_network() {
        let config = AppConfig {
            remote_images: false,
            ..AppConfig::default()
        };
        let (mut app, _load) = HiddenPlaces::new(config);

        let document = CatalogDocument::from_slice(
            br#"{ "places": [
                { "id": "p1", "name": "Koilkonda", "type": "Fort",
                  "images": [{ "directUrl": "https://example.com/k.jpg" }] }
            ] }"#,
        )
        .unwrap();
        let _ = app.update(Message::CatalogLoaded(Ok(document)));
        assert_eq!(app.controller.status(), "1 places found.");

        let _ = app.update(Message::OpenLightbox(0));
        let _ = app.update(Message::KeyPressed(NavKey::Escape));
        assert!(!app.controller.lightbox_open());
        assert_eq!(
            app.controller.focus(),
            Some(&FocusTarget::GalleryFigure {
                place_id: "p1".to_string(),
                image: 0
            })
        );
    }

    #[test]
    fn test_displayed_images_are_requested_once() {
        let (mut app, _load) = HiddenPlaces::new(AppConfig::default());

        let document = CatalogDocument::from_slice(
            br#"{ "places": [
                { "id": "p1", "name": "Koilkonda", "featured": true,
                  "images": [{ "directUrl": "https://example.com/k1.jpg" },
                             { "directUrl": "https://example.com/k2.jpg" }] }
            ] }"#,
        )
        .unwrap();
        let _ = app.update(Message::CatalogLoaded(Ok(document)));

        // Featured tile and both gallery figures are already in flight
        assert!(!app.images.request("https://example.com/k1.jpg"));
        assert!(!app.images.request("https://example.com/k2.jpg"));

        let _ = app.update(Message::ImageFetched {
            url: "https://example.com/k2.jpg".to_string(),
            result: Err(MediaError::Status(404)),
        });
        assert!(app.images.get("https://example.com/k2.jpg").is_none());
        assert!(!app.images.request("https://example.com/k2.jpg"));
    }

    #[test]
    fn test_no_remote_images_requests_nothing() {
        let config = AppConfig {
            remote_images: false,
            ..AppConfig::default()
        };
        let (mut app, _load) = HiddenPlaces::new(config);
        let document =
            CatalogDocument::from_slice(br#"{ "places": [{ "id": "p1", "images": [{ "directUrl": "https://example.com/a.jpg" }] }] }"#)
                .unwrap();
        let _ = app.update(Message::CatalogLoaded(Ok(document)));

        assert!(app.images.request("https://example.com/a.jpg"));
    }
}
