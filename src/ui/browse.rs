//! Main browsing page: search bar, filters, featured strip, place cards,
//! gallery and image library.

use iced::widget::{button, column, container, image, pick_list, row, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use super::focus_style;
use crate::media::fetch::ImageCache;
use crate::state::controller::{selected_option, Controller, LoadState};
use crate::state::lightbox::FocusTarget;
use crate::state::selection::SortKey;
use crate::state::views::ImageEntry;
use crate::Message;

const CARD_WIDTH: f32 = 260.0;
const TILE_WIDTH: f32 = 300.0;

/// Build the whole scrolling page
pub fn view<'a>(controller: &'a Controller, images: &'a ImageCache) -> Element<'a, Message> {
    // Nothing to filter until the catalog arrives
    if controller.load_state() != LoadState::Ready {
        return container(column![text("Hidden Places").size(40), text(controller.status()).size(16)].spacing(24))
            .padding(32)
            .into();
    }

    let content = column![
        text("Hidden Places").size(40),
        filters(controller),
        text(controller.status()).size(16),
        section("Featured", featured_strip(controller, images)),
        section("Places", cards(controller)),
        section("Gallery", gallery(controller, images)),
        section("Image library", image_library(controller)),
    ]
    .spacing(24)
    .padding(32);

    scrollable(content).width(Length::Fill).height(Length::Fill).into()
}

/// Page sections that can come up empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Featured,
    Places,
    Gallery,
    Library,
}

/// Text shown in place of an empty section. The featured strip has none and
/// simply stays empty.
fn empty_notice(section: Section) -> Option<&'static str> {
    match section {
        Section::Featured => None,
        Section::Places => Some("No places matched your filters."),
        Section::Gallery => Some("No gallery images for this filter set."),
        Section::Library => Some("No images available for the selected place."),
    }
}

fn notice_or_blank<'a>(section: Section) -> Element<'a, Message> {
    match empty_notice(section) {
        Some(notice) => text(notice).into(),
        None => Space::new(Length::Shrink, Length::Shrink).into(),
    }
}

fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(26), body].spacing(12).into()
}

fn filters(controller: &Controller) -> Element<'_, Message> {
    let selection = controller.selection();

    let search = text_input("Search places, summaries and tags…", &selection.query)
        .on_input(Message::QueryChanged)
        .padding(10)
        .width(Length::FillPortion(3));

    let sort = pick_list(SortKey::ALL, Some(selection.sort), Message::SortSelected);

    let kind = pick_list(
        controller.type_options(),
        selected_option(controller.type_options(), &selection.kind),
        |option| Message::TypeSelected(option.value),
    );
    let mood = pick_list(
        controller.mood_options(),
        selected_option(controller.mood_options(), &selection.mood),
        |option| Message::MoodSelected(option.value),
    );
    let route = pick_list(
        controller.route_options(),
        selected_option(controller.route_options(), &selection.route),
        |option| Message::RouteSelected(option.value),
    );

    row![search, sort, kind, mood, route]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

fn featured_strip<'a>(controller: &'a Controller, images: &'a ImageCache) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = controller
        .featured()
        .iter()
        .map(|tile| {
            let picture: Element<'a, Message> = match images.get(&tile.src) {
                Some(handle) => image(handle.clone()).width(Length::Fill).into(),
                None => text(&tile.alt).size(14).into(),
            };
            let target = FocusTarget::FeaturedTile(tile.place_id.clone());

            button(column![picture, text(&tile.name).size(18), text(&tile.blurb).size(14)].spacing(6))
                .on_press(Message::OpenPlace {
                    place_id: tile.place_id.clone(),
                    trigger: target.clone(),
                })
                .style(focus_style(controller.focus(), &target))
                .width(Length::Fixed(TILE_WIDTH))
                .padding(10)
                .into()
        })
        .collect();

    if tiles.is_empty() {
        return notice_or_blank(Section::Featured);
    }
    Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0).into()
}

fn cards(controller: &Controller) -> Element<'_, Message> {
    if controller.cards().is_empty() {
        return notice_or_blank(Section::Places);
    }

    let cards: Vec<Element<'_, Message>> = controller
        .cards()
        .iter()
        .map(|card| {
            let target = FocusTarget::Card(card.place_id.clone());
            let body = column![
                text(&card.name).size(20),
                text(&card.meta).size(13),
                text(&card.summary).size(14),
                text(card.moods.join(" · ")).size(12),
            ]
            .spacing(6);

            button(body)
                .on_press(Message::OpenPlace {
                    place_id: card.place_id.clone(),
                    trigger: target.clone(),
                })
                .style(focus_style(controller.focus(), &target))
                .width(Length::Fixed(CARD_WIDTH))
                .padding(12)
                .into()
        })
        .collect();

    Wrap::with_elements(cards).spacing(12.0).line_spacing(12.0).into()
}

fn gallery<'a>(controller: &'a Controller, images: &'a ImageCache) -> Element<'a, Message> {
    if controller.gallery().is_empty() {
        return notice_or_blank(Section::Gallery);
    }

    let figures: Vec<Element<'a, Message>> = controller
        .gallery()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let target = entry.focus_target();
            // Caption only until the bitmap has arrived (or if it never will)
            let picture = images.get(&entry.src).map(|handle| image(handle.clone()).width(Length::Fill));
            let figure = column![].push_maybe(picture).push(figure_caption(entry)).spacing(6);

            button(figure)
                .on_press(Message::OpenLightbox(index))
                .style(focus_style(controller.focus(), &target))
                .width(Length::Fixed(CARD_WIDTH))
                .padding(10)
                .into()
        })
        .collect();

    Wrap::with_elements(figures).spacing(12.0).line_spacing(12.0).into()
}

fn figure_caption(entry: &ImageEntry) -> Column<'_, Message> {
    column![
        text(entry.heading()).size(16),
        text(entry.credit_line()).size(12),
        text(entry.source_link()).size(11),
    ]
    .spacing(4)
}

fn image_library(controller: &Controller) -> Element<'_, Message> {
    let picker = pick_list(
        controller.image_place_options(),
        selected_option(controller.image_place_options(), controller.image_place()),
        |option| Message::ImagePlaceSelected(option.value),
    );

    let listing: Element<'_, Message> = if controller.library().is_empty() {
        notice_or_blank(Section::Library)
    } else {
        let cards: Vec<Element<'_, Message>> = controller.library().iter().map(library_card).collect();
        Wrap::with_elements(cards).spacing(12.0).line_spacing(12.0).into()
    };

    column![picker, listing].spacing(12).into()
}

fn library_card(entry: &ImageEntry) -> Element<'_, Message> {
    let not_specified = |value: &Option<String>| value.clone().unwrap_or_else(|| "Not specified".to_string());

    container(
        column![
            text(entry.library_title()).size(16),
            text(format!("Place: {}", entry.place_name)).size(13),
            text(format!("License: {}", not_specified(&entry.license))).size(13),
            text(format!("Author: {}", not_specified(&entry.author))).size(13),
            text(format!("Attribution: {}", not_specified(&entry.attribution))).size(13),
            text(entry.source_link()).size(11),
        ]
        .spacing(4),
    )
    .style(container::rounded_box)
    .width(Length::Fixed(CARD_WIDTH))
    .padding(12)
    .into()
}
