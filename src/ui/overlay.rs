//! Modal place detail and lightbox frame, drawn over the browsing page

use iced::widget::{button, column, container, image, opaque, row, scrollable, text, Column};
use iced::widget::image::Handle;
use iced::{Alignment, Color, Element, Length, Theme};

use crate::state::lightbox::Direction;
use crate::state::views::{ImageEntry, PlaceDetail};
use crate::Message;

/// Full-window dimmed layer that swallows clicks meant for the page beneath
fn backdrop<'a>(panel: Element<'a, Message>, max_width: f32) -> Element<'a, Message> {
    let panel = container(panel)
        .max_width(max_width)
        .padding(24)
        .style(container::rounded_box);

    opaque(
        container(panel)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(32)
            .style(|_theme: &Theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.8).into()),
                ..container::Style::default()
            }),
    )
}

fn bullet_list<'a>(heading: &'a str, items: &[String]) -> Column<'a, Message> {
    items.iter().fold(
        column![text(heading).size(18)].spacing(4),
        |list, item| list.push(text(format!("• {item}")).size(14)),
    )
}

pub fn place_modal<'a>(detail: PlaceDetail) -> Element<'a, Message> {
    let header = row![
        text(detail.name).size(30).width(Length::Fill),
        button("Close").on_press(Message::ClosePlace),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut body = column![
        header,
        text(detail.hook).size(16),
        text(detail.summary).size(15),
        text(detail.rating_line).size(14),
        bullet_list("What to see", &detail.what_to_see),
        bullet_list("Best shots", &detail.best_shots),
        bullet_list("Respect notes", &detail.respect_notes),
    ]
    .spacing(12);

    if !detail.tags.is_empty() {
        body = body.push(bullet_list("Tags", &detail.tags));
    }

    if !detail.sources.is_empty() {
        let sources = detail.sources.iter().fold(
            column![text("Sources").size(18)].spacing(4),
            |list, source| list.push(text(format!("{}: {}", source.label, source.url)).size(13)),
        );
        body = body.push(sources);
    }

    body = body.push(text(format!("Open in maps: {}", detail.map_url)).size(13));

    backdrop(scrollable(body).into(), 760.0)
}

/// `handle` is the downloaded bitmap, if it has arrived
pub fn lightbox<'a>(entry: &'a ImageEntry, position: String, handle: Option<Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle).width(Length::Fill).into(),
        None if entry.is_displayable() => text(format!("Loading {}", entry.src)).size(13).into(),
        None => text("Image unavailable").size(13).into(),
    };

    let frame = row![
        button("‹").on_press(Message::LightboxStep(Direction::Previous)).padding(12),
        container(picture).width(Length::Fill).center_x(Length::Fill),
        button("›").on_press(Message::LightboxStep(Direction::Next)).padding(12),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let caption = column![
        text(entry.heading()).size(20),
        text(entry.credit_line()).size(14),
        text(format!("{} · {}", entry.attribution_line(), entry.source_link())).size(12),
    ]
    .spacing(4);

    let footer = row![
        text(position).size(14).width(Length::Fill),
        button("Close").on_press(Message::CloseLightbox),
    ]
    .align_y(Alignment::Center);

    backdrop(column![frame, caption, footer].spacing(16).into(), 1100.0)
}
