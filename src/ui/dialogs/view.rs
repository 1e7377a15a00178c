// SPDX-License-Identifier: MPL-2.0
//! Modal rendering for active dialogs.
//!
//! Each dialog is drawn as a card centered over a dimmed backdrop, stacked in
//! registry order so the newest dialog is on top. Dialogs in their exit
//! transition are drawn faded and no longer react to input.

use super::instance::{ButtonRole, DialogId, DialogInstance, RenderedDialog, RenderedInput};
use super::registry::DialogRegistry;
use super::request::{DialogKind, InputKind};
use super::Message;
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use crate::ui::styles;
use iced::widget::{
    button, center, checkbox, container, mouse_area, opaque, pick_list, progress_bar, text,
    text_input, Column, Container, Row, Stack, Text,
};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Instant;

/// Accent color for a dialog kind.
#[must_use]
pub fn accent(kind: DialogKind) -> Color {
    match kind {
        DialogKind::Success => palette::SUCCESS_500,
        DialogKind::Error => palette::ERROR_500,
        DialogKind::Warning => palette::WARNING_500,
        DialogKind::Info | DialogKind::Loading => palette::INFO_500,
        DialogKind::Question | DialogKind::Custom => palette::PRIMARY_500,
    }
}

/// Renders every presented dialog, oldest at the bottom.
///
/// Returns `None` when nothing is showing so callers can skip the layer.
pub fn overlay(registry: &DialogRegistry) -> Option<Element<'_, Message>> {
    let now = Instant::now();
    let layers: Vec<Element<'_, Message>> = registry
        .iter()
        .filter_map(|instance| layer(instance, now))
        .collect();

    if layers.is_empty() {
        None
    } else {
        Some(
            Stack::with_children(layers)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        )
    }
}

fn layer(instance: &DialogInstance, now: Instant) -> Option<Element<'_, Message>> {
    let presentation = instance.presentation()?;
    let id = instance.id();
    let leaving = presentation.leaving;

    let card = card(id, &presentation.content, instance.timer_fraction(now), leaving);
    let backdrop = center(opaque(card)).style(move |_theme: &Theme| backdrop_style(leaving));

    if leaving {
        Some(backdrop.into())
    } else {
        Some(opaque(mouse_area(backdrop).on_press(Message::OutsideClick(id))))
    }
}

fn card<'a>(
    id: DialogId,
    content: &'a RenderedDialog,
    timer_fraction: Option<f32>,
    leaving: bool,
) -> Element<'a, Message> {
    let accent_color = accent(content.kind);
    let interactive = !leaving && !content.loading;

    let mut header = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);
    if !content.glyph.is_empty() {
        header = header.push(
            Text::new(content.glyph)
                .size(typography::TITLE_MD)
                .color(accent_color),
        );
    }
    if let Some(title) = &content.title {
        header = header.push(
            Container::new(Text::new(title.as_str()).size(typography::TITLE_SM))
                .width(Length::Fill),
        );
    } else {
        header = header.push(Container::new(text("")).width(Length::Fill));
    }
    if content.show_close {
        let close = button(text("×").size(typography::BODY_LG))
            .padding(spacing::XXS)
            .style(styles::button::dismiss);
        header = header.push(if leaving {
            close
        } else {
            close.on_press(Message::Close(id))
        });
    }

    let mut body = Column::new().spacing(spacing::SM).push(header);

    if let Some(message) = &content.text {
        body = body.push(Text::new(message.as_str()).size(typography::BODY));
    }

    if let Some(input) = &content.input {
        body = body.push(input_widget(id, input, interactive));
    }

    if let Some(validation) = &content.validation_message {
        body = body.push(
            Text::new(validation.as_str())
                .size(typography::CAPTION)
                .color(palette::ERROR_500),
        );
    }

    if content.loading {
        body = body.push(Text::new("…").size(typography::TITLE_MD).color(accent_color));
    }

    if !content.buttons.is_empty() {
        let buttons = content.buttons.iter().fold(
            Row::new().spacing(spacing::XS),
            |row, rendered| {
                let (message, style): (_, fn(&Theme, button::Status) -> button::Style) =
                    match rendered.role {
                        ButtonRole::Confirm => (Message::Confirm(id), styles::button::primary),
                        ButtonRole::Cancel => (Message::Cancel(id), styles::button::secondary),
                    };
                let widget = button(text(rendered.label.as_str()).size(typography::BODY))
                    .padding([spacing::XXS, spacing::MD])
                    .style(style);
                row.push(if interactive {
                    widget.on_press(message)
                } else {
                    widget
                })
            },
        );
        body = body.push(
            Container::new(buttons)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right),
        );
    }

    if let Some(footer) = &content.footer {
        body = body.push(
            Text::new(footer.as_str())
                .size(typography::CAPTION)
                .style(|theme: &Theme| text::Style {
                    color: Some(Color {
                        a: opacity::OVERLAY_STRONG,
                        ..theme.palette().text
                    }),
                }),
        );
    }

    if let (true, Some(fraction)) = (content.timer_progress, timer_fraction) {
        body = body.push(progress_bar(0.0..=1.0, fraction));
    }

    Container::new(body)
        .width(Length::Fixed(sizing::DIALOG_WIDTH))
        .padding(spacing::LG)
        .style(move |theme: &Theme| card_style(theme, accent_color, leaving))
        .into()
}

fn input_widget<'a>(id: DialogId, input: &'a RenderedInput, interactive: bool) -> Element<'a, Message> {
    match &input.kind {
        InputKind::Checkbox => {
            let checked = input.value == "true";
            let widget = checkbox(checked).label(input.placeholder.as_str());
            if interactive {
                widget
                    .on_toggle(move |value| Message::InputChanged(id, value.to_string()))
                    .into()
            } else {
                widget.into()
            }
        }
        InputKind::Select(options) => {
            let selected = options.iter().find(|option| **option == input.value).cloned();
            pick_list(options.as_slice(), selected, move |choice: String| {
                Message::InputChanged(id, choice)
            })
            .placeholder(input.placeholder.as_str())
            .padding(spacing::XS)
            .width(Length::Fill)
            .into()
        }
        kind => {
            let mut widget = text_input(&input.placeholder, &input.value)
                .padding(spacing::XS)
                .size(typography::BODY)
                .width(Length::Fill)
                .secure(matches!(kind, InputKind::Password));
            if interactive {
                widget = widget
                    .on_input(move |value| Message::InputChanged(id, value))
                    .on_submit(Message::Confirm(id));
            }
            widget.into()
        }
    }
}

fn backdrop_style(leaving: bool) -> container::Style {
    let alpha = if leaving {
        opacity::OVERLAY_SUBTLE
    } else {
        opacity::OVERLAY_MEDIUM
    };
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

fn card_style(theme: &Theme, accent_color: Color, leaving: bool) -> container::Style {
    let base = theme.extended_palette().background.base;
    let alpha = if leaving {
        opacity::OVERLAY_MEDIUM
    } else {
        opacity::OPAQUE
    };

    container::Style {
        background: Some(iced::Background::Color(Color { a: alpha, ..base.color })),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        text_color: Some(Color { a: alpha, ..base.text }),
        ..Default::default()
    }
}
