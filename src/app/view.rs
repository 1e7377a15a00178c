// SPDX-License-Identifier: MPL-2.0
//! View rendering for the gallery.

use super::{Demo, Message};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::dialogs::{self, Dialogs};
use crate::ui::notifications::{self, Toast};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Row, Stack, Text};
use iced::{Element, Length};
use std::collections::VecDeque;

/// Number of gallery buttons per row.
const BUTTONS_PER_ROW: usize = 5;

/// Context required to render the gallery.
pub struct ViewContext<'a> {
    pub dialogs: &'a Dialogs,
    pub notifications: &'a notifications::Manager,
    pub log: &'a VecDeque<String>,
    pub queued: usize,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(gallery(&ctx));

    if let Some(overlay) = dialogs::view::overlay(ctx.dialogs.registry()) {
        stack = stack.push(overlay.map(Message::Dialog));
    }

    stack
        .push(Toast::view_overlay(ctx.notifications).map(Message::Notification))
        .into()
}

fn gallery<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let (dialog_demos, toast_demos): (Vec<Demo>, Vec<Demo>) =
        Demo::ALL.iter().partition(|demo| !demo.is_toast());

    let status = format!(
        "{} open, {} queued, {} toasts",
        ctx.dialogs.registry().live_count(),
        ctx.queued,
        ctx.notifications.visible_count()
    );

    let log = ctx.log.iter().rev().fold(
        Column::new().spacing(spacing::XXS),
        |column, line| column.push(Text::new(line.as_str()).size(typography::BODY)),
    );

    let content = Column::new()
        .spacing(spacing::LG)
        .push(Text::new("iced_notify").size(typography::TITLE_LG))
        .push(section("Dialogs", &dialog_demos))
        .push(section("Toasts", &toast_demos))
        .push(
            button(text("Close all").size(typography::BODY))
                .height(sizing::BUTTON_HEIGHT)
                .padding([spacing::XXS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::CloseAll),
        )
        .push(Text::new(status).size(typography::CAPTION))
        .push(log);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::XL)
        .into()
}

fn section<'a>(title: &'a str, demos: &[Demo]) -> Element<'a, Message> {
    let rows = demos.chunks(BUTTONS_PER_ROW).fold(
        Column::new().spacing(spacing::XS),
        |column, chunk| {
            let row = chunk.iter().fold(Row::new().spacing(spacing::XS), |row, demo| {
                row.push(
                    button(text(demo.label()).size(typography::BODY))
                        .height(sizing::BUTTON_HEIGHT)
                        .padding([spacing::XXS, spacing::MD])
                        .style(styles::button::primary)
                        .on_press(Message::Open(*demo)),
                )
            });
            column.push(row)
        },
    );

    Column::new()
        .spacing(spacing::SM)
        .push(Text::new(title).size(typography::TITLE_SM))
        .push(rows)
        .into()
}
