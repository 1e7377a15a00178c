// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Confirm buttons and other primary actions.
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_600,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::PRIMARY_500
            })),
            text_color: Color {
                a: opacity::OVERLAY_STRONG,
                ..WHITE
            },
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Cancel buttons: outlined, no fill until hovered.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.palette().text;
    let border = Border {
        color: palette::GRAY_400,
        width: 1.0,
        radius: radius::SM.into(),
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color,
            border,
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            })),
            text_color,
            border,
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..text_color
            },
            border: Border {
                color: palette::GRAY_200,
                ..border
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Borderless close button for dialog headers and toasts.
pub fn dismiss(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_alpha = match status {
        button::Status::Hovered => Some(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => Some(opacity::OVERLAY_MEDIUM),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background: hover_alpha.map(|a| {
            Background::Color(Color {
                a,
                ..palette::GRAY_400
            })
        }),
        text_color: if status == button::Status::Disabled {
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            }
        } else {
            base.text
        },
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hover_is_lighter() {
        let theme = Theme::Dark;
        let active = primary(&theme, button::Status::Active);
        let hovered = primary(&theme, button::Status::Hovered);
        assert_ne!(active.background, hovered.background);
    }

    #[test]
    fn secondary_is_transparent_at_rest() {
        let style = secondary(&Theme::Light, button::Status::Active);
        assert!(style.background.is_none());
        assert_eq!(style.border.color, palette::GRAY_400);
    }

    #[test]
    fn dismiss_only_fills_on_interaction() {
        let theme = Theme::Dark;
        assert!(dismiss(&theme, button::Status::Active).background.is_none());
        assert!(dismiss(&theme, button::Status::Hovered).background.is_some());
        assert!(dismiss(&theme, button::Status::Pressed).background.is_some());
    }
}
