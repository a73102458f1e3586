//! Styling for menus.
use crate::core::{Background, Border, Color, Shadow, Theme, Vector};

/// The part of a menu being styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The [`MenuButton`](super::MenuButton).
    Trigger,
    /// The floating [`MenuPanel`](super::MenuPanel).
    Panel,
    /// A [`MenuItem`](super::MenuItem).
    Item,
}

/// The interaction status of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Idle.
    Active,
    /// The pointer is over it.
    Hovered,
    /// It is being pressed.
    Pressed,
    /// It has keyboard focus.
    Focused,
    /// Its menu is open. Only used for the trigger.
    Open,
}

/// The appearance of a part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// The [`Background`] of the part.
    pub background: Option<Background>,
    /// The text [`Color`] of the part.
    pub text_color: Color,
    /// The [`Border`] of the part.
    pub border: Border,
    /// The [`Shadow`] of the part.
    pub shadow: Shadow,
}

impl Style {
    /// Returns the [`Style`] with every color faded by `opacity`.
    pub fn fade(self, opacity: f32) -> Self {
        Self {
            background: self.background.map(|background| background.scale_alpha(opacity)),
            text_color: self.text_color.scale_alpha(opacity),
            border: Border {
                color: self.border.color.scale_alpha(opacity),
                ..self.border
            },
            shadow: Shadow {
                color: self.shadow.color.scale_alpha(opacity),
                ..self.shadow
            },
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: None,
            text_color: Color::BLACK,
            border: Border::default(),
            shadow: Shadow::default(),
        }
    }
}

/// The theme catalog of a menu.
pub trait Catalog {
    /// The item class of the [`Catalog`].
    type Class<'a>;

    /// The default class produced by the [`Catalog`].
    fn default<'a>() -> Self::Class<'a>;

    /// The [`Style`] of a class with the given part and status.
    fn style(&self, class: &Self::Class<'_>, part: Part, status: Status) -> Style;
}

/// A styling function for a menu.
pub type StyleFn<'a, Theme> = Box<dyn Fn(&Theme, Part, Status) -> Style + 'a>;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(default)
    }

    fn style(&self, class: &Self::Class<'_>, part: Part, status: Status) -> Style {
        class(self, part, status)
    }
}

/// The default style of a menu.
pub fn default(theme: &Theme, part: Part, status: Status) -> Style {
    let palette = theme.extended_palette();

    match part {
        Part::Trigger => Style {
            background: match status {
                Status::Active | Status::Focused => None,
                Status::Hovered | Status::Open => Some(palette.background.weak.color.into()),
                Status::Pressed => Some(palette.background.strong.color.into()),
            },
            text_color: palette.background.base.text,
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
        },
        Part::Panel => Style {
            background: Some(palette.background.base.color.into()),
            text_color: palette.background.base.text,
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color::BLACK.scale_alpha(0.2),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
        },
        Part::Item => {
            let (background, text_color) = match status {
                Status::Active | Status::Open => (None, palette.background.base.text),
                Status::Hovered | Status::Focused => (
                    Some(palette.background.weak.color.into()),
                    palette.background.weak.text,
                ),
                Status::Pressed => (
                    Some(palette.primary.weak.color.into()),
                    palette.primary.weak.text,
                ),
            };

            Style {
                background,
                text_color,
                border: Border {
                    radius: 4.0.into(),
                    ..Border::default()
                },
                shadow: Shadow::default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fading_scales_every_color() {
        let style = Style {
            background: Some(Color::WHITE.into()),
            text_color: Color::BLACK,
            border: Border {
                color: Color::BLACK,
                width: 1.0,
                radius: 2.0.into(),
            },
            shadow: Shadow::default(),
        }
        .fade(0.5);

        assert_eq!(style.text_color.a, 0.5);
        assert_eq!(style.border.color.a, 0.5);
        assert_eq!(style.background, Some(Color::WHITE.scale_alpha(0.5).into()));
    }

    #[test]
    fn panels_are_opaque_and_items_idle_without_background() {
        let theme = Theme::Light;

        let panel = default(&theme, Part::Panel, Status::Active);
        assert!(panel.background.is_some());
        assert!(panel.border.width > 0.0);

        let item = default(&theme, Part::Item, Status::Active);
        assert_eq!(item.background, None);

        let hovered = default(&theme, Part::Item, Status::Hovered);
        assert!(hovered.background.is_some());
    }
}
