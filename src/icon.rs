//! The default glyph of a [`UserMenu`](crate::UserMenu).
use crate::core::border::{self, Border};
use crate::core::layout;
use crate::core::mouse;
use crate::core::renderer;
use crate::core::widget::Tree;
use crate::core::{Color, Element, Layout, Length, Rectangle, Size, Widget};

/// The default size of a [`UserIcon`].
pub const DEFAULT_SIZE: f32 = 24.0;

/// A user silhouette inside of a circle.
///
/// It is drawn in the text color of its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserIcon {
    size: f32,
    color: Option<Color>,
}

impl UserIcon {
    /// Creates a [`UserIcon`] of the default size.
    pub fn new() -> Self {
        Self {
            size: DEFAULT_SIZE,
            color: None,
        }
    }

    /// Sets the side length of the [`UserIcon`].
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Overrides the color of the [`UserIcon`].
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Default for UserIcon {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a [`UserIcon`] of the default size.
pub fn user() -> UserIcon {
    UserIcon::new()
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer> for UserIcon
where
    Renderer: crate::core::Renderer,
{
    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Fixed(self.size),
            height: Length::Fixed(self.size),
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(limits.resolve(
            Length::Fixed(self.size),
            Length::Fixed(self.size),
            Size::new(self.size, self.size),
        ))
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let color = self.color.unwrap_or(style.text_color);

        // Glyph coordinates are on a 24 unit grid.
        let unit = bounds.width.min(bounds.height) / DEFAULT_SIZE;
        let at = |x: f32, y: f32, width: f32, height: f32| Rectangle {
            x: bounds.x + x * unit,
            y: bounds.y + y * unit,
            width: width * unit,
            height: height * unit,
        };

        renderer.fill_quad(
            renderer::Quad {
                bounds: at(1.0, 1.0, 22.0, 22.0),
                border: Border {
                    color,
                    width: 1.5 * unit,
                    radius: (11.0 * unit).into(),
                },
                ..renderer::Quad::default()
            },
            Color::TRANSPARENT,
        );

        renderer.fill_quad(
            renderer::Quad {
                bounds: at(8.5, 5.5, 7.0, 7.0),
                border: border::rounded(3.5 * unit),
                ..renderer::Quad::default()
            },
            color,
        );

        renderer.fill_quad(
            renderer::Quad {
                bounds: at(6.0, 14.5, 12.0, 5.0),
                border: Border {
                    radius: border::Radius {
                        top_left: 5.0 * unit,
                        top_right: 5.0 * unit,
                        bottom_right: 1.5 * unit,
                        bottom_left: 1.5 * unit,
                    },
                    ..Border::default()
                },
                ..renderer::Quad::default()
            },
            color,
        );
    }
}

impl<'a, Message, Theme, Renderer> From<UserIcon> for Element<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer + 'a,
{
    fn from(icon: UserIcon) -> Self {
        Self::new(icon)
    }
}
