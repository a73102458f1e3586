//! Focus rings and the focus cycling of menu panels.
use crate::core::renderer;
use crate::core::widget::Id;
use crate::core::widget::operation::{Focusable, Operation};
use crate::core::{Border, Color, Rectangle};

/// The default width of a focus ring border.
pub const FOCUS_RING_WIDTH: f32 = 2.0;

/// The default offset of the focus ring from the widget bounds.
pub const FOCUS_RING_OFFSET: f32 = 2.0;

/// The default border radius for focus rings.
pub const FOCUS_RING_RADIUS: f32 = 4.0;

/// Configuration for drawing a focus ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusRing {
    /// The color of the focus ring.
    pub color: Color,
    /// The width of the focus ring border.
    pub width: f32,
    /// The offset from the widget bounds (expands outward if positive).
    pub offset: f32,
    /// The border radius of the focus ring.
    pub radius: f32,
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Color::from_rgb(0.4, 0.6, 1.0))
    }
}

impl FocusRing {
    /// Creates a new focus ring with the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            width: FOCUS_RING_WIDTH,
            offset: FOCUS_RING_OFFSET,
            radius: FOCUS_RING_RADIUS,
        }
    }

    /// Sets the offset of the focus ring from the widget bounds.
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the border radius of the focus ring.
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Computes the bounds for the focus ring based on widget bounds.
    pub fn bounds(&self, widget_bounds: Rectangle) -> Rectangle {
        widget_bounds.expand(self.offset)
    }

    /// Draws the focus ring around the given bounds.
    pub fn draw<Renderer>(&self, renderer: &mut Renderer, widget_bounds: Rectangle)
    where
        Renderer: renderer::Renderer,
    {
        renderer.fill_quad(
            renderer::Quad {
                bounds: self.bounds(widget_bounds),
                border: Border {
                    color: self.color,
                    width: self.width,
                    radius: self.radius.into(),
                },
                ..renderer::Quad::default()
            },
            Color::TRANSPARENT,
        );
    }
}

/// A summary of the focusable widgets of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    /// The index of the focused widget, if any.
    pub focused: Option<usize>,
    /// The total amount of focusable widgets.
    pub total: usize,
}

impl Operation for Census {
    fn focusable(&mut self, _id: Option<&Id>, _bounds: Rectangle, state: &mut dyn Focusable) {
        if state.is_focused() {
            self.focused = Some(self.total);
        }

        self.total += 1;
    }

    fn traverse(&mut self, operate: &mut dyn FnMut(&mut dyn Operation)) {
        operate(self);
    }
}

/// An [`Operation`] focusing the focusable widget at `target` and unfocusing
/// every other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusIndex {
    target: Option<usize>,
    current: usize,
}

impl FocusIndex {
    /// Focuses the widget at `target`, or nothing.
    pub fn new(target: Option<usize>) -> Self {
        Self { target, current: 0 }
    }
}

impl Operation for FocusIndex {
    fn focusable(&mut self, _id: Option<&Id>, _bounds: Rectangle, state: &mut dyn Focusable) {
        if self.target == Some(self.current) {
            state.focus();
        } else {
            state.unfocus();
        }

        self.current += 1;
    }

    fn traverse(&mut self, operate: &mut dyn FnMut(&mut dyn Operation)) {
        operate(self);
    }
}

/// The direction focus moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the next widget.
    Forward,
    /// Towards the previous widget.
    Backward,
}

/// Returns the index focus moves to, wrapping around at both ends.
pub fn cycle(census: Census, direction: Direction) -> Option<usize> {
    if census.total == 0 {
        return None;
    }

    let last = census.total - 1;

    Some(match (census.focused, direction) {
        (None, Direction::Forward) => 0,
        (None, Direction::Backward) => last,
        (Some(focused), Direction::Forward) if focused >= last => 0,
        (Some(focused), Direction::Forward) => focused + 1,
        (Some(0), Direction::Backward) => last,
        (Some(focused), Direction::Backward) => focused.min(last + 1) - 1,
    })
}
