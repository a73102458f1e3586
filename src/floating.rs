//! Position floating elements next to a reference element.
//!
//! The model follows the usual floating UI vocabulary: a [`Placement`] picks
//! a side of the reference and an alignment along that side. A chain of
//! [`Middleware`] then adjusts the result.
use crate::core::{Point, Rectangle, Size};

/// The side of the reference element the floating element is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the reference.
    Top,
    /// To the right of the reference.
    Right,
    /// Below the reference.
    Bottom,
    /// To the left of the reference.
    Left,
}

impl Side {
    /// Returns the opposite [`Side`].
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// The alignment of the floating element along the chosen [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align the starting edges.
    Start,
    /// Align the ending edges.
    End,
}

/// Where a floating element is placed relative to its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    Right,
    RightStart,
    RightEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
}

impl Placement {
    /// Builds a [`Placement`] from its parts.
    pub fn new(side: Side, align: Option<Align>) -> Self {
        match (side, align) {
            (Side::Top, None) => Placement::Top,
            (Side::Top, Some(Align::Start)) => Placement::TopStart,
            (Side::Top, Some(Align::End)) => Placement::TopEnd,
            (Side::Right, None) => Placement::Right,
            (Side::Right, Some(Align::Start)) => Placement::RightStart,
            (Side::Right, Some(Align::End)) => Placement::RightEnd,
            (Side::Bottom, None) => Placement::Bottom,
            (Side::Bottom, Some(Align::Start)) => Placement::BottomStart,
            (Side::Bottom, Some(Align::End)) => Placement::BottomEnd,
            (Side::Left, None) => Placement::Left,
            (Side::Left, Some(Align::Start)) => Placement::LeftStart,
            (Side::Left, Some(Align::End)) => Placement::LeftEnd,
        }
    }

    /// Returns the [`Side`] of the [`Placement`].
    pub fn side(self) -> Side {
        match self {
            Placement::Top | Placement::TopStart | Placement::TopEnd => Side::Top,
            Placement::Right | Placement::RightStart | Placement::RightEnd => Side::Right,
            Placement::Bottom | Placement::BottomStart | Placement::BottomEnd => Side::Bottom,
            Placement::Left | Placement::LeftStart | Placement::LeftEnd => Side::Left,
        }
    }

    /// Returns the [`Align`] of the [`Placement`], if any.
    pub fn align(self) -> Option<Align> {
        match self {
            Placement::Top | Placement::Right | Placement::Bottom | Placement::Left => None,
            Placement::TopStart
            | Placement::RightStart
            | Placement::BottomStart
            | Placement::LeftStart => Some(Align::Start),
            Placement::TopEnd | Placement::RightEnd | Placement::BottomEnd | Placement::LeftEnd => {
                Some(Align::End)
            }
        }
    }

    /// Returns the same [`Placement`] on the opposite [`Side`].
    pub fn flipped(self) -> Self {
        Self::new(self.side().opposite(), self.align())
    }
}

/// A step adjusting a computed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Middleware {
    /// Moves the floating element away from the reference along the main axis.
    Offset(f32),
    /// Keeps the floating element inside the boundary along the alignment
    /// axis, leaving `padding` between them.
    Shift {
        /// The minimum distance to the boundary edges.
        padding: f32,
    },
    /// Moves the floating element to the opposite side when it overflows the
    /// boundary and the opposite side does not.
    Flip {
        /// The minimum distance to the boundary edges.
        padding: f32,
    },
}

/// A computed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// The top-left corner of the floating element.
    pub origin: Point,
    /// The final [`Placement`], after flipping.
    pub placement: Placement,
}

/// The floating configuration of a menu panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floating {
    /// Where the panel goes relative to the trigger.
    pub placement: Placement,
    /// The gap between trigger and panel.
    pub offset: f32,
    /// The minimum distance between the panel and the viewport edges.
    pub shift_padding: f32,
    /// Whether the panel may flip to the opposite side.
    pub flip: bool,
}

impl Floating {
    /// Returns the [`Middleware`] chain of this configuration.
    pub fn middleware(&self) -> Vec<Middleware> {
        let mut middleware = vec![Middleware::Offset(self.offset)];

        if self.flip {
            middleware.push(Middleware::Flip {
                padding: self.shift_padding,
            });
        }

        middleware.push(Middleware::Shift {
            padding: self.shift_padding,
        });

        middleware
    }

    /// Computes where a panel of the given size goes next to `reference`.
    pub fn position(&self, reference: Rectangle, floating: Size, boundary: Rectangle) -> Position {
        compute_position(
            reference,
            floating,
            boundary,
            self.placement,
            &self.middleware(),
        )
    }
}

impl Default for Floating {
    fn default() -> Self {
        Self {
            placement: Placement::BottomEnd,
            offset: 8.0,
            shift_padding: 8.0,
            flip: false,
        }
    }
}

/// Computes the position of a `floating` element placed next to `reference`
/// inside `boundary`.
pub fn compute_position(
    reference: Rectangle,
    floating: Size,
    boundary: Rectangle,
    placement: Placement,
    middleware: &[Middleware],
) -> Position {
    let mut placement = placement;
    let mut origin = coords_from_placement(reference, floating, placement);

    for (index, step) in middleware.iter().enumerate() {
        match *step {
            Middleware::Offset(amount) => {
                origin = offset(origin, placement.side(), amount);
            }
            Middleware::Shift { padding } => {
                origin = shift(origin, floating, boundary, placement.side(), padding);
            }
            Middleware::Flip { padding } => {
                let side = placement.side();

                if overflow(origin, floating, boundary, side, padding) > 0.0 {
                    let flipped = placement.flipped();

                    // Replay the steps that ran before this one.
                    let candidate = middleware[..index].iter().fold(
                        coords_from_placement(reference, floating, flipped),
                        |origin, step| match *step {
                            Middleware::Offset(amount) => offset(origin, flipped.side(), amount),
                            Middleware::Shift { padding } => {
                                shift(origin, floating, boundary, flipped.side(), padding)
                            }
                            Middleware::Flip { .. } => origin,
                        },
                    );

                    if overflow(candidate, floating, boundary, flipped.side(), padding) <= 0.0 {
                        log::trace!("Flipping {placement:?} to {flipped:?}");

                        placement = flipped;
                        origin = candidate;
                    }
                }
            }
        }
    }

    Position { origin, placement }
}

fn coords_from_placement(reference: Rectangle, floating: Size, placement: Placement) -> Point {
    let center_x = reference.x + reference.width / 2.0 - floating.width / 2.0;
    let center_y = reference.y + reference.height / 2.0 - floating.height / 2.0;

    let side = placement.side();

    let mut origin = match side {
        Side::Top => Point::new(center_x, reference.y - floating.height),
        Side::Bottom => Point::new(center_x, reference.y + reference.height),
        Side::Right => Point::new(reference.x + reference.width, center_y),
        Side::Left => Point::new(reference.x - floating.width, center_y),
    };

    let (reference_length, floating_length) = if side.is_vertical() {
        (reference.width, floating.width)
    } else {
        (reference.height, floating.height)
    };

    let delta = reference_length / 2.0 - floating_length / 2.0;

    let shift = match placement.align() {
        None => 0.0,
        Some(Align::Start) => -delta,
        Some(Align::End) => delta,
    };

    if side.is_vertical() {
        origin.x += shift;
    } else {
        origin.y += shift;
    }

    origin
}

fn offset(origin: Point, side: Side, amount: f32) -> Point {
    match side {
        Side::Top => Point::new(origin.x, origin.y - amount),
        Side::Bottom => Point::new(origin.x, origin.y + amount),
        Side::Right => Point::new(origin.x + amount, origin.y),
        Side::Left => Point::new(origin.x - amount, origin.y),
    }
}

fn shift(origin: Point, floating: Size, boundary: Rectangle, side: Side, padding: f32) -> Point {
    // When the element does not fit, its start edge wins.
    let clamp = |value: f32, min: f32, max: f32| value.min(max).max(min);

    if side.is_vertical() {
        let min = boundary.x + padding;
        let max = boundary.x + boundary.width - padding - floating.width;

        Point::new(clamp(origin.x, min, max), origin.y)
    } else {
        let min = boundary.y + padding;
        let max = boundary.y + boundary.height - padding - floating.height;

        Point::new(origin.x, clamp(origin.y, min, max))
    }
}

/// How far the element sticks out of the boundary on the given side.
fn overflow(origin: Point, floating: Size, boundary: Rectangle, side: Side, padding: f32) -> f32 {
    match side {
        Side::Top => boundary.y + padding - origin.y,
        Side::Bottom => origin.y + floating.height - (boundary.y + boundary.height - padding),
        Side::Left => boundary.x + padding - origin.x,
        Side::Right => origin.x + floating.width - (boundary.x + boundary.width - padding),
    }
}
