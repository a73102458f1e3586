//! The shared state of a menu.
use crate::combined_ref::NodeRef;
use crate::core::animation::Easing;
use crate::core::time::{Duration, Instant};
use crate::core::{Animation, Point, Rectangle, Size};
use crate::floating::{Floating, Placement};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// The duration of the open/close transition of a panel.
pub const TRANSITION: Duration = Duration::from_millis(150);

/// The vertical distance a closed panel is shifted down by.
pub const CLOSED_OFFSET: f32 = 8.0;

/// Whether a menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// The panel is hidden.
    #[default]
    Closed,
    /// The panel is shown.
    Open,
}

impl Status {
    /// Returns the [`Status`] after the given [`Trigger`].
    pub fn next(self, trigger: Trigger) -> Self {
        match (self, trigger) {
            (Status::Closed, Trigger::ButtonActivated) => Status::Open,
            (Status::Open, Trigger::ButtonActivated) => Status::Closed,
            (_, Trigger::OutsideClick | Trigger::EscapeKey | Trigger::ItemActivated) => {
                Status::Closed
            }
        }
    }

    /// Returns whether the [`Status`] is [`Status::Open`].
    pub fn is_open(self) -> bool {
        self == Status::Open
    }
}

impl From<bool> for Status {
    fn from(open: bool) -> Self {
        if open { Status::Open } else { Status::Closed }
    }
}

/// Something that happened to a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The [`MenuButton`](super::MenuButton) was activated.
    ButtonActivated,
    /// A pointer was pressed outside of the panel and its shards.
    OutsideClick,
    /// <kbd>Esc</kbd> was pressed while the panel was open.
    EscapeKey,
    /// A [`MenuItem`](super::MenuItem) was activated.
    ItemActivated,
}

/// The next value of the open flag given to [`Store::set_open`].
pub enum Next {
    /// Set the flag to this value.
    Value(bool),
    /// Compute the flag from its previous value.
    Update(Box<dyn FnOnce(bool) -> bool>),
}

impl Next {
    /// Computes the flag from its previous value.
    pub fn update(f: impl FnOnce(bool) -> bool + 'static) -> Self {
        Next::Update(Box::new(f))
    }

    fn resolve(self, previous: bool) -> bool {
        match self {
            Next::Value(value) => value,
            Next::Update(f) => f(previous),
        }
    }
}

impl From<bool> for Next {
    fn from(value: bool) -> Self {
        Next::Value(value)
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Next::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Next::Update(_) => f.write_str("Update(..)"),
        }
    }
}

/// The state of one menu, shared by every widget inside of it.
///
/// A [`Store`] is a handle: clones point to the same state.
#[derive(Clone)]
pub struct Store(Rc<Inner>);

struct Inner {
    open: Cell<bool>,
    changed: Cell<bool>,
    return_focus: Cell<bool>,
    auto_focus: Cell<bool>,
    transition: RefCell<Animation<bool>>,
    floating: Cell<Floating>,
    button_reference: NodeRef<Rectangle>,
    button_shard: NodeRef<Rectangle>,
    panel: NodeRef<Rectangle>,
}

impl Store {
    /// Creates a closed [`Store`] using the given [`Floating`] configuration.
    pub fn new(floating: Floating) -> Self {
        Self(Rc::new(Inner {
            open: Cell::new(false),
            changed: Cell::new(false),
            return_focus: Cell::new(false),
            auto_focus: Cell::new(false),
            transition: RefCell::new(
                Animation::new(false)
                    .duration(TRANSITION)
                    .easing(Easing::EaseInOut),
            ),
            floating: Cell::new(floating),
            button_reference: NodeRef::new(),
            button_shard: NodeRef::new(),
            panel: NodeRef::new(),
        }))
    }

    /// Returns whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.0.open.get()
    }

    /// Returns the [`Status`] of the menu.
    pub fn status(&self) -> Status {
        Status::from(self.is_open())
    }

    /// Sets whether the menu is open.
    ///
    /// Returns `true` if the flag changed.
    pub fn set_open(&self, next: impl Into<Next>) -> bool {
        let previous = self.0.open.get();
        let open = next.into().resolve(previous);

        if open == previous {
            return false;
        }

        log::debug!("Menu {}", if open { "opened" } else { "closed" });

        self.0.open.set(open);
        self.0.changed.set(true);

        if open {
            self.0.auto_focus.set(true);
            self.0.return_focus.set(false);
        } else {
            self.0.auto_focus.set(false);
            self.0.return_focus.set(true);
        }

        self.0
            .transition
            .borrow_mut()
            .go_mut(open, Instant::now());

        true
    }

    /// Flips the open flag.
    pub fn toggle(&self) -> bool {
        self.set_open(Next::update(|open| !open))
    }

    /// Applies a [`Trigger`] and returns the resulting [`Status`].
    pub fn dispatch(&self, trigger: Trigger) -> Status {
        let status = self.status().next(trigger);

        if self.set_open(status.is_open()) {
            log::debug!("{trigger:?} moved the menu to {status:?}");
        }

        status
    }

    /// Returns whether the open flag changed since the last call.
    pub(crate) fn take_changed(&self) -> bool {
        self.0.changed.replace(false)
    }

    /// Returns whether focus should go back to the trigger, clearing the
    /// request.
    pub(crate) fn take_return_focus(&self) -> bool {
        self.0.return_focus.replace(false)
    }

    /// Returns whether focus should move into the panel, clearing the
    /// request.
    pub(crate) fn take_auto_focus(&self) -> bool {
        self.0.auto_focus.replace(false)
    }

    /// Returns the visibility of the panel at the given time, from `0.0` to
    /// `1.0`.
    pub fn opacity(&self, now: Instant) -> f32 {
        self.0.transition.borrow().interpolate(0.0, 1.0, now)
    }

    /// Returns how far down the panel is shifted at the given time.
    pub fn offset(&self, now: Instant) -> f32 {
        self.0
            .transition
            .borrow()
            .interpolate(CLOSED_OFFSET, 0.0, now)
    }

    /// Returns whether the panel is still transitioning at the given time.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.0.transition.borrow().is_animating(now)
    }

    /// Returns whether the panel needs to be drawn at the given time.
    pub fn is_visible(&self, now: Instant) -> bool {
        self.is_open() || self.is_animating(now)
    }

    /// Returns the [`Floating`] configuration.
    pub fn floating(&self) -> Floating {
        self.0.floating.get()
    }

    /// Replaces the [`Floating`] configuration.
    pub fn set_floating(&self, floating: Floating) {
        self.0.floating.set(floating);
    }

    /// Returns the handle the trigger registers as positioning anchor.
    pub fn button_reference(&self) -> &NodeRef<Rectangle> {
        &self.0.button_reference
    }

    /// Returns the handle the trigger registers as a shard of the panel.
    ///
    /// Presses inside a shard never count as outside clicks.
    pub fn button_shard(&self) -> &NodeRef<Rectangle> {
        &self.0.button_shard
    }

    /// Returns the handle the panel registers itself with.
    pub fn panel(&self) -> &NodeRef<Rectangle> {
        &self.0.panel
    }

    /// Returns the shard regions of the panel.
    pub fn shards(&self) -> Vec<Rectangle> {
        self.0.button_shard.get().into_iter().collect()
    }

    /// Returns whether `point` is inside the panel or any of its shards.
    pub fn contains(&self, point: Point) -> bool {
        self.0
            .panel
            .get()
            .into_iter()
            .chain(self.shards())
            .any(|bounds| bounds.contains(point))
    }

    /// Computes the origin of a panel of the given size, anchored to the
    /// trigger, inside `viewport`.
    ///
    /// Returns `None` until the trigger has been attached.
    pub fn position(&self, panel: Size, viewport: Rectangle) -> Option<(Point, Placement)> {
        let anchor = self.0.button_reference.get()?;
        let position = self.floating().position(anchor, panel, viewport);

        Some((position.origin, position.placement))
    }

    /// Returns whether both handles point to the same state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Floating::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("open", &self.is_open())
            .field("floating", &self.floating())
            .field("button_reference", &self.0.button_reference)
            .field("panel", &self.0.panel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn trigger() -> impl Strategy<Value = Trigger> {
        prop_oneof![
            Just(Trigger::ButtonActivated),
            Just(Trigger::OutsideClick),
            Just(Trigger::EscapeKey),
            Just(Trigger::ItemActivated),
        ]
    }

    proptest! {
        #[test]
        fn sequences_reduce_to_the_last_forced_close(
            triggers in proptest::collection::vec(trigger(), 0..64),
        ) {
            let store = Store::default();

            for trigger in &triggers {
                let _ = store.dispatch(*trigger);
            }

            // Everything after the last forced close is a run of flips.
            let flips = triggers
                .iter()
                .rev()
                .take_while(|trigger| **trigger == Trigger::ButtonActivated)
                .count();

            prop_assert_eq!(store.is_open(), flips % 2 == 1);
        }
    }

    #[test]
    fn escape_then_button_reopens() {
        let store = Store::default();

        assert_eq!(store.dispatch(Trigger::ButtonActivated), Status::Open);
        assert_eq!(store.dispatch(Trigger::EscapeKey), Status::Closed);
        assert_eq!(store.dispatch(Trigger::ButtonActivated), Status::Open);
    }

    #[test]
    fn items_close_an_open_menu() {
        let store = Store::default();

        let _ = store.dispatch(Trigger::ButtonActivated);
        assert_eq!(store.dispatch(Trigger::ItemActivated), Status::Closed);
        assert!(!store.is_open());
    }

    #[test]
    fn closing_triggers_keep_a_closed_menu_closed() {
        for trigger in [
            Trigger::OutsideClick,
            Trigger::EscapeKey,
            Trigger::ItemActivated,
        ] {
            assert_eq!(Status::Closed.next(trigger), Status::Closed);
        }
    }

    #[test]
    fn set_open_accepts_values_and_updates() {
        let store = Store::default();

        assert!(store.set_open(true));
        assert!(!store.set_open(true));
        assert!(store.set_open(Next::update(|open| !open)));
        assert!(!store.is_open());
        assert!(store.toggle());
        assert!(store.is_open());
    }

    #[test]
    fn changes_are_reported_once() {
        let store = Store::default();

        assert!(!store.take_changed());

        let _ = store.set_open(true);
        assert!(store.take_changed());
        assert!(!store.take_changed());
    }

    #[test]
    fn focus_requests_follow_transitions() {
        let store = Store::default();

        let _ = store.set_open(true);
        assert!(store.take_auto_focus());
        assert!(!store.take_return_focus());

        let _ = store.set_open(false);
        assert!(!store.take_auto_focus());
        assert!(store.take_return_focus());
        assert!(!store.take_return_focus());
    }

    #[test]
    fn clones_share_state() {
        let store = Store::default();
        let alias = store.clone();

        let _ = alias.set_open(true);

        assert!(store.is_open());
        assert!(store.ptr_eq(&alias));
        assert!(!store.ptr_eq(&Store::default()));
    }

    #[test]
    fn shards_are_not_outside() {
        let store = Store::default();

        store
            .button_shard()
            .set(Some(Rectangle::new(Point::new(10.0, 10.0), Size::new(20.0, 20.0))));
        store
            .panel()
            .set(Some(Rectangle::new(Point::new(0.0, 40.0), Size::new(100.0, 80.0))));

        assert!(store.contains(Point::new(15.0, 15.0)));
        assert!(store.contains(Point::new(50.0, 100.0)));
        assert!(!store.contains(Point::new(300.0, 300.0)));
    }

    #[test]
    fn position_waits_for_the_anchor() {
        let store = Store::default();
        let viewport = Rectangle::new(Point::ORIGIN, Size::new(800.0, 600.0));

        assert_eq!(store.position(Size::new(100.0, 50.0), viewport), None);

        store
            .button_reference()
            .set(Some(Rectangle::new(Point::new(700.0, 10.0), Size::new(40.0, 30.0))));

        assert_eq!(
            store.position(Size::new(100.0, 50.0), viewport),
            Some((Point::new(640.0, 48.0), Placement::BottomEnd))
        );
    }

    #[test]
    fn closed_panels_are_hidden_once_settled() {
        let store = Store::default();
        let now = Instant::now();

        assert!(!store.is_visible(now));
        assert!(store.opacity(now).abs() < f32::EPSILON);
        assert!((store.offset(now) - CLOSED_OFFSET).abs() < f32::EPSILON);

        let _ = store.set_open(true);
        let later = Instant::now() + TRANSITION * 2;

        assert!(store.is_visible(later));
        assert!(!store.is_animating(later));
        assert!((store.opacity(later) - 1.0).abs() < 1e-4);
        assert!(store.offset(later).abs() < 1e-4);
    }
}
