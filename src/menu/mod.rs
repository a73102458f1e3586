//! Menus hold the open state shared by a trigger and its panel.
//!
//! A [`Menu`] does not draw anything by itself. It stacks its children and
//! makes its [`Store`] reachable from every [`MenuButton`], [`MenuPanel`] and
//! [`MenuItem`] inside of it.
pub mod context;
pub mod style;

mod button;
mod item;
mod panel;
mod store;

pub use button::{Click, MenuButton};
pub use item::MenuItem;
pub use panel::{DEFAULT_WIDTH as PANEL_WIDTH, MenuPanel, Options};
pub use store::{CLOSED_OFFSET, Next, Status, Store, TRANSITION, Trigger};
pub use style::{Catalog, Style};

use crate::core::layout;
use crate::core::mouse;
use crate::core::overlay;
use crate::core::renderer;
use crate::core::widget::Operation;
use crate::core::widget::tree::{self, Tree};
use crate::core::window;
use crate::core::{
    Clipboard, Element, Event, Layout, Length, Rectangle, Shell, Size, Vector, Widget,
};
use crate::floating::{Floating, Placement};

/// The provider of a menu.
///
/// Every menu widget must be a descendant of a [`Menu`]. Using one outside
/// of it panics with [`Error::ContextMissing`](crate::Error::ContextMissing)
/// on its first layout.
pub struct Menu<'a, Message, Theme = crate::core::Theme, Renderer = iced_widget::Renderer>
where
    Renderer: crate::core::Renderer,
{
    children: Vec<Element<'a, Message, Theme, Renderer>>,
    floating: Floating,
    on_toggle: Option<Box<dyn Fn(bool) -> Message + 'a>>,
}

impl<'a, Message, Theme, Renderer> Menu<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
{
    /// Creates an empty [`Menu`].
    pub fn new() -> Self {
        Self::with_children([])
    }

    /// Creates a [`Menu`] with the given children.
    pub fn with_children(
        children: impl IntoIterator<Item = Element<'a, Message, Theme, Renderer>>,
    ) -> Self {
        Self {
            children: children.into_iter().collect(),
            floating: Floating::default(),
            on_toggle: None,
        }
    }

    /// Adds a child to the [`Menu`].
    pub fn push(mut self, child: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the [`Placement`] of the panel relative to the trigger.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.floating.placement = placement;
        self
    }

    /// Sets the whole [`Floating`] configuration of the panel.
    pub fn floating(mut self, floating: Floating) -> Self {
        self.floating = floating;
        self
    }

    /// Publishes the result of `on_toggle` whenever the menu opens or closes.
    pub fn on_toggle(mut self, on_toggle: impl Fn(bool) -> Message + 'a) -> Self {
        self.on_toggle = Some(Box::new(on_toggle));
        self
    }
}

impl<Message, Theme, Renderer> Default for Menu<'_, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
{
    fn default() -> Self {
        Self::new()
    }
}

fn notify<Message>(
    store: &Store,
    on_toggle: Option<&dyn Fn(bool) -> Message>,
    shell: &mut Shell<'_, Message>,
) {
    if !store.take_changed() {
        return;
    }

    if let Some(on_toggle) = on_toggle {
        shell.publish(on_toggle(store.is_open()));
    }
}

impl<'a, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Menu<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<Store>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(Store::new(self.floating))
    }

    fn children(&self) -> Vec<Tree> {
        self.children.iter().map(Tree::new).collect()
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(&self.children);
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Shrink,
            height: Length::Shrink,
        }
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let store = tree.state.downcast_ref::<Store>().clone();
        store.set_floating(self.floating);

        let nodes = context::provide(&store, || {
            self.children
                .iter_mut()
                .zip(&mut tree.children)
                .map(|(child, tree)| child.as_widget_mut().layout(tree, renderer, limits))
                .collect::<Vec<_>>()
        });

        let size = nodes
            .iter()
            .fold(Size::ZERO, |size, node| size.max(node.size()));

        layout::Node::with_children(limits.resolve(Length::Shrink, Length::Shrink, size), nodes)
    }

    fn operate(
        &mut self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        let store = tree.state.downcast_ref::<Store>().clone();

        operation.container(None, layout.bounds());
        operation.traverse(&mut |operation| {
            context::provide(&store, || {
                self.children
                    .iter_mut()
                    .zip(&mut tree.children)
                    .zip(layout.children())
                    .for_each(|((child, state), layout)| {
                        child
                            .as_widget_mut()
                            .operate(state, layout, renderer, operation);
                    });
            });
        });
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let store = tree.state.downcast_ref::<Store>().clone();

        context::provide(&store, || {
            for ((child, state), layout) in self
                .children
                .iter_mut()
                .zip(&mut tree.children)
                .zip(layout.children())
            {
                child.as_widget_mut().update(
                    state, event, layout, cursor, renderer, clipboard, shell, viewport,
                );
            }
        });

        if let Event::Window(window::Event::RedrawRequested(now)) = event {
            if store.is_animating(*now) {
                shell.request_redraw();
            }
        }

        notify(&store, self.on_toggle.as_deref(), shell);
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let store = tree.state.downcast_ref::<Store>();

        context::provide(store, || {
            for ((child, state), layout) in self
                .children
                .iter()
                .zip(&tree.children)
                .zip(layout.children())
            {
                child
                    .as_widget()
                    .draw(state, renderer, theme, style, layout, cursor, viewport);
            }
        });
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        let store = tree.state.downcast_ref::<Store>();

        context::provide(store, || {
            self.children
                .iter()
                .zip(&tree.children)
                .zip(layout.children())
                .map(|((child, state), layout)| {
                    child
                        .as_widget()
                        .mouse_interaction(state, layout, cursor, viewport, renderer)
                })
                .max()
                .unwrap_or_default()
        })
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        let store = tree.state.downcast_ref::<Store>().clone();
        let on_toggle = self.on_toggle.as_deref();

        let overlay = context::provide(&store, || {
            overlay::from_children(
                &mut self.children,
                tree,
                layout,
                renderer,
                viewport,
                translation,
            )
        })?;

        Some(overlay::Element::new(Box::new(Notify {
            store,
            overlay,
            on_toggle,
        })))
    }
}

impl<'a, Message, Theme, Renderer> From<Menu<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: crate::core::Renderer + 'a,
{
    fn from(menu: Menu<'a, Message, Theme, Renderer>) -> Self {
        Self::new(menu)
    }
}

/// Forwards the overlays of a [`Menu`], publishing toggles that happen in
/// them right away.
struct Notify<'b, Message, Theme, Renderer> {
    store: Store,
    overlay: overlay::Element<'b, Message, Theme, Renderer>,
    on_toggle: Option<&'b dyn Fn(bool) -> Message>,
}

impl<Message, Theme, Renderer> overlay::Overlay<Message, Theme, Renderer>
    for Notify<'_, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
{
    fn layout(&mut self, renderer: &Renderer, bounds: Size) -> layout::Node {
        context::provide(&self.store, || {
            self.overlay.as_overlay_mut().layout(renderer, bounds)
        })
    }

    fn draw(
        &self,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
    ) {
        context::provide(&self.store, || {
            self.overlay
                .as_overlay()
                .draw(renderer, theme, style, layout, cursor);
        });
    }

    fn operate(
        &mut self,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        context::provide(&self.store, || {
            self.overlay
                .as_overlay_mut()
                .operate(layout, renderer, operation);
        });
    }

    fn update(
        &mut self,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
    ) {
        context::provide(&self.store, || {
            self.overlay
                .as_overlay_mut()
                .update(event, layout, cursor, renderer, clipboard, shell);
        });

        notify(&self.store, self.on_toggle, shell);
    }

    fn mouse_interaction(
        &self,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        context::provide(&self.store, || {
            self.overlay
                .as_overlay()
                .mouse_interaction(layout, cursor, renderer)
        })
    }

    fn overlay<'c>(
        &'c mut self,
        layout: Layout<'c>,
        renderer: &Renderer,
    ) -> Option<overlay::Element<'c, Message, Theme, Renderer>> {
        self.overlay.as_overlay_mut().overlay(layout, renderer)
    }

    fn index(&self) -> f32 {
        self.overlay.as_overlay().index()
    }
}
