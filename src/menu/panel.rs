//! The floating panel of a menu.
use super::context;
use super::store::{Store, Trigger};
use super::style::{self, Catalog, Part, Style};
use crate::combined_ref::{CombinedRef, Ref, use_combined_ref};
use crate::core::keyboard;
use crate::core::keyboard::key::{self, Key};
use crate::core::layout;
use crate::core::mouse;
use crate::core::overlay;
use crate::core::renderer;
use crate::core::time::Instant;
use crate::core::touch;
use crate::core::widget::Operation;
use crate::core::widget::tree::{self, Tree};
use crate::core::window;
use crate::core::{
    Background, Clipboard, Color, Element, Event, Layout, Length, Padding, Point, Rectangle,
    Shell, Size, Vector, Widget,
};
use crate::focus::{self, Census, Direction, FocusIndex};

/// The default [`Padding`] of a [`MenuPanel`].
pub const DEFAULT_PADDING: Padding = Padding {
    top: 4.0,
    bottom: 4.0,
    right: 4.0,
    left: 4.0,
};

/// The default width of a [`MenuPanel`].
pub const DEFAULT_WIDTH: f32 = 160.0;

/// How a [`MenuPanel`] traps focus and gets dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Close the menu when <kbd>Esc</kbd> is pressed.
    pub close_on_escape: bool,
    /// Close the menu on a press outside of the panel and the trigger.
    pub close_on_click_outside: bool,
    /// Focus the first item when the menu opens.
    pub auto_focus: bool,
    /// Give focus back to the trigger when the menu closes.
    pub return_focus: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_click_outside: true,
            auto_focus: true,
            return_focus: true,
        }
    }
}

/// The content of a menu, floating next to its [`MenuButton`].
///
/// The panel takes no space where it is placed. While its menu is open, it
/// is drawn on top of everything else and keeps keyboard focus among its
/// items.
///
/// [`MenuButton`]: super::MenuButton
pub struct MenuPanel<'a, Message, Theme = crate::core::Theme, Renderer = iced_widget::Renderer>
where
    Renderer: crate::core::Renderer,
    Theme: Catalog,
{
    content: Element<'a, Message, Theme, Renderer>,
    options: Options,
    width: Length,
    padding: Padding,
    reference: Option<Ref<Rectangle>>,
    class: Theme::Class<'a>,
}

impl<'a, Message, Theme, Renderer> MenuPanel<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
    Theme: Catalog,
{
    /// Creates a new [`MenuPanel`] with the given content.
    pub fn new(content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        Self {
            content: content.into(),
            options: Options::default(),
            width: Length::Fixed(DEFAULT_WIDTH),
            padding: DEFAULT_PADDING,
            reference: None,
            class: Theme::default(),
        }
    }

    /// Sets all the [`Options`] of the [`MenuPanel`] at once.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Sets whether <kbd>Esc</kbd> closes the menu.
    pub fn close_on_escape(mut self, close_on_escape: bool) -> Self {
        self.options.close_on_escape = close_on_escape;
        self
    }

    /// Sets whether a press outside of the panel closes the menu.
    pub fn close_on_click_outside(mut self, close_on_click_outside: bool) -> Self {
        self.options.close_on_click_outside = close_on_click_outside;
        self
    }

    /// Sets whether the first item is focused when the menu opens.
    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.options.auto_focus = auto_focus;
        self
    }

    /// Sets whether the trigger gets focus back when the menu closes.
    pub fn return_focus(mut self, return_focus: bool) -> Self {
        self.options.return_focus = return_focus;
        self
    }

    /// Sets the width of the [`MenuPanel`].
    ///
    /// Items fill the panel, so a [`Length::Shrink`] panel only fits items
    /// with an intrinsic width.
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the [`Padding`] of the [`MenuPanel`].
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Registers the bounds of the floating panel with a [`Ref`].
    pub fn reference(mut self, reference: impl Into<Ref<Rectangle>>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the style of the [`MenuPanel`].
    #[must_use]
    pub fn style(mut self, style: impl Fn(&Theme, Part, style::Status) -> Style + 'a) -> Self
    where
        Theme::Class<'a>: From<style::StyleFn<'a, Theme>>,
    {
        self.class = (Box::new(style) as style::StyleFn<'a, Theme>).into();
        self
    }

    /// Sets the style class of the [`MenuPanel`].
    #[must_use]
    pub fn class(mut self, class: impl Into<Theme::Class<'a>>) -> Self {
        self.class = class.into();
        self
    }
}

#[derive(Default)]
struct State {
    references: Option<CombinedRef<Rectangle>>,
    is_attached: bool,
}

impl State {
    fn detach(&mut self) {
        if !self.is_attached {
            return;
        }

        if let Some(references) = &self.references {
            log::trace!("Detaching menu panel");
            references.detach();
        }

        self.is_attached = false;
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<'a, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for MenuPanel<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer + 'a,
    Theme: Catalog,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Fixed(0.0),
            height: Length::Fixed(0.0),
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        _limits: &layout::Limits,
    ) -> layout::Node {
        let _ = context::expect();

        layout::Node::new(Size::ZERO)
    }

    fn draw(
        &self,
        _tree: &Tree,
        _renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut Tree,
        _layout: Layout<'b>,
        _renderer: &Renderer,
        _viewport: &Rectangle,
        _translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        let store = context::expect();
        let Tree {
            state, children, ..
        } = tree;
        let state = state.downcast_mut::<State>();

        if !store.is_visible(Instant::now()) {
            state.detach();
            return None;
        }

        state.is_attached = true;

        let references = use_combined_ref(
            &mut state.references,
            [self.reference.clone(), Some(store.panel().into())],
        );

        Some(overlay::Element::new(Box::new(Portal {
            store,
            state: &mut children[0],
            content: &mut self.content,
            references,
            options: self.options,
            width: self.width,
            padding: self.padding,
            class: &self.class,
        })))
    }
}

impl<'a, Message, Theme, Renderer> From<MenuPanel<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: Catalog + 'a,
    Renderer: crate::core::Renderer + 'a,
{
    fn from(panel: MenuPanel<'a, Message, Theme, Renderer>) -> Self {
        Self::new(panel)
    }
}

/// The panel as drawn on top of the rest of the interface.
struct Portal<'a, 'b, Message, Theme, Renderer>
where
    Theme: Catalog,
{
    store: Store,
    state: &'b mut Tree,
    content: &'b mut Element<'a, Message, Theme, Renderer>,
    references: &'b CombinedRef<Rectangle>,
    options: Options,
    width: Length,
    padding: Padding,
    class: &'b Theme::Class<'a>,
}

impl<Message, Theme, Renderer> Portal<'_, '_, Message, Theme, Renderer>
where
    Theme: Catalog,
    Renderer: crate::core::Renderer,
{
    fn move_focus(&mut self, layout: Layout<'_>, renderer: &Renderer, target: Option<usize>) {
        let mut focus = FocusIndex::new(target);

        self.content
            .as_widget_mut()
            .operate(self.state, layout, renderer, &mut focus);
    }

    fn census(&mut self, layout: Layout<'_>, renderer: &Renderer) -> Census {
        let mut census = Census::default();

        self.content
            .as_widget_mut()
            .operate(self.state, layout, renderer, &mut census);

        census
    }

    /// Returns how far the panel is currently drawn from its settled
    /// position.
    fn shift(&self) -> Vector {
        Vector::new(0.0, self.store.offset(Instant::now()))
    }

    /// Returns whether `position` is outside of the drawn panel and every
    /// shard of it.
    fn is_outside(&self, position: Point) -> bool {
        let in_panel = self
            .store
            .panel()
            .get()
            .is_some_and(|bounds| bounds.contains(position - self.shift()));
        let in_shard = self
            .store
            .shards()
            .iter()
            .any(|shard| shard.contains(position));

        !in_panel && !in_shard
    }

    fn dismiss(&self, trigger: Trigger, shell: &mut Shell<'_, Message>) {
        let _ = self.store.dispatch(trigger);

        shell.invalidate_layout();
        shell.request_redraw();
    }
}

impl<Message, Theme, Renderer> overlay::Overlay<Message, Theme, Renderer>
    for Portal<'_, '_, Message, Theme, Renderer>
where
    Theme: Catalog,
    Renderer: crate::core::Renderer,
{
    fn layout(&mut self, renderer: &Renderer, bounds: Size) -> layout::Node {
        let limits = layout::Limits::new(Size::ZERO, bounds);

        let node = context::provide(&self.store, || {
            layout::padded(&limits, self.width, Length::Shrink, self.padding, |limits| {
                self.content
                    .as_widget_mut()
                    .layout(self.state, renderer, limits)
            })
        });

        let origin = match self.store.position(node.size(), Rectangle::with_size(bounds)) {
            Some((origin, _placement)) => origin,
            None => {
                log::trace!("Menu panel laid out before its trigger was attached");
                Point::ORIGIN
            }
        };

        let node = node.move_to(origin);

        log::trace!("Attaching menu panel at {:?}", node.bounds());
        self.references.attach(node.bounds());

        layout::Node::with_children(bounds, vec![node])
    }

    fn draw(
        &self,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
    ) {
        let Some(panel_layout) = layout.children().next() else {
            log::warn!("MenuPanel: missing panel layout in draw(), skipping");
            return;
        };
        let Some(content_layout) = panel_layout.children().next() else {
            log::warn!("MenuPanel: missing child layout in draw(), skipping");
            return;
        };

        let now = Instant::now();
        let opacity = self.store.opacity(now);
        let offset = self.store.offset(now);
        let bounds = panel_layout.bounds();

        let cursor = if self.store.is_open() {
            cursor - Vector::new(0.0, offset)
        } else {
            mouse::Cursor::Unavailable
        };

        let style = theme
            .style(self.class, Part::Panel, style::Status::Active)
            .fade(opacity);

        renderer.with_layer(layout.bounds(), |renderer| {
            renderer.with_translation(Vector::new(0.0, offset), |renderer| {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds,
                        border: style.border,
                        shadow: style.shadow,
                        ..renderer::Quad::default()
                    },
                    style
                        .background
                        .unwrap_or(Background::Color(Color::TRANSPARENT)),
                );

                context::provide(&self.store, || {
                    self.content.as_widget().draw(
                        self.state,
                        renderer,
                        theme,
                        &renderer::Style {
                            text_color: style.text_color,
                        },
                        content_layout,
                        cursor,
                        &bounds,
                    );
                });
            });
        });
    }

    fn operate(
        &mut self,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        let Some(content_layout) = layout
            .children()
            .next()
            .and_then(|panel| panel.children().next())
        else {
            return;
        };

        let store = self.store.clone();

        context::provide(&store, || {
            self.content
                .as_widget_mut()
                .operate(self.state, content_layout, renderer, operation);
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
        let Some(panel_layout) = layout.children().next() else {
            log::warn!("MenuPanel: missing panel layout in update(), skipping");
            return;
        };
        let Some(content_layout) = panel_layout.children().next() else {
            log::warn!("MenuPanel: missing child layout in update(), skipping");
            return;
        };

        if let Event::Window(window::Event::RedrawRequested(now)) = event {
            if self.store.is_animating(*now) {
                shell.request_redraw();
            }
        }

        // A closing panel is still drawn but takes no input.
        if !self.store.is_open() {
            if !self.options.return_focus {
                let _ = self.store.take_return_focus();
            }

            return;
        }

        let store = self.store.clone();

        if store.take_auto_focus() && self.options.auto_focus {
            let target = (self.census(content_layout, renderer).total > 0).then_some(0);

            context::provide(&store, || {
                self.move_focus(content_layout, renderer, target);
            });
            shell.request_redraw();
        }

        let bounds = panel_layout.bounds();
        let content_cursor = cursor - self.shift();

        context::provide(&store, || {
            self.content.as_widget_mut().update(
                self.state,
                event,
                content_layout,
                content_cursor,
                renderer,
                clipboard,
                shell,
                &bounds,
            );
        });

        if !shell.is_event_captured() {
            match event {
                Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                    let direction = match key {
                        Key::Named(key::Named::Escape) if self.options.close_on_escape => {
                            self.dismiss(Trigger::EscapeKey, shell);
                            shell.capture_event();
                            None
                        }
                        Key::Named(key::Named::Tab) if modifiers.shift() => {
                            Some(Direction::Backward)
                        }
                        Key::Named(key::Named::Tab | key::Named::ArrowDown) => {
                            Some(Direction::Forward)
                        }
                        Key::Named(key::Named::ArrowUp) => Some(Direction::Backward),
                        _ => None,
                    };

                    if let Some(direction) = direction {
                        let target = focus::cycle(self.census(content_layout, renderer), direction);

                        self.move_focus(content_layout, renderer, target);
                        shell.capture_event();
                        shell.request_redraw();
                    }
                }
                Event::Mouse(mouse::Event::ButtonPressed(_)) => {
                    if let Some(position) = cursor.position() {
                        if self.options.close_on_click_outside && self.is_outside(position) {
                            self.dismiss(Trigger::OutsideClick, shell);
                        }
                    }
                }
                Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                    if self.options.close_on_click_outside && self.is_outside(*position) {
                        self.dismiss(Trigger::OutsideClick, shell);
                    }
                }
                _ => {}
            }
        }

        if !store.is_open() && !self.options.return_focus {
            let _ = store.take_return_focus();
        }
    }

    fn mouse_interaction(
        &self,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        if !self.store.is_open() {
            return mouse::Interaction::default();
        }

        let Some(panel_layout) = layout.children().next() else {
            return mouse::Interaction::default();
        };
        let Some(content_layout) = panel_layout.children().next() else {
            return mouse::Interaction::default();
        };

        context::provide(&self.store, || {
            self.content.as_widget().mouse_interaction(
                self.state,
                content_layout,
                cursor - self.shift(),
                &panel_layout.bounds(),
                renderer,
            )
        })
    }

    fn overlay<'c>(
        &'c mut self,
        layout: Layout<'c>,
        renderer: &Renderer,
    ) -> Option<overlay::Element<'c, Message, Theme, Renderer>> {
        let viewport = layout.bounds();
        let content_layout = layout.children().next()?.children().next()?;
        let store = self.store.clone();

        context::provide(&store, || {
            self.content.as_widget_mut().overlay(
                self.state,
                content_layout,
                renderer,
                &viewport,
                Vector::ZERO,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::combined_ref::NodeRef;
    use crate::core::clipboard;
    use crate::core::keyboard::{Location, Modifiers};
    use crate::core::{Theme, window};
    use crate::menu::{CLOSED_OFFSET, Menu, MenuButton, MenuItem};

    use iced_widget::Column;

    type Panel<'a> = MenuPanel<'a, (), Theme, ()>;
    type Rows<'a> = Column<'a, &'static str, Theme, ()>;
    type Item<'a> = MenuItem<'a, &'static str, Theme, ()>;

    fn panel<'a>() -> Panel<'a> {
        MenuPanel::new(iced_widget::Column::new())
    }

    fn limits() -> layout::Limits {
        layout::Limits::new(Size::ZERO, Size::new(800.0, 600.0))
    }

    #[test]
    #[should_panic(expected = "must be used within a Menu provider")]
    fn panels_outside_of_a_menu_panic() {
        let mut panel = panel();
        let mut tree = Tree::new(&panel as &dyn Widget<(), Theme, ()>);

        let _ = panel.layout(&mut tree, &(), &limits());
    }

    #[test]
    fn panels_float_below_the_trigger_while_open() {
        let store = Store::default();
        let viewport = Rectangle::with_size(Size::new(800.0, 600.0));

        store.button_reference().set(Some(Rectangle {
            x: 600.0,
            y: 10.0,
            width: 40.0,
            height: 30.0,
        }));

        let mut panel = panel();
        let mut tree = Tree::new(&panel as &dyn Widget<(), Theme, ()>);

        context::provide(&store, || {
            let node = panel.layout(&mut tree, &(), &limits());
            assert_eq!(node.size(), Size::ZERO);

            assert!(
                panel
                    .overlay(&mut tree, Layout::new(&node), &(), &viewport, Vector::ZERO)
                    .is_none()
            );

            let _ = store.set_open(true);

            let mut overlay = panel
                .overlay(&mut tree, Layout::new(&node), &(), &viewport, Vector::ZERO)
                .expect("open panels float");

            let _ = overlay.as_overlay_mut().layout(&(), viewport.size());
        });

        let bounds = store.panel().get().expect("panel is attached");

        assert_eq!(bounds.x + bounds.width, 640.0);
        assert_eq!(bounds.y, 48.0);
        assert!(store.contains(Point::new(bounds.x + 1.0, bounds.y + 1.0)));
    }

    #[test]
    fn options_default_to_a_full_trap() {
        let options = Options::default();

        assert!(options.close_on_escape);
        assert!(options.close_on_click_outside);
        assert!(options.auto_focus);
        assert!(options.return_focus);
    }

    fn viewport() -> Rectangle {
        Rectangle::with_size(Size::new(800.0, 600.0))
    }

    fn block<'a>(width: f32, height: f32) -> Rows<'a> {
        Column::new()
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
    }

    /// Two items, "first" and "second", each 32 units tall.
    fn rows<'a>() -> Rows<'a> {
        Column::new()
            .push(Item::new(block(100.0, 20.0)).on_press("first"))
            .push(Item::new(block(100.0, 20.0)).on_press("second"))
    }

    fn key_press(named: key::Named, modifiers: Modifiers) -> Event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(named),
            modified_key: Key::Named(named),
            physical_key: key::Physical::Unidentified(key::NativeCode::Unidentified),
            location: Location::Standard,
            modifiers,
            text: None,
            repeat: false,
        })
    }

    /// A trigger and a panel inside of a menu, driven the way a user
    /// interface drives them: overlays first, then the base layer.
    struct Harness<'a> {
        menu: Menu<'a, &'static str, Theme, ()>,
        tree: Tree,
        node: layout::Node,
        store: Store,
        messages: Vec<&'static str>,
    }

    impl<'a> Harness<'a> {
        fn new(panel: MenuPanel<'a, &'static str, Theme, ()>) -> Self {
            let mut menu = Menu::<'a, &'static str, Theme, ()>::new()
                .push(MenuButton::<'a, &'static str, Theme, ()>::new(block(40.0, 20.0)))
                .push(panel)
                .on_toggle(|open| if open { "opened" } else { "closed" });

            let mut tree = Tree::new(&menu as &dyn Widget<&'static str, Theme, ()>);
            let limits = layout::Limits::new(Size::ZERO, viewport().size());
            let node = menu.layout(&mut tree, &(), &limits);
            let store = tree.state.downcast_ref::<Store>().clone();

            Self {
                menu,
                tree,
                node,
                store,
                messages: Vec::new(),
            }
        }

        fn send(&mut self, event: Event, position: Point) {
            let Self {
                menu,
                tree,
                node,
                messages,
                ..
            } = self;

            let cursor = mouse::Cursor::Available(position);
            let viewport = viewport();

            if let Some(mut overlay) =
                menu.overlay(tree, Layout::new(node), &(), &viewport, Vector::ZERO)
            {
                let layout = overlay.as_overlay_mut().layout(&(), viewport.size());
                let mut shell = Shell::new(&mut *messages);

                overlay.as_overlay_mut().update(
                    &event,
                    Layout::new(&layout),
                    cursor,
                    &(),
                    &mut clipboard::Null,
                    &mut shell,
                );
            }

            let mut shell = Shell::new(&mut *messages);

            menu.update(
                tree,
                &event,
                Layout::new(node),
                cursor,
                &(),
                &mut clipboard::Null,
                &mut shell,
                &viewport,
            );
        }

        fn click(&mut self, position: Point) {
            self.send(
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
                position,
            );
            self.send(
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
                position,
            );
        }

        fn press(&mut self, named: key::Named, modifiers: Modifiers) {
            self.send(key_press(named, modifiers), Point::ORIGIN);
        }

        fn redraw(&mut self) {
            self.send(
                Event::Window(window::Event::RedrawRequested(Instant::now())),
                Point::ORIGIN,
            );
        }

        fn trigger(&mut self) -> Rectangle {
            let viewport = viewport();
            let _ = self.menu.overlay(
                &mut self.tree,
                Layout::new(&self.node),
                &(),
                &viewport,
                Vector::ZERO,
            );

            self.store
                .button_reference()
                .get()
                .expect("trigger is attached")
        }

        /// Opens the menu with a click on the trigger and returns the settled
        /// bounds of the panel.
        fn open(&mut self) -> Rectangle {
            let trigger = self.trigger();
            self.click(trigger.center());
            assert!(self.store.is_open());

            self.panel()
        }

        fn panel(&mut self) -> Rectangle {
            let viewport = viewport();

            if let Some(mut overlay) = self.menu.overlay(
                &mut self.tree,
                Layout::new(&self.node),
                &(),
                &viewport,
                Vector::ZERO,
            ) {
                let _ = overlay.as_overlay_mut().layout(&(), viewport.size());
            }

            self.store.panel().get().expect("panel is attached")
        }

        fn panel_focus(&mut self) -> Census {
            let viewport = viewport();
            let mut census = Census::default();

            if let Some(mut overlay) = self.menu.overlay(
                &mut self.tree,
                Layout::new(&self.node),
                &(),
                &viewport,
                Vector::ZERO,
            ) {
                let layout = overlay.as_overlay_mut().layout(&(), viewport.size());

                overlay
                    .as_overlay_mut()
                    .operate(Layout::new(&layout), &(), &mut census);
            }

            census
        }

        fn trigger_focus(&mut self) -> Census {
            let mut census = Census::default();

            self.menu.operate(
                &mut self.tree,
                Layout::new(&self.node),
                &(),
                &mut census,
            );

            census
        }
    }

    /// A point on the second item, below its center by half of the distance
    /// a freshly opened panel is drawn shifted by.
    fn second_item(panel: Rectangle) -> Point {
        Point::new(
            panel.center_x(),
            panel.y + DEFAULT_PADDING.top + 32.0 + 16.0 + CLOSED_OFFSET / 2.0,
        )
    }

    #[test]
    fn items_fill_a_panel_without_an_explicit_width() {
        let mut harness = Harness::new(MenuPanel::new(rows()));

        let panel = harness.open();
        assert_eq!(panel.width, DEFAULT_WIDTH);
        assert_eq!(panel.height, 72.0);

        harness.click(second_item(panel));

        assert!(!harness.store.is_open());
        assert_eq!(harness.messages, vec!["opened", "second", "closed"]);
    }

    #[test]
    fn pressing_inside_the_panel_keeps_it_open() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let panel = harness.open();

        // The left padding strip, beside the items.
        harness.click(Point::new(panel.x + 2.0, panel.center_y()));

        assert!(harness.store.is_open());
        assert_eq!(harness.messages, vec!["opened"]);
    }

    #[test]
    fn pressing_outside_closes_the_panel() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let _ = harness.open();

        harness.click(Point::new(700.0, 500.0));

        assert!(!harness.store.is_open());
        assert_eq!(harness.messages, vec!["opened", "closed"]);
    }

    #[test]
    fn pressing_the_trigger_while_open_closes_once() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let _ = harness.open();

        let trigger = harness.trigger();
        harness.click(trigger.center());

        assert!(!harness.store.is_open());
        assert_eq!(harness.messages, vec!["opened", "closed"]);
    }

    #[test]
    fn escape_closes_the_panel_and_returns_focus() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let _ = harness.open();

        harness.redraw();
        assert_eq!(harness.panel_focus().focused, Some(0));
        assert_eq!(harness.trigger_focus().focused, None);

        harness.press(key::Named::Escape, Modifiers::default());

        assert!(!harness.store.is_open());
        assert_eq!(harness.trigger_focus().focused, Some(0));
        assert_eq!(harness.messages, vec!["opened", "closed"]);
    }

    #[test]
    fn tab_wraps_inside_the_panel() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let _ = harness.open();

        harness.redraw();
        assert_eq!(harness.panel_focus(), Census { focused: Some(0), total: 2 });

        harness.press(key::Named::Tab, Modifiers::default());
        assert_eq!(harness.panel_focus().focused, Some(1));

        harness.press(key::Named::Tab, Modifiers::default());
        assert_eq!(harness.panel_focus().focused, Some(0));

        harness.press(key::Named::Tab, Modifiers::SHIFT);
        assert_eq!(harness.panel_focus().focused, Some(1));

        harness.press(key::Named::ArrowUp, Modifiers::default());
        assert_eq!(harness.panel_focus().focused, Some(0));

        assert!(harness.store.is_open());
    }

    #[test]
    fn enter_activates_the_focused_item() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let _ = harness.open();

        harness.redraw();
        harness.press(key::Named::ArrowDown, Modifiers::default());
        harness.press(key::Named::Enter, Modifiers::default());

        assert!(!harness.store.is_open());
        assert_eq!(harness.messages, vec!["opened", "second", "closed"]);
    }

    #[test]
    fn auto_focus_can_be_turned_off() {
        let mut harness = Harness::new(MenuPanel::new(rows()).auto_focus(false));
        let _ = harness.open();

        harness.redraw();

        assert_eq!(harness.panel_focus(), Census { focused: None, total: 2 });
    }

    #[test]
    fn escape_can_be_ignored() {
        let mut harness = Harness::new(MenuPanel::new(rows()).close_on_escape(false));
        let _ = harness.open();

        harness.press(key::Named::Escape, Modifiers::default());

        assert!(harness.store.is_open());
    }

    #[test]
    fn outside_presses_can_be_ignored() {
        let mut harness = Harness::new(MenuPanel::new(rows()).close_on_click_outside(false));
        let _ = harness.open();

        harness.click(Point::new(700.0, 500.0));

        assert!(harness.store.is_open());
    }

    #[test]
    fn focus_can_stay_away_from_the_trigger() {
        let mut harness = Harness::new(MenuPanel::new(rows()).return_focus(false));
        let _ = harness.open();

        harness.redraw();
        harness.press(key::Named::Escape, Modifiers::default());
        harness.redraw();

        assert!(!harness.store.is_open());
        assert_eq!(harness.trigger_focus().focused, None);
    }

    #[test]
    fn presses_follow_the_panel_while_it_slides_in() {
        let mut harness = Harness::new(MenuPanel::new(rows()));
        let panel = harness.open();

        // Right after opening, the panel is still drawn shifted down.
        harness.click(Point::new(panel.x + 2.0, panel.y + panel.height + 1.0));

        assert!(harness.store.is_open());
    }

    #[test]
    fn item_references_follow_the_panel() {
        let reference = NodeRef::<Rectangle>::new();
        let panel = MenuPanel::new(
            Column::new().push(Item::new(block(100.0, 20.0)).reference(&reference)),
        );

        let mut harness = Harness::new(panel);
        let bounds = harness.open();

        let viewport = viewport();
        let mut overlay = harness
            .menu
            .overlay(
                &mut harness.tree,
                Layout::new(&harness.node),
                &(),
                &viewport,
                Vector::ZERO,
            )
            .expect("open menus float");

        let layout = overlay.as_overlay_mut().layout(&(), viewport.size());
        assert!(
            overlay
                .as_overlay_mut()
                .overlay(Layout::new(&layout), &())
                .is_none()
        );
        drop(overlay);

        let item = reference.get().expect("item is attached");
        assert_eq!(item.x, bounds.x + DEFAULT_PADDING.left);
        assert_eq!(item.width, DEFAULT_WIDTH - DEFAULT_PADDING.x());

        drop(harness);
        assert_eq!(reference.get(), None);
    }
}
