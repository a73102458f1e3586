//! The trigger of a menu.
use super::context;
use super::store::Trigger;
use super::style::{self, Catalog, Part, Style};
use crate::combined_ref::{CombinedRef, Ref, use_combined_ref};
use crate::core::keyboard;
use crate::core::keyboard::key::{self, Key};
use crate::core::layout;
use crate::core::mouse;
use crate::core::overlay;
use crate::core::renderer;
use crate::core::touch;
use crate::core::widget::Id;
use crate::core::widget::operation::{self, Operation};
use crate::core::widget::tree::{self, Tree};
use crate::core::{
    Background, Clipboard, Color, Element, Event, Layout, Length, Padding, Rectangle, Shell, Size,
    Vector, Widget,
};
use crate::focus::FocusRing;

/// The default [`Padding`] of a [`MenuButton`].
pub const DEFAULT_PADDING: Padding = Padding {
    top: 4.0,
    bottom: 4.0,
    right: 4.0,
    left: 4.0,
};

/// A click on a [`MenuButton`], handed to its [`MenuButton::on_click`]
/// handler before the menu is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Click {
    default_prevented: bool,
}

impl Click {
    /// Stops the [`MenuButton`] from toggling its menu.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns whether [`Click::prevent_default`] was called.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A button that opens and closes the [`Menu`](super::Menu) it belongs to.
///
/// Its bounds are registered as the anchor of the panel, as a region the
/// panel never treats as "outside", and with any [`Ref`] given through
/// [`MenuButton::reference`].
pub struct MenuButton<'a, Message, Theme = crate::core::Theme, Renderer = iced_widget::Renderer>
where
    Renderer: crate::core::Renderer,
    Theme: Catalog,
{
    id: Option<Id>,
    content: Element<'a, Message, Theme, Renderer>,
    on_click: Option<Box<dyn Fn(&mut Click) -> Option<Message> + 'a>>,
    reference: Option<Ref<Rectangle>>,
    width: Length,
    height: Length,
    padding: Padding,
    class: Theme::Class<'a>,
}

impl<'a, Message, Theme, Renderer> MenuButton<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
    Theme: Catalog,
{
    /// Creates a new [`MenuButton`] with the given content.
    pub fn new(content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        let content = content.into();
        let size = content.as_widget().size_hint();

        Self {
            id: None,
            content,
            on_click: None,
            reference: None,
            width: size.width.fluid(),
            height: size.height.fluid(),
            padding: DEFAULT_PADDING,
            class: Theme::default(),
        }
    }

    /// Sets the [`Id`] of the [`MenuButton`].
    pub fn id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the width of the [`MenuButton`].
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the height of the [`MenuButton`].
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Sets the [`Padding`] of the [`MenuButton`].
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Registers the bounds of the [`MenuButton`] with an extra [`Ref`].
    pub fn reference(mut self, reference: impl Into<Ref<Rectangle>>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Publishes `message` whenever the [`MenuButton`] is clicked.
    pub fn on_press(self, message: Message) -> Self
    where
        Message: Clone + 'a,
    {
        self.on_click(move |_click| Some(message.clone()))
    }

    /// Runs `on_click` before toggling the menu.
    ///
    /// The handler may publish a message, and may call
    /// [`Click::prevent_default`] to keep the menu as it is.
    pub fn on_click(mut self, on_click: impl Fn(&mut Click) -> Option<Message> + 'a) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Sets the style of the [`MenuButton`].
    #[must_use]
    pub fn style(mut self, style: impl Fn(&Theme, Part, style::Status) -> Style + 'a) -> Self
    where
        Theme::Class<'a>: From<style::StyleFn<'a, Theme>>,
    {
        self.class = (Box::new(style) as style::StyleFn<'a, Theme>).into();
        self
    }

    /// Sets the style class of the [`MenuButton`].
    #[must_use]
    pub fn class(mut self, class: impl Into<Theme::Class<'a>>) -> Self {
        self.class = class.into();
        self
    }

    fn activate(&self, shell: &mut Shell<'_, Message>) {
        let store = context::expect();
        let mut click = Click::default();

        if let Some(on_click) = &self.on_click {
            if let Some(message) = on_click(&mut click) {
                shell.publish(message);
            }
        }

        if click.is_default_prevented() {
            log::trace!("Menu toggle prevented by the click handler");
            return;
        }

        let _ = store.dispatch(Trigger::ButtonActivated);

        shell.invalidate_layout();
        shell.request_redraw();
    }
}

#[derive(Default)]
struct State {
    is_pressed: bool,
    is_focused: bool,
    is_hovered: bool,
    is_open: bool,
    references: Option<CombinedRef<Rectangle>>,
}

impl operation::Focusable for State {
    fn is_focused(&self) -> bool {
        self.is_focused
    }

    fn focus(&mut self) {
        self.is_focused = true;
    }

    fn unfocus(&mut self) {
        self.is_focused = false;
    }
}

impl Drop for State {
    fn drop(&mut self) {
        if let Some(references) = &self.references {
            log::trace!("Detaching menu button");
            references.detach();
        }
    }
}

impl<'a, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for MenuButton<'a, Message, Theme, Renderer>
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
            width: self.width,
            height: self.height,
        }
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let store = context::expect();

        let state = tree.state.downcast_mut::<State>();
        state.is_open = store.is_open();

        layout::padded(limits, self.width, self.height, self.padding, |limits| {
            self.content
                .as_widget_mut()
                .layout(&mut tree.children[0], renderer, limits)
        })
    }

    fn operate(
        &mut self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        let state = tree.state.downcast_mut::<State>();
        operation.focusable(self.id.as_ref(), layout.bounds(), state);

        let Some(content_layout) = layout.children().next() else {
            log::warn!("MenuButton: missing child layout in operate(), skipping");
            return;
        };

        operation.traverse(&mut |operation| {
            self.content.as_widget_mut().operate(
                &mut tree.children[0],
                content_layout,
                renderer,
                operation,
            );
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
        let Some(content_layout) = layout.children().next() else {
            log::warn!("MenuButton: missing child layout in update(), skipping");
            return;
        };

        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            content_layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );

        let store = context::expect();
        let state = tree.state.downcast_mut::<State>();

        if store.is_open() && state.is_focused {
            state.is_focused = false;
            shell.request_redraw();
        } else if store.take_return_focus() {
            state.is_focused = true;
            shell.request_redraw();
        }

        if state.is_open != store.is_open() {
            state.is_open = store.is_open();
            shell.request_redraw();
        }

        if shell.is_event_captured() {
            return;
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerPressed { .. }) => {
                if cursor.is_over(layout.bounds()) {
                    state.is_pressed = true;
                    shell.capture_event();
                } else if state.is_focused {
                    state.is_focused = false;
                    shell.request_redraw();
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerLifted { .. }) => {
                if state.is_pressed {
                    state.is_pressed = false;

                    if cursor.is_over(layout.bounds()) {
                        self.activate(shell);
                    }

                    shell.capture_event();
                }
            }
            Event::Touch(touch::Event::FingerLost { .. }) => {
                state.is_pressed = false;
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let is_hovered = cursor.is_over(layout.bounds());

                if state.is_hovered != is_hovered {
                    state.is_hovered = is_hovered;
                    shell.request_redraw();
                }
            }
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(key::Named::Space | key::Named::Enter),
                ..
            }) => {
                if state.is_focused {
                    self.activate(shell);
                    shell.capture_event();
                }
            }
            _ => {}
        }
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        let Some(content_layout) = layout.children().next() else {
            log::warn!("MenuButton: missing child layout in draw(), skipping");
            return;
        };

        let state = tree.state.downcast_ref::<State>();

        let status = if state.is_pressed && cursor.is_over(bounds) {
            style::Status::Pressed
        } else if state.is_open {
            style::Status::Open
        } else if cursor.is_over(bounds) {
            style::Status::Hovered
        } else if state.is_focused {
            style::Status::Focused
        } else {
            style::Status::Active
        };

        let style = theme.style(&self.class, Part::Trigger, status);

        if style.background.is_some() || style.border.width > 0.0 {
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
        }

        if state.is_focused {
            FocusRing::default()
                .radius(style.border.radius.top_left)
                .draw(renderer, bounds);
        }

        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            &renderer::Style {
                text_color: style.text_color,
            },
            content_layout,
            cursor,
            viewport,
        );
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        let store = context::expect();
        let state = tree.state.downcast_mut::<State>();

        let references = use_combined_ref(
            &mut state.references,
            [
                self.reference.clone(),
                Some(store.button_reference().into()),
                Some(store.button_shard().into()),
            ],
        );

        let bounds = layout.bounds() + translation;

        log::trace!("Attaching menu button at {bounds:?}");
        references.attach(bounds);

        let content_layout = layout.children().next()?;

        self.content.as_widget_mut().overlay(
            &mut tree.children[0],
            content_layout,
            renderer,
            viewport,
            translation,
        )
    }
}

impl<'a, Message, Theme, Renderer> From<MenuButton<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: Catalog + 'a,
    Renderer: crate::core::Renderer + 'a,
{
    fn from(button: MenuButton<'a, Message, Theme, Renderer>) -> Self {
        Self::new(button)
    }
}
