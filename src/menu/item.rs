//! Action rows of a menu panel.
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
use crate::core::time::Instant;
use crate::core::touch;
use crate::core::widget::Id;
use crate::core::widget::operation::{self, Operation};
use crate::core::widget::tree::{self, Tree};
use crate::core::{
    Background, Clipboard, Color, Element, Event, Layout, Length, Padding, Rectangle, Shell, Size,
    Vector, Widget,
};
use crate::focus::FocusRing;

/// The default [`Padding`] of a [`MenuItem`].
pub const DEFAULT_PADDING: Padding = Padding {
    top: 6.0,
    bottom: 6.0,
    right: 12.0,
    left: 12.0,
};

/// A selectable action inside of a [`MenuPanel`](super::MenuPanel).
///
/// Activating a [`MenuItem`] always closes its menu, after publishing its
/// [`MenuItem::on_press`] message.
pub struct MenuItem<'a, Message, Theme = crate::core::Theme, Renderer = iced_widget::Renderer>
where
    Renderer: crate::core::Renderer,
    Theme: Catalog,
{
    id: Option<Id>,
    content: Element<'a, Message, Theme, Renderer>,
    on_press: Option<OnPress<'a, Message>>,
    reference: Option<Ref<Rectangle>>,
    width: Length,
    height: Length,
    padding: Padding,
    class: Theme::Class<'a>,
}

enum OnPress<'a, Message> {
    Direct(Message),
    Closure(Box<dyn Fn() -> Message + 'a>),
}

impl<Message: Clone> OnPress<'_, Message> {
    fn get(&self) -> Message {
        match self {
            OnPress::Direct(message) => message.clone(),
            OnPress::Closure(f) => f(),
        }
    }
}

impl<'a, Message, Theme, Renderer> MenuItem<'a, Message, Theme, Renderer>
where
    Renderer: crate::core::Renderer,
    Theme: Catalog,
{
    /// Creates a new [`MenuItem`] with the given content.
    pub fn new(content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        Self {
            id: None,
            content: content.into(),
            on_press: None,
            reference: None,
            width: Length::Fill,
            height: Length::Shrink,
            padding: DEFAULT_PADDING,
            class: Theme::default(),
        }
    }

    /// Sets the [`Id`] of the [`MenuItem`].
    pub fn id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the width of the [`MenuItem`].
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the height of the [`MenuItem`].
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Sets the [`Padding`] of the [`MenuItem`].
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Registers the bounds of the [`MenuItem`] with a [`Ref`].
    pub fn reference(mut self, reference: impl Into<Ref<Rectangle>>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Publishes `message` when the [`MenuItem`] is activated.
    pub fn on_press(mut self, message: Message) -> Self {
        self.on_press = Some(OnPress::Direct(message));
        self
    }

    /// Publishes the result of `on_press` when the [`MenuItem`] is activated.
    pub fn on_press_with(mut self, on_press: impl Fn() -> Message + 'a) -> Self {
        self.on_press = Some(OnPress::Closure(Box::new(on_press)));
        self
    }

    /// Sets the style of the [`MenuItem`].
    #[must_use]
    pub fn style(mut self, style: impl Fn(&Theme, Part, style::Status) -> Style + 'a) -> Self
    where
        Theme::Class<'a>: From<style::StyleFn<'a, Theme>>,
    {
        self.class = (Box::new(style) as style::StyleFn<'a, Theme>).into();
        self
    }

    /// Sets the style class of the [`MenuItem`].
    #[must_use]
    pub fn class(mut self, class: impl Into<Theme::Class<'a>>) -> Self {
        self.class = class.into();
        self
    }
}

#[derive(Default)]
struct State {
    is_pressed: bool,
    is_focused: bool,
    is_hovered: bool,
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
            log::trace!("Detaching menu item");
            references.detach();
        }
    }
}

impl<'a, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for MenuItem<'a, Message, Theme, Renderer>
where
    Message: Clone,
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
        let _ = context::expect();

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
            log::warn!("MenuItem: missing child layout in operate(), skipping");
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
            log::warn!("MenuItem: missing child layout in update(), skipping");
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

        let state = tree.state.downcast_mut::<State>();
        let bounds = layout.bounds();

        if shell.is_event_captured() {
            return;
        }

        let activate = match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerPressed { .. }) => {
                if cursor.is_over(bounds) {
                    state.is_pressed = true;
                    shell.capture_event();
                }

                false
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerLifted { .. }) => {
                let was_pressed = std::mem::take(&mut state.is_pressed);

                was_pressed && cursor.is_over(bounds)
            }
            Event::Touch(touch::Event::FingerLost { .. }) => {
                state.is_pressed = false;

                false
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let is_hovered = cursor.is_over(bounds);

                if state.is_hovered != is_hovered {
                    state.is_hovered = is_hovered;
                    shell.request_redraw();
                }

                false
            }
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(key::Named::Space | key::Named::Enter),
                ..
            }) => state.is_focused,
            _ => false,
        };

        if activate {
            // The row swallows the activation whatever the handler does.
            shell.capture_event();

            if let Some(on_press) = &self.on_press {
                shell.publish(on_press.get());
            }

            let _ = context::expect().dispatch(Trigger::ItemActivated);

            state.is_focused = false;
            shell.invalidate_layout();
            shell.request_redraw();
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
            log::warn!("MenuItem: missing child layout in draw(), skipping");
            return;
        };

        let state = tree.state.downcast_ref::<State>();
        let opacity = context::expect().opacity(Instant::now());

        let status = if state.is_pressed && cursor.is_over(bounds) {
            style::Status::Pressed
        } else if cursor.is_over(bounds) {
            style::Status::Hovered
        } else if state.is_focused {
            style::Status::Focused
        } else {
            style::Status::Active
        };

        let style = theme.style(&self.class, Part::Item, status).fade(opacity);

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

        if state.is_focused && opacity > 0.0 {
            FocusRing::default()
                .offset(-1.0)
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
        let state = tree.state.downcast_mut::<State>();

        if let Some(reference) = &self.reference {
            let bounds = layout.bounds() + translation;

            log::trace!("Attaching menu item at {bounds:?}");
            use_combined_ref(&mut state.references, [Some(reference.clone())]).attach(bounds);
        } else if let Some(references) = state.references.take() {
            references.detach();
        }

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

impl<'a, Message, Theme, Renderer> From<MenuItem<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Theme: Catalog + 'a,
    Renderer: crate::core::Renderer + 'a,
{
    fn from(item: MenuItem<'a, Message, Theme, Renderer>) -> Self {
        Self::new(item)
    }
}
