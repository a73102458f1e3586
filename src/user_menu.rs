//! A ready-made account menu.
use crate::combined_ref::Ref;
use crate::core::widget::Id;
use crate::core::{Element, Length, Padding, Rectangle};
use crate::icon;
use crate::menu::style::{self, Catalog, Part, Style};
use crate::menu::{Click, Menu, MenuButton, MenuItem, MenuPanel};

use iced_widget::{Column, text};

/// The content of a trigger, distinguishing "not given" from "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Children<T> {
    /// Nothing was given; a default is used.
    #[default]
    Unset,
    /// Nothing should be shown.
    Empty,
    /// Exactly this should be shown.
    Content(T),
}

impl<T> Children<T> {
    /// Returns the content to show, falling back to `default` when unset.
    pub fn resolve(self, default: impl FnOnce() -> T) -> Option<T> {
        match self {
            Children::Unset => Some(default()),
            Children::Empty => None,
            Children::Content(content) => Some(content),
        }
    }
}

impl<T> From<Option<T>> for Children<T> {
    fn from(content: Option<T>) -> Self {
        content.map_or(Children::Empty, Children::Content)
    }
}

/// A [`Menu`] with a user icon as trigger and two fixed actions.
///
/// Activating "Settings" or "Sign out" only closes the menu.
pub struct UserMenu<'a, Message, Theme = crate::core::Theme, Renderer = iced_widget::Renderer>
where
    Theme: Catalog,
{
    content: Children<Element<'a, Message, Theme, Renderer>>,
    id: Option<Id>,
    padding: Option<Padding>,
    reference: Option<Ref<Rectangle>>,
    on_click: Option<Box<dyn Fn(&mut Click) -> Option<Message> + 'a>>,
    class: Theme::Class<'a>,
}

impl<'a, Message, Theme, Renderer> UserMenu<'a, Message, Theme, Renderer>
where
    Theme: Catalog,
{
    /// Creates a [`UserMenu`] showing the default user icon.
    pub fn new() -> Self {
        Self {
            content: Children::Unset,
            id: None,
            padding: None,
            reference: None,
            on_click: None,
            class: Theme::default(),
        }
    }

    /// Shows `content` inside of the trigger instead of the user icon.
    pub fn content(mut self, content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        self.content = Children::Content(content.into());
        self
    }

    /// Sets the [`Children`] of the trigger.
    pub fn children(mut self, children: Children<Element<'a, Message, Theme, Renderer>>) -> Self {
        self.content = children;
        self
    }

    /// Shows nothing inside of the trigger.
    pub fn no_content(self) -> Self {
        self.children(Children::Empty)
    }

    /// Sets the [`Id`] of the trigger.
    pub fn id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the [`Padding`] of the trigger.
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    /// Registers the bounds of the trigger with a [`Ref`].
    pub fn reference(mut self, reference: impl Into<Ref<Rectangle>>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Publishes `message` whenever the trigger is clicked.
    pub fn on_press(self, message: Message) -> Self
    where
        Message: Clone + 'a,
    {
        self.on_click(move |_click| Some(message.clone()))
    }

    /// Runs `on_click` before toggling the menu.
    pub fn on_click(mut self, on_click: impl Fn(&mut Click) -> Option<Message> + 'a) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Sets the style of the trigger.
    #[must_use]
    pub fn style(mut self, style: impl Fn(&Theme, Part, style::Status) -> Style + 'a) -> Self
    where
        Theme::Class<'a>: From<style::StyleFn<'a, Theme>>,
    {
        self.class = (Box::new(style) as style::StyleFn<'a, Theme>).into();
        self
    }

    /// Sets the style class of the trigger.
    #[must_use]
    pub fn class(mut self, class: impl Into<Theme::Class<'a>>) -> Self {
        self.class = class.into();
        self
    }
}

impl<Message, Theme, Renderer> Default for UserMenu<'_, Message, Theme, Renderer>
where
    Theme: Catalog,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, Message, Theme, Renderer> From<UserMenu<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Theme: Catalog + text::Catalog + 'a,
    Renderer: crate::core::text::Renderer + 'a,
{
    fn from(user_menu: UserMenu<'a, Message, Theme, Renderer>) -> Self {
        let UserMenu {
            content,
            id,
            padding,
            reference,
            on_click,
            class,
        } = user_menu;

        let content = content
            .resolve(|| icon::user().into())
            .unwrap_or_else(|| Column::new().into());

        let mut button = MenuButton::new(content).class(class);

        if let Some(id) = id {
            button = button.id(id);
        }

        if let Some(padding) = padding {
            button = button.padding(padding);
        }

        if let Some(reference) = reference {
            button = button.reference(reference);
        }

        if let Some(on_click) = on_click {
            button = button.on_click(on_click);
        }

        let panel: MenuPanel<'a, Message, Theme, Renderer> = MenuPanel::new(
            Column::new()
                .spacing(2.0)
                .width(Length::Fill)
                .push(MenuItem::new(text("Settings")))
                .push(MenuItem::new(text("Sign out"))),
        );

        Menu::<'a, Message, Theme, Renderer>::new()
            .push(button)
            .push(panel)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::widget::Tree;
    use crate::core::{Size, Theme, layout};

    fn trigger_size(user_menu: UserMenu<'_, (), Theme, ()>) -> Size {
        let mut element = Element::from(user_menu);
        let mut tree = Tree::new(&element);
        let limits = layout::Limits::new(Size::ZERO, Size::new(400.0, 300.0));

        let node = element.as_widget_mut().layout(&mut tree, &(), &limits);

        node.children()[0].size()
    }

    #[test]
    fn the_default_trigger_shows_the_user_icon() {
        assert_eq!(trigger_size(UserMenu::new()), Size::new(32.0, 32.0));
    }

    #[test]
    fn an_empty_trigger_only_keeps_its_padding() {
        assert_eq!(
            trigger_size(UserMenu::new().no_content()),
            Size::new(8.0, 8.0)
        );
        assert_eq!(
            trigger_size(UserMenu::new().no_content().padding(0.0)),
            Size::ZERO
        );
    }

    #[test]
    fn unset_children_fall_back_to_the_default() {
        assert_eq!(Children::Unset.resolve(|| "icon"), Some("icon"));
    }

    #[test]
    fn empty_children_render_nothing() {
        assert_eq!(Children::Empty.resolve(|| "icon"), None);
        assert_eq!(Children::from(None::<&str>).resolve(|| "icon"), None);
    }

    #[test]
    fn given_children_render_exactly() {
        assert_eq!(
            Children::Content("Account").resolve(|| "icon"),
            Some("Account")
        );
        assert_eq!(Children::from(Some("Account")), Children::Content("Account"));
    }

    #[test]
    fn children_are_unset_by_default() {
        assert_eq!(Children::<&str>::default(), Children::Unset);
    }
}
