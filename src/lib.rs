//! A dropdown user menu for iced.
//!
//! The crate provides a small set of composable widgets:
//!
//! - [`Menu`] owns the open/closed state of one menu and shares it with
//!   every widget inside of it.
//! - [`MenuButton`] toggles the menu.
//! - [`MenuPanel`] floats next to the button, on top of everything else,
//!   and traps keyboard focus while the menu is open.
//! - [`MenuItem`] is an action row that closes the menu when activated.
//!
//! [`UserMenu`] puts them together with a user icon and two fixed actions.
//!
//! # Example
//! ```no_run
//! # pub type Element<'a, Message> = iced_widget::core::Element<'a, Message, iced_widget::Theme, iced_widget::Renderer>;
//! use icy_ui_user_menu::{menu, menu_button, menu_item, menu_panel, user_menu};
//! use iced_widget::{column, row, text};
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Export,
//! }
//!
//! fn view<'a>() -> Element<'a, Message> {
//!     row![
//!         menu([
//!             menu_button(text("File")).into(),
//!             menu_panel(column![
//!                 menu_item(text("Export")).on_press(Message::Export),
//!             ])
//!             .into(),
//!         ]),
//!         user_menu(),
//!     ]
//!     .into()
//! }
//! ```
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/iced-rs/iced/9ab6923e943f784985e9ef9ca28b10278297225d/docs/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use iced_widget::core;

pub mod combined_ref;
pub mod floating;
pub mod focus;
pub mod icon;
pub mod menu;
pub mod user_menu;

mod error;

pub use combined_ref::{CombinedRef, NodeRef, Ref};
pub use error::Error;
pub use floating::{Floating, Placement};
pub use menu::{Menu, MenuButton, MenuItem, MenuPanel, Store};
pub use user_menu::{Children, UserMenu};

use iced_widget::core::Element;
use iced_widget::text;

/// Creates a new [`Menu`] with the given children.
pub fn menu<'a, Message, Theme, Renderer>(
    children: impl IntoIterator<Item = Element<'a, Message, Theme, Renderer>>,
) -> Menu<'a, Message, Theme, Renderer>
where
    Renderer: core::Renderer,
{
    Menu::with_children(children)
}

/// Creates a new [`MenuButton`] with the given content.
pub fn menu_button<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
) -> MenuButton<'a, Message, Theme, Renderer>
where
    Theme: menu::Catalog,
    Renderer: core::Renderer,
{
    MenuButton::new(content)
}

/// Creates a new [`MenuPanel`] with the given content.
pub fn menu_panel<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
) -> MenuPanel<'a, Message, Theme, Renderer>
where
    Theme: menu::Catalog,
    Renderer: core::Renderer,
{
    MenuPanel::new(content)
}

/// Creates a new [`MenuItem`] with the given content.
pub fn menu_item<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
) -> MenuItem<'a, Message, Theme, Renderer>
where
    Theme: menu::Catalog,
    Renderer: core::Renderer,
{
    MenuItem::new(content)
}

/// Creates a new [`UserMenu`] showing the default user icon.
pub fn user_menu<'a, Message, Theme, Renderer>() -> Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Theme: menu::Catalog + text::Catalog + 'a,
    Renderer: core::text::Renderer + 'a,
{
    UserMenu::new().into()
}
