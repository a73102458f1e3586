//! A top bar with a file menu and a user menu.
//!
//! Run with `RUST_LOG=icy_ui_user_menu=debug` to see the menus open and close.
use iced::widget::{column, container, row, text};
use iced::{Center, Element, Fill};
use icy_ui_user_menu::{
    Placement, UserMenu, menu, menu_button, menu_item, menu_panel, user_menu,
};

use tracing_subscriber::EnvFilter;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    iced::application(App::default, App::update, App::view).run()
}

#[derive(Default)]
struct App {
    last_action: Option<Action>,
    file_menu_open: bool,
    clicks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    New,
    Open,
    Export,
}

#[derive(Debug, Clone)]
enum Message {
    Action(Action),
    FileMenuToggled(bool),
    AccountClicked,
}

impl App {
    fn update(&mut self, message: Message) {
        match message {
            Message::Action(action) => self.last_action = Some(action),
            Message::FileMenuToggled(open) => self.file_menu_open = open,
            Message::AccountClicked => self.clicks += 1,
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let file = menu([
            menu_button(text("File")).into(),
            menu_panel(column![
                menu_item(text("New")).on_press(Message::Action(Action::New)),
                menu_item(text("Open")).on_press(Message::Action(Action::Open)),
                menu_item(text("Export")).on_press(Message::Action(Action::Export)),
            ])
            .width(180.0)
            .into(),
        ])
        .placement(Placement::BottomStart)
        .on_toggle(Message::FileMenuToggled);

        let account = UserMenu::new()
            .content(text("Account"))
            .on_press(Message::AccountClicked);

        let top_bar = row![container(file).width(Fill), account, user_menu()]
            .spacing(8)
            .padding(8)
            .align_y(Center);

        let status = column![
            text(match self.last_action {
                Some(action) => format!("Last action: {action:?}"),
                None => String::from("No action yet"),
            }),
            text(format!(
                "File menu is {}",
                if self.file_menu_open { "open" } else { "closed" }
            )),
            text(format!("Account clicked {} times", self.clicks)),
        ]
        .spacing(4);

        column![
            top_bar,
            container(status).center_x(Fill).center_y(Fill),
        ]
        .into()
    }
}
