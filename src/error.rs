/// An error produced while composing a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A menu widget looked up its [`Store`](crate::Store) outside of any
    /// [`Menu`](crate::Menu).
    #[error("menu components must be used within a Menu provider")]
    ContextMissing,
}
