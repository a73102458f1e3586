//! Scoped lookup of the innermost [`Store`].
//!
//! A [`Menu`](super::Menu) provides its [`Store`] while it runs the layout,
//! update, draw and overlay passes of its children. Panels keep providing it
//! from their overlay, which outlives the pass that created it.
use super::Store;
use crate::Error;

use std::cell::RefCell;

thread_local! {
    static STORES: RefCell<Vec<Store>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` with `store` as the innermost menu.
pub fn provide<R>(store: &Store, f: impl FnOnce() -> R) -> R {
    struct Scope;

    impl Drop for Scope {
        fn drop(&mut self) {
            STORES.with(|stores| {
                let _ = stores.borrow_mut().pop();
            });
        }
    }

    STORES.with(|stores| stores.borrow_mut().push(store.clone()));

    let _scope = Scope;

    f()
}

/// Returns the [`Store`] of the innermost menu.
pub fn current() -> Result<Store, Error> {
    STORES
        .with(|stores| stores.borrow().last().cloned())
        .ok_or(Error::ContextMissing)
}

/// Returns the [`Store`] of the innermost menu.
///
/// # Panics
/// Panics when called outside of a [`Menu`](super::Menu).
pub(crate) fn expect() -> Store {
    match current() {
        Ok(store) => store,
        Err(error) => panic!("{error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_outside_a_menu_fails() {
        assert_eq!(current().unwrap_err(), Error::ContextMissing);
    }

    #[test]
    fn provided_stores_nest() {
        let outer = Store::default();
        let inner = Store::default();

        provide(&outer, || {
            assert!(current().unwrap().ptr_eq(&outer));

            provide(&inner, || {
                assert!(current().unwrap().ptr_eq(&inner));
            });

            assert!(current().unwrap().ptr_eq(&outer));
        });

        assert!(current().is_err());
    }

    #[test]
    fn scope_is_restored_after_a_panic() {
        let store = Store::default();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            provide(&store, || panic!("boom"));
        }));

        assert!(result.is_err());
        assert!(current().is_err());
    }

    #[test]
    #[should_panic(expected = "must be used within a Menu provider")]
    fn expect_panics_with_the_error_message() {
        let _ = expect();
    }
}
