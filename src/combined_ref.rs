//! Register one widget with many independent observers.
//!
//! A menu needs the bounds of its trigger in three places at once: the
//! floating engine uses them as an anchor, the panel excludes them from
//! outside-click dismissal, and the application may want them as well.
//! A [`CombinedRef`] fans a single attach/detach signal out to all of them.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A mutable cell holding the node a widget is currently attached as.
pub struct NodeRef<T>(Rc<RefCell<Option<T>>>);

impl<T> NodeRef<T> {
    /// Creates an empty [`NodeRef`].
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Returns the current node, if attached.
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    /// Replaces the current node.
    pub fn set(&self, node: Option<T>) {
        let _ = self.0.replace(node);
    }

    /// Returns whether a node is currently attached.
    pub fn is_attached(&self) -> bool {
        self.0.borrow().is_some()
    }
}

impl<T> Default for NodeRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.0.borrow()).finish()
    }
}

/// A callback notified with `Some(node)` on attach and `None` on detach.
pub struct Callback<T>(Rc<dyn Fn(Option<T>)>);

impl<T> Callback<T> {
    /// Creates a new [`Callback`].
    pub fn new(f: impl Fn(Option<T>) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the callback.
    pub fn call(&self, node: Option<T>) {
        (self.0)(node);
    }

    /// Returns whether both callbacks are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A reference target: either a [`Callback`] or a [`NodeRef`].
#[derive(Debug)]
pub enum Ref<T> {
    /// Notify a callback.
    Callback(Callback<T>),
    /// Store the node in a cell.
    Cell(NodeRef<T>),
}

impl<T> Ref<T> {
    /// Forwards `node` to the target.
    pub fn apply(&self, node: Option<T>) {
        match self {
            Ref::Callback(callback) => callback.call(node),
            Ref::Cell(cell) => cell.set(node),
        }
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        match self {
            Ref::Callback(callback) => Ref::Callback(callback.clone()),
            Ref::Cell(cell) => Ref::Cell(cell.clone()),
        }
    }
}

impl<T> From<NodeRef<T>> for Ref<T> {
    fn from(cell: NodeRef<T>) -> Self {
        Ref::Cell(cell)
    }
}

impl<T> From<&NodeRef<T>> for Ref<T> {
    fn from(cell: &NodeRef<T>) -> Self {
        Ref::Cell(cell.clone())
    }
}

impl<T> From<Callback<T>> for Ref<T> {
    fn from(callback: Callback<T>) -> Self {
        Ref::Callback(callback)
    }
}

/// A single stable [`Callback`] forwarding to a changing set of targets.
///
/// The target set lives in a side slot that [`CombinedRef::sync`] replaces,
/// so the identity of [`CombinedRef::callback`] never changes for the
/// lifetime of the [`CombinedRef`].
pub struct CombinedRef<T> {
    targets: Rc<RefCell<Vec<Ref<T>>>>,
    callback: Callback<T>,
}

impl<T> CombinedRef<T>
where
    T: Clone + 'static,
{
    /// Creates a [`CombinedRef`] forwarding to the given targets.
    ///
    /// Absent targets are skipped.
    pub fn new(targets: impl IntoIterator<Item = Option<Ref<T>>>) -> Self {
        let targets = Rc::new(RefCell::new(targets.into_iter().flatten().collect::<Vec<_>>()));

        let callback = Callback::new({
            let targets = Rc::clone(&targets);

            move |node: Option<T>| {
                // A target may sync this ref again while being notified.
                let snapshot: Vec<Ref<T>> = targets.borrow().clone();

                for target in &snapshot {
                    target.apply(node.clone());
                }
            }
        });

        Self { targets, callback }
    }

    /// Replaces the cached targets.
    ///
    /// Must run before the [`Callback`] can be invoked again in the same pass.
    pub fn sync(&self, targets: impl IntoIterator<Item = Option<Ref<T>>>) {
        let _ = self
            .targets
            .replace(targets.into_iter().flatten().collect());
    }

    /// Returns the stable [`Callback`].
    pub fn callback(&self) -> &Callback<T> {
        &self.callback
    }

    /// Returns the amount of cached targets.
    pub fn len(&self) -> usize {
        self.targets.borrow().len()
    }

    /// Returns whether there are no cached targets.
    pub fn is_empty(&self) -> bool {
        self.targets.borrow().is_empty()
    }

    /// Notifies every target that the widget is attached as `node`.
    pub fn attach(&self, node: T) {
        self.callback.call(Some(node));
    }

    /// Notifies every target that the widget went away.
    pub fn detach(&self) {
        self.callback.call(None);
    }
}

impl<T> fmt::Debug for CombinedRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedRef")
            .field("targets", &self.targets.borrow().len())
            .field("callback", &self.callback)
            .finish()
    }
}

/// Returns the stable [`Callback`] kept in `slot`, creating it on first use
/// and syncing its targets on every later call.
pub fn use_combined_ref<T>(
    slot: &mut Option<CombinedRef<T>>,
    targets: impl IntoIterator<Item = Option<Ref<T>>>,
) -> &CombinedRef<T>
where
    T: Clone + 'static,
{
    match slot {
        Some(combined) => {
            combined.sync(targets);
            combined
        }
        None => slot.insert(CombinedRef::new(targets)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    #[test]
    fn forwards_to_every_target_and_skips_absent_ones() {
        let first = NodeRef::new();
        let second = NodeRef::new();

        let combined = CombinedRef::new([Some(Ref::from(&first)), None, Some(Ref::from(&second))]);
        assert_eq!(combined.len(), 2);

        combined.attach(42);
        assert_eq!(first.get(), Some(42));
        assert_eq!(second.get(), Some(42));

        combined.detach();
        assert!(!first.is_attached());
        assert!(!second.is_attached());
    }

    #[test]
    fn mixes_callbacks_and_cells() {
        let calls = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(None));
        let cell = NodeRef::new();

        let callback = Callback::new({
            let calls = Rc::clone(&calls);
            let last = Rc::clone(&last);

            move |node: Option<u32>| {
                calls.set(calls.get() + 1);
                last.set(node);
            }
        });

        let combined = CombinedRef::new([Some(callback.into()), Some(cell.clone().into())]);

        combined.attach(7);
        assert_eq!(calls.get(), 1);
        assert_eq!(last.get(), Some(7));
        assert_eq!(cell.get(), Some(7));

        combined.detach();
        assert_eq!(calls.get(), 2);
        assert_eq!(last.get(), None);
    }

    #[test]
    fn callback_identity_survives_target_changes() {
        let first = NodeRef::new();
        let second = NodeRef::new();

        let mut slot = None;
        let initial = use_combined_ref(&mut slot, [Some(Ref::from(&first))])
            .callback()
            .clone();

        let synced = use_combined_ref(&mut slot, [Some(Ref::from(&second))])
            .callback()
            .clone();

        assert!(initial.ptr_eq(&synced));

        initial.call(Some(3));
        assert_eq!(first.get(), None);
        assert_eq!(second.get(), Some(3));
    }

    #[test]
    fn fresh_refs_have_distinct_identities() {
        let a: CombinedRef<u8> = CombinedRef::new([]);
        let b: CombinedRef<u8> = CombinedRef::new([]);

        assert!(a.is_empty());
        assert!(!a.callback().ptr_eq(b.callback()));
    }

    #[test]
    fn targets_can_resync_while_notified() {
        let cell = NodeRef::new();
        let combined = Rc::new(RefCell::new(None::<CombinedRef<u8>>));

        let resync = Callback::new({
            let combined = Rc::clone(&combined);
            let cell = cell.clone();

            move |_node: Option<u8>| {
                if let Some(combined) = combined.borrow().as_ref() {
                    combined.sync([Some(Ref::from(&cell))]);
                }
            }
        });

        let _ = combined
            .borrow_mut()
            .insert(CombinedRef::new([Some(resync.into())]));

        let callback = combined
            .borrow()
            .as_ref()
            .map(|combined| combined.callback().clone());

        if let Some(callback) = callback {
            callback.call(Some(1));
            callback.call(Some(2));
        }

        assert_eq!(cell.get(), Some(2));
    }
}
