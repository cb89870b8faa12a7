//! # Change Notification
//!
//! After mount and after every mutating call the session hands its observer a
//! snapshot: a deep copy of the whole tree, owned by the receiver. Nothing in
//! a snapshot aliases the live tree, so observers may keep and compare them
//! freely while editing continues.
//!
//! Delivery is synchronous and in order, one snapshot per call. There is at
//! most one observer; registering another replaces it.

use crate::model::Group;

/// Receives query snapshots.
///
/// Implemented for any `FnMut(Group)`, so a closure is usually enough:
///
/// ```
/// use qbuild::model::Group;
/// use qbuild::notify::Notifier;
///
/// let mut notifier = Notifier::new();
/// notifier.set_observer(|query: Group| println!("{} children", query.rules.len()));
/// ```
pub trait QueryObserver {
    fn on_query_change(&mut self, query: Group);
}

impl<F> QueryObserver for F
where
    F: FnMut(Group),
{
    fn on_query_change(&mut self, query: Group) {
        self(query)
    }
}

#[derive(Default)]
pub struct Notifier {
    observer: Option<Box<dyn QueryObserver>>,
    delivered: usize,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_observer<O: QueryObserver + 'static>(&mut self, observer: O) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Snapshots delivered so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Clone `root` and hand the copy to the observer, if any.
    pub fn notify(&mut self, root: &Group) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        self.delivered += 1;
        tracing::debug!(root = %root.id, seq = self.delivered, "delivering query snapshot");
        observer.on_query_change(root.clone());
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("has_observer", &self.has_observer())
            .field("delivered", &self.delivered)
            .finish()
    }
}
