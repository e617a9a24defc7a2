//! Change listeners.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Listeners called with the new state after every committed change.
pub struct Subscribers<T> {
    next: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            next: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }

    /// Call every listener in subscription order.
    pub fn emit(&self, state: &T) {
        for (_, listener) in &self.listeners {
            listener(state);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
