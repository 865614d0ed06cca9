//! Replay-latest observable values
//!
//! An [`Observable`] stores the most recent value and a list of subscribers.
//! Subscribing delivers the stored value immediately (if there is one), then
//! every later [`Observable::set`]. Notification is synchronous, in
//! subscription order. Single-threaded by construction (`Rc`/`RefCell`).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Handle returned by [`Observable::subscribe`], used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub struct Observable<T> {
    latest: RefCell<Option<T>>,
    subscribers: RefCell<Vec<(Subscription, Callback<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone> Default for Observable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("latest", &self.latest.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone> Observable<T> {
    /// No value yet; subscribers receive nothing until the first `set`.
    pub fn empty() -> Self {
        Self {
            latest: RefCell::new(None),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn new(initial: T) -> Self {
        let observable = Self::empty();
        *observable.latest.borrow_mut() = Some(initial);
        observable
    }

    /// Register `callback`; it is called right away with the latest value, if any.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let callback: Callback<T> = Rc::new(callback);
        self.subscribers.borrow_mut().push((id, Rc::clone(&callback)));

        let latest = self.latest.borrow().clone();
        if let Some(value) = latest {
            callback(&value);
        }
        id
    }

    /// Detach a subscriber. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription);
        subscribers.len() != before
    }

    /// Store `value` and notify every current subscriber.
    pub fn set(&self, value: T) {
        *self.latest.borrow_mut() = Some(value.clone());

        // snapshot so callbacks may subscribe or unsubscribe
        let subscribers: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in subscribers {
            callback(&value);
        }
    }

    /// Drop the stored value without notifying anyone.
    ///
    /// Current subscribers keep whatever they last saw; new subscribers get
    /// nothing until the next `set`.
    pub fn withdraw(&self) {
        self.latest.borrow_mut().take();
    }

    pub fn latest(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
