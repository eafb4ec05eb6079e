//! Observable values and commands for view-models.
//!
//! An [`Observable`] holds a current value plus a subscriber list behind a
//! shared handle, so a view-model field and the closures bound to it all see
//! the same state. Notification only fires when the value actually changes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifies one subscription for later removal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = (SubscriptionId, Rc<dyn Fn(&T)>);

struct ObservableInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_id: Cell<u64>,
}

/// Single-threaded observable property.
///
/// Clones share the same value and subscriber list.
pub struct Observable<T> {
    inner: Rc<ObservableInner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Observable {
            inner: Rc::new(ObservableInner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Stores `value` and notifies subscribers, but only when the value
    /// actually changed. Setting the current value again is a no-op.
    pub fn set(&self, value: T) {
        let changed = {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                false
            } else {
                *current = value.clone();
                true
            }
        };
        if changed {
            self.notify(&value);
        }
    }

    /// Registers a change callback. The callback is not invoked with the
    /// current value; bindings apply the initial state themselves.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));
        id
    }

    /// Removes a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .subscribers
            .borrow_mut()
            .retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self, value: &T) {
        // Snapshot first so a callback may subscribe or unsubscribe without
        // invalidating the iteration.
        let snapshot: Vec<Rc<dyn Fn(&T)>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();
        for f in snapshot {
            f(value);
        }
    }
}

/// Invocable view-model action.
#[derive(Clone)]
pub struct Command {
    action: Rc<dyn Fn()>,
}

impl Command {
    pub fn new(action: impl Fn() + 'static) -> Self {
        Command {
            action: Rc::new(action),
        }
    }

    pub fn execute(&self) {
        (self.action)();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Command, Observable};

    #[test]
    fn set_notifies_only_on_change() {
        let obs = Observable::new(false);
        let hits = Rc::new(RefCell::new(0u32));

        let h = Rc::clone(&hits);
        obs.subscribe(move |_| *h.borrow_mut() += 1);

        obs.set(false);
        assert_eq!(*hits.borrow(), 0);
        obs.set(true);
        obs.set(true);
        assert_eq!(*hits.borrow(), 1);
        obs.set(false);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(1u32);
        let b = a.clone();
        b.set(5);
        assert_eq!(a.get(), 5);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let obs = Observable::new(0u32);
        let hits = Rc::new(RefCell::new(0u32));

        let h = Rc::clone(&hits);
        let id = obs.subscribe(move |_| *h.borrow_mut() += 1);
        obs.set(1);
        obs.unsubscribe(id);
        obs.set(2);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(obs.subscriber_count(), 0);

        // Removing twice is harmless.
        obs.unsubscribe(id);
    }

    #[test]
    fn subscriber_may_unsubscribe_itself_during_notify() {
        let obs = Observable::new(0u32);
        let slot = Rc::new(RefCell::new(None));
        let hits = Rc::new(RefCell::new(0u32));

        let o = obs.clone();
        let s = Rc::clone(&slot);
        let h = Rc::clone(&hits);
        let id = obs.subscribe(move |_| {
            *h.borrow_mut() += 1;
            if let Some(id) = s.borrow_mut().take() {
                o.unsubscribe(id);
            }
        });
        *slot.borrow_mut() = Some(id);

        obs.set(1);
        obs.set(2);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn command_runs_action() {
        let hits = Rc::new(RefCell::new(0u32));
        let h = Rc::clone(&hits);
        let command = Command::new(move || *h.borrow_mut() += 1);
        command.execute();
        command.clone().execute();
        assert_eq!(*hits.borrow(), 2);
    }
}
