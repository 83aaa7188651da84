// ============================================================================
// REACTIVITY - Observable value with subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Shared value that pushes a snapshot to every subscriber after each change
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Subscriber<T>>>>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutate in place; subscribers are only told when `updater` returns true
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T) -> bool,
    {
        let changed = updater(&mut *self.value.borrow_mut());
        if changed {
            self.notify();
        }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn clear_subscribers(&self) {
        self.subscribers.borrow_mut().clear();
    }

    // Snapshot and subscriber list are cloned first so a subscriber may read
    // or update the state again without a RefCell conflict.
    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<_> = self.subscribers.borrow().iter().cloned().collect();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn notifies_only_on_change() {
        let state = ReactiveState::new(0u32);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        state.subscribe(move |_| seen.set(seen.get() + 1));

        state.set(1);
        state.update(|v| {
            *v += 1;
            true
        });
        state.update(|_| false);

        assert_eq!(state.get(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn subscriber_can_reenter() {
        let state = ReactiveState::new(0u32);
        let inner = state.clone();
        state.subscribe(move |value| {
            if *value == 1 {
                inner.set(2);
            }
        });

        state.set(1);
        assert_eq!(state.get(), 2);
    }
}
