use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    resize: BTreeSet<u64>,
}

/// Host-level notifications a preview session can listen to.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct HostEvents {
    registry: Rc<RefCell<Registry>>,
}

impl HostEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_resize(&self) -> ResizeSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.resize.insert(id);

        ResizeSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn resize_listener_count(&self) -> usize {
        self.registry.borrow().resize.len()
    }

    pub fn is_subscribed(&self, subscription: &ResizeSubscription) -> bool {
        self.registry.borrow().resize.contains(&subscription.id)
    }
}

/// Registration of one resize listener.
///
/// Unregisters on `cancel` or when dropped.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl ResizeSubscription {
    /// Unregisters now
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().resize.contains(&self.id))
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().resize.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_and_cancel() {
        let host = HostEvents::new();
        let first = host.subscribe_resize();
        let second = host.subscribe_resize();
        assert_eq!(host.resize_listener_count(), 2);
        assert!(host.is_subscribed(&first));

        first.cancel();
        assert_eq!(host.resize_listener_count(), 1);
        assert!(second.is_active());
    }

    #[test]
    fn drop_unregisters() {
        let host = HostEvents::new();
        {
            let _subscription = host.subscribe_resize();
            assert_eq!(host.resize_listener_count(), 1);
        }
        assert_eq!(host.resize_listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_host_is_inactive() {
        let host = HostEvents::new();
        let subscription = host.subscribe_resize();
        drop(host);
        assert!(!subscription.is_active());
    }
}
