use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Listener<E, Err> = Arc<dyn Fn(&E) -> Result<(), Err> + Send + Sync>;

struct Entry<E, Err> {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener<E, Err>,
}

struct Registry<E, Err> {
    next_id: u64,
    entries: Vec<Entry<E, Err>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Synchronous publish/subscribe channel.
///
/// Listeners run on the publishing thread, in subscription order, with no
/// lock held, so a listener may publish, subscribe or unsubscribe on any bus
/// (including this one). Dispatch stops at the first listener error, which is
/// returned to the publisher.
pub struct EventBus<E, Err = Infallible> {
    registry: Arc<Mutex<Registry<E, Err>>>,
}

impl<E: 'static, Err: 'static> EventBus<E, Err> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) -> Result<(), Err> + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));

        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Entry {
                id,
                active: Arc::clone(&active),
                listener: Arc::new(listener),
            });
            id
        };

        let registry = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            active.store(false, Ordering::SeqCst);
            if let Some(registry) = registry.upgrade() {
                lock(&registry).entries.retain(|entry| entry.id != id);
            }
        })
    }

    /// Delivers `event` to every live listener and returns how many ran.
    pub fn publish(&self, event: &E) -> Result<usize, Err> {
        let snapshot: Vec<(Arc<AtomicBool>, Listener<E, Err>)> = lock(&self.registry)
            .entries
            .iter()
            .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.listener)))
            .collect();

        let mut delivered = 0;
        for (active, listener) in snapshot {
            // A listener released earlier in this dispatch must not run.
            if !active.load(Ordering::SeqCst) {
                continue;
            }
            listener(event)?;
            delivered += 1;
        }

        Ok(delivered)
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).entries.len()
    }
}

impl<E: 'static> EventBus<E, Infallible> {
    pub fn on<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            listener(event);
            Ok(())
        })
    }

    pub fn emit(&self, event: &E) -> usize {
        match self.publish(event) {
            Ok(delivered) => delivered,
            Err(never) => match never {},
        }
    }
}

impl<E: 'static, Err: 'static> Default for EventBus<E, Err> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, Err> Clone for EventBus<E, Err> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E, Err> fmt::Debug for EventBus<E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &lock(&self.registry).entries.len())
            .finish()
    }
}

/// Handle to one listener registration.
///
/// Released once, either by [`Subscription::unsubscribe`] or on drop. Further
/// releases do nothing, and releasing after the bus is gone is harmless.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
