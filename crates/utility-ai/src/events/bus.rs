//! Latest-value event bus implementation.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Identity of a bus slot.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
enum KeyId {
    /// Keyed by the message type itself.
    Type(TypeId),
    /// Keyed by an explicit token, for several slots sharing one type.
    Named(&'static str),
}

/// Typed key of one logical message kind.
///
/// The value type is fixed by `T`, so reads never need to name it again and a
/// key cannot be used to publish the wrong type.
///
/// ```ignore
/// // One slot per type:
/// let world = EventKey::<WorldState>::of();
/// // Or an explicit token when a type backs several slots:
/// const TARGET: EventKey<Position> = EventKey::named("combat.target");
/// ```
pub struct EventKey<T> {
    id: KeyId,
    label: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> EventKey<T> {
    /// Key derived from the message type.
    pub fn of() -> Self {
        Self {
            id: KeyId::Type(TypeId::of::<T>()),
            label: std::any::type_name::<T>(),
            _marker: PhantomData,
        }
    }
}

impl<T> EventKey<T> {
    /// Key identified by `name`. Names must be unique per message kind.
    pub const fn named(name: &'static str) -> Self {
        Self {
            id: KeyId::Named(name),
            label: name,
            _marker: PhantomData,
        }
    }

    /// Human-readable label (type name or token).
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T> Clone for EventKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EventKey<T> {}

impl<T> PartialEq for EventKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EventKey<T> {}

impl<T> fmt::Debug for EventKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventKey").field(&self.label).finish()
    }
}

struct Entry {
    label: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// Run-scoped registry holding the latest published value per key.
///
/// No history is kept: publishing overwrites. The bus has no locking; the
/// orchestrator only hands out mutable access during the sensing phase, so
/// there is exactly one writer at a time.
#[derive(Default)]
pub struct EventBus {
    latest: HashMap<KeyId, Entry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `value` as the latest message for `key`, replacing any previous one.
    pub fn publish<T>(&mut self, key: &EventKey<T>, value: T)
    where
        T: Send + Sync + 'static,
    {
        tracing::trace!(target: "utility_ai::bus", key = key.label, "publish");
        self.latest.insert(
            key.id,
            Entry {
                label: key.label,
                value: Box::new(value),
            },
        );
    }

    /// Latest message for `key`, if one was published.
    pub fn try_get<T: 'static>(&self, key: &EventKey<T>) -> Option<&T> {
        self.latest.get(&key.id)?.value.downcast_ref::<T>()
    }

    /// Owned copy of the latest message for `key`, or `None` when absent.
    pub fn get_or_default<T: Clone + 'static>(&self, key: &EventKey<T>) -> Option<T> {
        self.try_get(key).cloned()
    }

    pub fn contains<T: 'static>(&self, key: &EventKey<T>) -> bool {
        self.try_get(key).is_some()
    }

    /// Remove and return the latest message for `key`.
    pub fn remove<T: 'static>(&mut self, key: &EventKey<T>) -> Option<T> {
        match self.latest.get(&key.id) {
            Some(entry) if entry.value.is::<T>() => {}
            _ => return None,
        }
        let entry = self.latest.remove(&key.id)?;
        entry.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Drop every slot. Called by the orchestrator at the start of each run.
    pub fn clear(&mut self) {
        self.latest.clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<_> = self.latest.values().map(|e| e.label).collect();
        labels.sort_unstable();
        f.debug_struct("EventBus").field("keys", &labels).finish()
    }
}
