//! Color maps selected by the user.
//!
//! The registry only lives in memory.  Saving it between sessions is
//! up to the host application, which can serialize it (it is written
//! as a JSON array of `catalog/name` strings) or rebuild it with
//! [`FavoritesRegistry::from_keys`].

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ColorMapKey;

/// A change of the favorites, passed to the observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoriteChange {
    Added(ColorMapKey),
    Removed(ColorMapKey),
}

/// Handle returned by [`FavoritesRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&FavoriteChange)>;

/// Ordered set of favorite color maps.
///
/// Keys are kept in insertion order.  Adding a present key or
/// removing an absent one does nothing, and notifies nobody.
#[derive(Default)]
pub struct FavoritesRegistry {
    keys: Vec<ColorMapKey>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl FavoritesRegistry {
    pub fn new() -> Self { Self::default() }

    /// A registry holding `keys`, duplicates removed.
    pub fn from_keys(keys: impl IntoIterator<Item = ColorMapKey>) -> Self {
        let mut reg = Self::new();
        for k in keys { reg.add(k); }
        reg
    }

    /// Add `key` at the end.  Returns `false` if it was already
    /// present.
    pub fn add(&mut self, key: ColorMapKey) -> bool {
        if self.contains(&key) { return false }
        self.keys.push(key.clone());
        self.notify(&FavoriteChange::Added(key));
        true
    }

    /// Remove `key`.  Returns `false` if it was absent.
    pub fn remove(&mut self, key: &ColorMapKey) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(i) => {
                let key = self.keys.remove(i);
                self.notify(&FavoriteChange::Removed(key));
                true
            }
            None => false,
        }
    }

    /// Add `key` if absent, remove it otherwise.  Returns whether
    /// `key` is a favorite afterwards.
    pub fn toggle(&mut self, key: &ColorMapKey) -> bool {
        if self.remove(key) { false } else { self.add(key.clone()) }
    }

    /// Remove all favorites, notifying a removal for each.
    pub fn clear(&mut self) {
        for key in std::mem::take(&mut self.keys) {
            self.notify(&FavoriteChange::Removed(key));
        }
    }

    pub fn contains(&self, key: &ColorMapKey) -> bool {
        self.keys.contains(key)
    }

    /// The favorites, in insertion order.
    pub fn list(&self) -> &[ColorMapKey] { &self.keys }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Call `f` after every change, until
    /// [`unsubscribe`][FavoritesRegistry::unsubscribe].
    pub fn subscribe(&mut self, f: impl FnMut(&FavoriteChange) + 'static)
                     -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(f)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let n = self.observers.len();
        self.observers.retain(|(i, _)| *i != id);
        self.observers.len() != n
    }

    fn notify(&mut self, change: &FavoriteChange) {
        tracing::debug!("favorites: {change:?}");
        for (_, f) in &mut self.observers {
            f(change)
        }
    }
}

impl fmt::Debug for FavoritesRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesRegistry")
            .field("keys", &self.keys)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Serialize for FavoritesRegistry {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.keys.serialize(s)
    }
}

impl<'de> Deserialize<'de> for FavoritesRegistry {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Vec::<ColorMapKey>::deserialize(d).map(FavoritesRegistry::from_keys)
    }
}
