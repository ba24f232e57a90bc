use alloc::string::String;
use alloc::sync::Arc;

use crate::{CarouselMaps, ItemFrame, ItemKey};

/// An input item: identity key, opaque payload and optional descriptor label.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T, K = ItemKey> {
    pub key: K,
    pub payload: T,
    pub descriptor: Option<String>,
}

impl<T, K> Entry<T, K> {
    pub fn new(key: K, payload: T) -> Self {
        Self {
            key,
            payload,
            descriptor: None,
        }
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }
}

/// One carousel slot.
///
/// `current_index` is the last settled slot (relative to the front item); `shown_index` is
/// where the item is rendered right now and may run past `[0, count)` while wrapping. Every
/// write to `shown_index` re-evaluates the item's [`ItemFrame`] through the shared maps.
#[derive(Clone, Debug)]
pub struct Item<T, K = ItemKey> {
    key: K,
    payload: T,
    descriptor: Option<String>,
    index: usize,
    current_index: usize,
    shown_index: f64,
    frame: ItemFrame,
    maps: Arc<CarouselMaps>,
}

impl<T, K> Item<T, K> {
    /// Creates an item contracted onto the front slot.
    pub(crate) fn new(entry: Entry<T, K>, index: usize, maps: Arc<CarouselMaps>) -> Self {
        let frame = maps.frame_at(0.0);
        Self {
            key: entry.key,
            payload: entry.payload,
            descriptor: entry.descriptor,
            index,
            current_index: 0,
            shown_index: 0.0,
            frame,
            maps,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }

    /// Position in the input ordering.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn shown_index(&self) -> f64 {
        self.shown_index
    }

    pub fn frame(&self) -> ItemFrame {
        self.frame
    }

    pub fn is_settled(&self) -> bool {
        self.shown_index == self.current_index as f64
    }

    /// Moves the rendered position and recomputes location, scale and opacity.
    pub fn set_shown_index(&mut self, shown_index: f64) {
        self.shown_index = shown_index;
        self.frame = self.maps.frame_at(shown_index);
    }

    /// Settles the item on `current_index`; the shown index follows.
    pub fn set_current_index(&mut self, current_index: usize) {
        self.current_index = current_index;
        self.set_shown_index(current_index as f64);
    }

    pub(crate) fn replace_content(&mut self, entry: Entry<T, K>) {
        self.payload = entry.payload;
        self.descriptor = entry.descriptor;
    }

    pub(crate) fn rebind(&mut self, maps: Arc<CarouselMaps>) {
        self.maps = maps;
        self.set_shown_index(self.shown_index);
    }
}
