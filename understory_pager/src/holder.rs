// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three-slot ring of slide holders.
//!
//! Slot `0` shows the previous page, slot `1` the current one and slot `2` the
//! next one. Holders keep their identity (and their engine) as they rotate
//! through the slots, so a page that slides out of view to one side can slide
//! back in without reloading.

/// Index of the slot showing the previous page.
pub const PREVIOUS_SLOT: usize = 0;
/// Index of the slot showing the current page.
pub const CURRENT_SLOT: usize = 1;
/// Index of the slot showing the next page.
pub const NEXT_SLOT: usize = 2;

/// Stable identity of a slide holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HolderId(pub u8);

/// One slot of the ring: an engine plus the page it is bound to.
#[derive(Clone, Debug)]
pub struct SlideHolder<T> {
    id: HolderId,
    item: Option<usize>,
    x: Option<f64>,
    target: T,
}

impl<T> SlideHolder<T> {
    fn new(id: u8, target: T) -> Self {
        Self {
            id: HolderId(id),
            item: None,
            x: None,
            target,
        }
    }

    /// Stable identity.
    #[must_use]
    pub fn id(&self) -> HolderId {
        self.id
    }

    /// Logical page shown, if any.
    #[must_use]
    pub fn item(&self) -> Option<usize> {
        self.item
    }

    /// Horizontal position inside the main scroll, once laid out.
    #[must_use]
    pub fn x(&self) -> Option<f64> {
        self.x
    }

    /// The page's engine.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the page's engine.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub(crate) fn bind(&mut self, item: Option<usize>) -> bool {
        if self.item == item {
            return false;
        }
        self.item = item;
        true
    }

    pub(crate) fn place(&mut self, x: f64) -> bool {
        if self.x == Some(x) {
            return false;
        }
        self.x = Some(x);
        true
    }
}

/// Previous, current and next holders.
#[derive(Clone, Debug)]
pub struct HolderRing<T> {
    slots: [SlideHolder<T>; 3],
}

impl<T> HolderRing<T> {
    /// Creates a ring from three engines, with ids `0`, `1` and `2` in slot
    /// order.
    #[must_use]
    pub fn new(targets: [T; 3]) -> Self {
        let [a, b, c] = targets;
        Self {
            slots: [
                SlideHolder::new(0, a),
                SlideHolder::new(1, b),
                SlideHolder::new(2, c),
            ],
        }
    }

    /// Rotates holders after the current page moved by `items_diff`.
    ///
    /// Moving forward sends the previous holder to the end; moving back
    /// brings the next holder to the front. Larger jumps still rotate by one
    /// and rely on rebinding.
    pub fn rotate(&mut self, items_diff: isize) {
        if items_diff > 0 {
            self.slots.rotate_left(1);
        } else if items_diff < 0 {
            self.slots.rotate_right(1);
        }
    }

    /// Holder in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= 3`.
    #[must_use]
    pub fn slot(&self, slot: usize) -> &SlideHolder<T> {
        &self.slots[slot]
    }

    /// Mutable holder in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= 3`.
    pub fn slot_mut(&mut self, slot: usize) -> &mut SlideHolder<T> {
        &mut self.slots[slot]
    }

    /// Holder of the current page.
    #[must_use]
    pub fn current(&self) -> &SlideHolder<T> {
        &self.slots[CURRENT_SLOT]
    }

    /// Mutable holder of the current page.
    pub fn current_mut(&mut self) -> &mut SlideHolder<T> {
        &mut self.slots[CURRENT_SLOT]
    }

    /// Slot currently occupied by `id`.
    #[must_use]
    pub fn slot_of(&self, id: HolderId) -> Option<usize> {
        self.slots.iter().position(|h| h.id == id)
    }

    /// Holders in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SlideHolder<T>> {
        self.slots.iter()
    }

    /// Mutable holders in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SlideHolder<T>> {
        self.slots.iter_mut()
    }
}
