use std::collections::BTreeSet;

use crate::ItemId;

/// Pointer position in the collection area's pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned rectangle, normalized so `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point {
                x: a.x.min(b.x),
                y: a.y.min(b.y),
            },
            max: Point {
                x: a.x.max(b.x),
                y: a.y.max(b.y),
            },
        }
    }

    /// Bounding-box overlap test; touching edges count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// One item of the currently displayed collection with its rendered bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedItem {
    pub item_id: ItemId,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum MarqueeState {
    #[default]
    Idle,
    Dragging {
        origin: Point,
        cursor: Point,
        /// Selection the marquee adds onto: the prior set for an additive
        /// drag, empty otherwise.
        base: BTreeSet<ItemId>,
    },
}

/// Owns the selected-id set for one displayed collection.
///
/// The controller is "controlled": it holds canonical state during an
/// interaction, but the owner may overwrite it at any time via
/// [`sync_from`](SelectionController::sync_from). Marquee selection updates
/// live while dragging; one change notification is due on release (the
/// caller's job, signalled by [`end_drag`](SelectionController::end_drag)).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionController {
    selected: BTreeSet<ItemId>,
    marquee: MarqueeState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeSet<ItemId> {
        &self.selected
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selected.iter().cloned().collect()
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selected.contains(item_id)
    }

    /// Sets the selection to exactly `{item_id}`.
    pub fn replace(&mut self, item_id: ItemId) {
        self.selected.clear();
        self.selected.insert(item_id);
    }

    /// Adds `item_id` if absent, removes it if present.
    pub fn toggle(&mut self, item_id: ItemId) {
        if !self.selected.remove(&item_id) {
            self.selected.insert(item_id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Overwrites the set with an externally supplied value, discarding
    /// prior state. Any live drag is abandoned.
    pub fn sync_from(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.marquee = MarqueeState::Idle;
        self.selected = ids.into_iter().collect();
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.marquee, MarqueeState::Dragging { .. })
    }

    /// The live marquee rectangle, if a drag is in progress.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.marquee {
            MarqueeState::Idle => None,
            MarqueeState::Dragging { origin, cursor, .. } => {
                Some(Rect::from_corners(*origin, *cursor))
            }
        }
    }

    /// Starts a marquee drag from a pointer-down on empty canvas.
    ///
    /// Without a modifier the prior selection is replaced, so it empties
    /// immediately; with a modifier the drag adds onto the existing set.
    pub fn begin_drag(&mut self, origin: Point, additive: bool) {
        if self.is_dragging() {
            return;
        }
        let base = if additive {
            self.selected.clone()
        } else {
            BTreeSet::new()
        };
        self.selected = base.clone();
        self.marquee = MarqueeState::Dragging {
            origin,
            cursor: origin,
            base,
        };
    }

    /// Recomputes the live selection for the current pointer position:
    /// base set plus every item whose bounds intersect the marquee.
    pub fn drag_to(&mut self, position: Point, items: &[DisplayedItem]) -> bool {
        let MarqueeState::Dragging { origin, cursor, base } = &mut self.marquee else {
            return false;
        };
        *cursor = position;
        let rect = Rect::from_corners(*origin, *cursor);
        let mut next = base.clone();
        for item in items {
            if rect.intersects(&item.bounds) {
                next.insert(item.item_id.clone());
            }
        }
        self.selected = next;
        true
    }

    /// Finalizes the drag. Returns true if a drag was in progress, in which
    /// case the caller owes the owner one change notification.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.marquee = MarqueeState::Idle;
        was_dragging
    }

    /// Aborts the drag without rolling back: selection updates apply live
    /// during the drag, so cancellation only stops further updates.
    pub fn cancel_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.marquee = MarqueeState::Idle;
        was_dragging
    }
}
