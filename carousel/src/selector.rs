use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::animation::{Animation, AnimationKind, ItemMotion};
use crate::key::{SelectorKey, has_duplicates};
use crate::{
    ArmCounts, CarouselMaps, Easing, Entry, GestureProjector, Item, ItemKey, OnChangeCallback,
    Point, SelectorError, SelectorOptions, checked_index, collate, hop_durations, index_to_position,
    shortest_distance,
};

/// Continuation invoked with the committed index once a transition finishes.
pub type Completion = Box<dyn FnOnce(usize) + Send>;

enum Motion {
    Hops {
        remaining: VecDeque<f64>,
        direction: i8,
        easing: Easing,
        target: usize,
    },
    Settle {
        target: usize,
    },
    Expand,
    Contract,
}

struct InFlight {
    motion: Motion,
    // Current index when the request was made.
    origin: usize,
    on_complete: Option<Completion>,
}

#[derive(Clone, Copy, Debug)]
struct DragState {
    origin: usize,
    front: usize,
}

/// A headless carousel selector.
///
/// Holds the items, the index of the item in front and the maps shared by every item. It
/// never touches UI objects or clocks: each animation it wants played is exposed as an
/// [`Animation`] leg, and the host reports progress through
/// [`Selector::advance_animation`] and completion through [`Selector::complete_animation`]
/// (the `carousel-adapter` crate's `Controller` does both from a frame tick).
///
/// Transitions run as a chain of legs:
/// - `transition(distance)` rotates by `|distance|` single-slot hops, one leg each. Hop
///   durations come from [`hop_durations`], and each hop starts only after the previous one
///   completed.
/// - `transition(0)`, drag release and drag cancel play a single settle leg.
/// - Completing a leg with `finished = false` aborts the rest of the chain; items stay where
///   the interrupted leg left them.
///
/// Requesting a new transition, expand/contract or drag while a chain is in flight supersedes
/// it: the chain stops where it stands and its continuation is dropped.
pub struct Selector<T, K = ItemKey> {
    options: SelectorOptions<T, K>,
    items: Vec<Item<T, K>>,
    current_index: usize,
    counts: ArmCounts,
    projector: GestureProjector,
    maps: Arc<CarouselMaps>,

    animation: Option<Animation>,
    in_flight: Option<InFlight>,
    drag: Option<DragState>,
    next_animation_id: u64,
}

fn resolve_default_index(default_index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    if default_index >= count {
        cwarn!(default_index, count, "default index out of range, using 0");
        return 0;
    }
    default_index
}

impl<T, K: SelectorKey> Selector<T, K> {
    /// Creates a selector with every item contracted onto the front slot. Call
    /// [`Selector::expand_items`] to fan them out.
    pub fn new(
        options: SelectorOptions<T, K>,
        entries: impl IntoIterator<Item = Entry<T, K>>,
    ) -> Self {
        let entries: Vec<Entry<T, K>> = entries.into_iter().collect();
        if has_duplicates(entries.iter().map(|e| &e.key)) {
            cwarn!(count = entries.len(), "Selector::new: non-unique item keys");
        }

        let count = entries.len();
        let counts = ArmCounts::resolve(count, options.show, options.hide);
        let maps = Arc::new(CarouselMaps::build(
            counts,
            options.left_point,
            options.right_point,
            &options.scaling,
        ));
        let projector = projector_for(&options);
        let current_index = resolve_default_index(options.default_index, count);
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| Item::new(e, i, Arc::clone(&maps)))
            .collect();

        cdebug!(
            count,
            current_index,
            right = counts.right,
            left = counts.left,
            hidden = counts.hidden,
            "Selector::new"
        );

        Self {
            options,
            items,
            current_index,
            counts,
            projector,
            maps,
            animation: None,
            in_flight: None,
            drag: None,
            next_animation_id: 0,
        }
    }

    /// Replaces the item list.
    ///
    /// When the keys match the current items one-to-one and in order, payloads and descriptors
    /// are patched in place and `false` is returned. Otherwise (including non-unique keys) the
    /// items are rebuilt, contracted, and `true` is returned; the previous front item stays in
    /// front when its key survives.
    pub fn set_items(&mut self, entries: impl IntoIterator<Item = Entry<T, K>>) -> bool {
        let entries: Vec<Entry<T, K>> = entries.into_iter().collect();
        let duplicates = has_duplicates(entries.iter().map(|e| &e.key));
        if duplicates {
            cwarn!(
                count = entries.len(),
                "non-unique item keys, rebuilding all items"
            );
        }

        let same_keys = !duplicates
            && entries.len() == self.items.len()
            && entries
                .iter()
                .zip(&self.items)
                .all(|(e, it)| &e.key == it.key());
        if same_keys {
            for (it, e) in self.items.iter_mut().zip(entries) {
                it.replace_content(e);
            }
            return false;
        }

        let kept_front = self
            .items
            .get(self.current_index)
            .and_then(|front| entries.iter().position(|e| &e.key == front.key()));

        self.abort_in_flight();
        self.drag = None;
        let count = entries.len();
        self.current_index = kept_front
            .unwrap_or_else(|| resolve_default_index(self.options.default_index, count));
        self.rebuild_geometry(count);
        let maps = Arc::clone(&self.maps);
        self.items = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| Item::new(e, i, Arc::clone(&maps)))
            .collect();

        cdebug!(count, current_index = self.current_index, "Selector::set_items rebuilt");
        true
    }
}

fn projector_for<T, K>(options: &SelectorOptions<T, K>) -> GestureProjector {
    GestureProjector::new(
        options
            .scroll_direction
            .unit_vector(options.left_point, options.right_point),
        options.simple_scroll_distance,
    )
}

impl<T, K> Selector<T, K> {
    pub fn options(&self) -> &SelectorOptions<T, K> {
        &self.options
    }

    /// Applies new options: arm counts, scroll vector and maps are rebuilt and every item is
    /// re-bound to the new maps. Any in-flight transition or drag is dropped.
    pub fn set_options(&mut self, options: SelectorOptions<T, K>) {
        self.abort_in_flight();
        self.drag = None;
        self.options = options;
        self.rebuild_geometry(self.items.len());
        let maps = Arc::clone(&self.maps);
        for it in &mut self.items {
            it.rebind(Arc::clone(&maps));
        }
        ctrace!(options = ?self.options, "Selector::set_options");
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut SelectorOptions<T, K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Selector<T, K>, usize) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as OnChangeCallback<T, K>);
    }

    fn rebuild_geometry(&mut self, count: usize) {
        self.counts = ArmCounts::resolve(count, self.options.show, self.options.hide);
        self.projector = projector_for(&self.options);
        self.maps = Arc::new(CarouselMaps::build(
            self.counts,
            self.options.left_point,
            self.options.right_point,
            &self.options.scaling,
        ));
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Index (in input order) of the settled front item.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The item considered in front right now: during a drag, the one nearest the front slot.
    pub fn front_index(&self) -> usize {
        self.drag.map_or(self.current_index, |d| d.front)
    }

    pub fn counts(&self) -> ArmCounts {
        self.counts
    }

    pub fn unit_vector(&self) -> Point {
        self.projector.unit()
    }

    pub fn maps(&self) -> &Arc<CarouselMaps> {
        &self.maps
    }

    pub fn items(&self) -> &[Item<T, K>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item<T, K>> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item<T, K>> {
        self.items.get_mut(index)
    }

    pub fn current_item(&self) -> Option<&Item<T, K>> {
        self.items.get(self.current_index)
    }

    /// The leg the host should be playing, if any.
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Idle: nothing in flight, no drag, every item resting on its settled slot.
    pub fn is_idle(&self) -> bool {
        self.animation.is_none()
            && self.in_flight.is_none()
            && self.drag.is_none()
            && self.items.iter().all(Item::is_settled)
    }

    /// Whether every item rests on the front slot (or its wrap twin).
    pub fn is_contracted(&self) -> bool {
        let n = self.items.len() as f64;
        self.items.iter().all(|it| {
            it.current_index() == 0 && (it.shown_index() == 0.0 || it.shown_index() == n)
        })
    }

    /// Sets an item's rendered position directly, for hosts that animate indices themselves.
    pub fn set_shown_index(&mut self, item: usize, shown_index: f64) {
        if let Some(it) = self.items.get_mut(item) {
            it.set_shown_index(shown_index);
        }
    }

    /// Items in draw order: farthest first, the front item last.
    pub fn collate_for_render(&self) -> Vec<&Item<T, K>> {
        collate(
            &self.items,
            self.front_index(),
            self.counts.right,
            self.counts.left,
        )
    }

    /// Rotates until `index` is in front, taking the shorter way around (rightward on ties).
    pub fn transition_to(&mut self, index: usize) -> Result<(), SelectorError> {
        self.request_transition_to(index, None, None)
    }

    /// Like [`Selector::transition_to`], with an optional duration override and a
    /// continuation invoked once the target is committed.
    pub fn transition_to_then(
        &mut self,
        index: usize,
        duration_ms: Option<f64>,
        on_complete: impl FnOnce(usize) + Send + 'static,
    ) -> Result<(), SelectorError> {
        self.request_transition_to(index, duration_ms, Some(Box::new(on_complete)))
    }

    /// Accepts an index held as a float; it must be a whole number in range.
    pub fn transition_to_value(&mut self, index: f64) -> Result<(), SelectorError> {
        let index = checked_index(index, self.items.len())?;
        self.transition_to(index)
    }

    fn request_transition_to(
        &mut self,
        index: usize,
        duration_ms: Option<f64>,
        on_complete: Option<Completion>,
    ) -> Result<(), SelectorError> {
        let count = self.items.len();
        if index >= count {
            return Err(SelectorError::IndexOutOfRange { index, count });
        }
        let distance = shortest_distance(self.current_index, index, count);
        self.request_transition(distance, duration_ms, on_complete)
    }

    /// Rotates by `distance` slots: positive brings right-hand items to the front.
    ///
    /// `transition(0)` settles every item back onto its slot without changing the index.
    pub fn transition(&mut self, distance: isize) -> Result<(), SelectorError> {
        self.request_transition(distance, None, None)
    }

    pub fn transition_then(
        &mut self,
        distance: isize,
        duration_ms: Option<f64>,
        on_complete: impl FnOnce(usize) + Send + 'static,
    ) -> Result<(), SelectorError> {
        self.request_transition(distance, duration_ms, Some(Box::new(on_complete)))
    }

    fn request_transition(
        &mut self,
        distance: isize,
        duration_ms: Option<f64>,
        on_complete: Option<Completion>,
    ) -> Result<(), SelectorError> {
        let count = self.items.len();
        if count == 0 {
            return Err(SelectorError::IndexOutOfRange { index: 0, count });
        }

        self.abort_in_flight();
        self.drag = None;

        let duration_ms = duration_ms.unwrap_or(self.options.transition_duration_ms);
        let origin = self.current_index;
        if distance == 0 {
            self.start_settle(origin, origin, duration_ms, on_complete);
            return Ok(());
        }

        let target = (origin as isize + distance).rem_euclid(count as isize) as usize;
        let remaining: VecDeque<f64> =
            hop_durations(distance, duration_ms, self.options.hop_timing_depth).into();
        let easing = if remaining.len() > 1 {
            Easing::Linear
        } else {
            self.options.easing
        };
        cdebug!(origin, target, distance, "transition");

        self.in_flight = Some(InFlight {
            motion: Motion::Hops {
                remaining,
                direction: if distance > 0 { 1 } else { -1 },
                easing,
                target,
            },
            origin,
            on_complete,
        });
        self.start_next_hop();
        Ok(())
    }

    /// Fans contracted items out to their slots. Does nothing (and returns `false`) unless
    /// every item is contracted.
    pub fn expand_items(&mut self) -> bool {
        if self.items.is_empty() || !self.is_contracted() {
            return false;
        }
        self.abort_in_flight();
        self.drag = None;

        let n = self.items.len();
        let current = self.current_index;
        let motions = self
            .items
            .iter()
            .enumerate()
            .map(|(i, it)| {
                let to = index_to_position(current, it.index(), n) as f64;
                // Start from whichever of 0 / n is closer, so both arms fan out evenly.
                let from = (to / n as f64).round() * n as f64;
                ItemMotion { item: i, from, to }
            })
            .collect();

        self.in_flight = Some(InFlight {
            motion: Motion::Expand,
            origin: current,
            on_complete: None,
        });
        self.start_leg(
            AnimationKind::Expand,
            motions,
            self.options.transition_duration_ms,
            self.options.easing,
        );
        true
    }

    /// Collapses every item onto the front slot.
    pub fn contract_items(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.abort_in_flight();
        self.drag = None;

        let n = self.items.len() as f64;
        let motions = self
            .items
            .iter()
            .enumerate()
            .map(|(i, it)| {
                let from = it.shown_index();
                ItemMotion {
                    item: i,
                    from,
                    to: (from / n).round() * n,
                }
            })
            .collect();

        self.in_flight = Some(InFlight {
            motion: Motion::Contract,
            origin: self.current_index,
            on_complete: None,
        });
        self.start_leg(
            AnimationKind::Contract,
            motions,
            self.options.transition_duration_ms,
            self.options.easing,
        );
        true
    }

    /// Begins a drag, superseding any transition in flight.
    pub fn on_drag_start(&mut self) {
        self.abort_in_flight();
        let origin = self.current_index;
        self.drag = Some(DragState {
            origin,
            front: origin,
        });
    }

    /// Moves every item by the projected drag. `displacement` is the total displacement since
    /// the drag started.
    pub fn on_drag_move(&mut self, displacement: Point) {
        if self.items.is_empty() {
            return;
        }
        if self.drag.is_none() {
            self.on_drag_start();
        }
        let increment = self.projector.increment(displacement);
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let n = self.items.len();
        for it in &mut self.items {
            let slot = index_to_position(drag.origin, it.index(), n);
            let position = GestureProjector::dragged_position(slot, increment, n);
            let nearest = position.round();
            if nearest < 1.0 || nearest == n as f64 {
                drag.front = it.index();
            }
            it.set_shown_index(position);
        }
    }

    /// Releases the drag: settles onto the item nearest the front slot and commits it.
    pub fn on_drag_end(&mut self, displacement: Point) {
        if self.drag.is_none() {
            return;
        }
        self.on_drag_move(displacement);
        let Some(drag) = self.drag.take() else {
            return;
        };
        cdebug!(
            origin = drag.origin,
            front = drag.front,
            "drag released"
        );
        self.start_settle(
            drag.front,
            drag.origin,
            self.options.settle_duration_ms,
            None,
        );
    }

    /// Abandons the drag and settles back onto the index it started from.
    pub fn on_drag_cancel(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.start_settle(
            drag.origin,
            drag.origin,
            self.options.settle_duration_ms,
            None,
        );
    }

    /// Applies leg progress in `[0, 1]` (time fraction; the leg's easing is applied here).
    pub fn advance_animation(&mut self, progress: f64) {
        let Some(animation) = &self.animation else {
            return;
        };
        let eased = animation.easing().sample(progress);
        for m in animation.motions() {
            if let Some(it) = self.items.get_mut(m.item) {
                it.set_shown_index(m.value_at(eased));
            }
        }
    }

    /// Reports that the current leg ended.
    ///
    /// With `finished = false` (the leg was interrupted) the remaining chain is dropped and
    /// items stay where they are. Otherwise the leg's bookkeeping runs: hops re-anchor every
    /// item on the new front and start the next hop; the last leg commits the target, fires
    /// `on_change` when the index moved, then the continuation.
    pub fn complete_animation(&mut self, finished: bool) {
        let Some(animation) = self.animation.take() else {
            return;
        };
        if !finished {
            cdebug!(id = animation.id(), "animation interrupted");
            self.abort_in_flight();
            return;
        }
        ctrace!(id = animation.id(), kind = ?animation.kind(), "animation finished");

        for m in animation.motions() {
            if let Some(it) = self.items.get_mut(m.item) {
                it.set_shown_index(m.to);
            }
        }

        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        let InFlight {
            motion,
            origin,
            on_complete,
        } = in_flight;
        let n = self.items.len();

        match motion {
            Motion::Hops {
                remaining,
                direction,
                easing,
                target,
            } => {
                self.current_index =
                    (self.current_index as isize + direction as isize).rem_euclid(n as isize)
                        as usize;
                self.settle_items();
                if remaining.is_empty() {
                    debug_assert_eq!(self.current_index, target);
                    self.commit(origin, on_complete);
                } else {
                    self.in_flight = Some(InFlight {
                        motion: Motion::Hops {
                            remaining,
                            direction,
                            easing,
                            target,
                        },
                        origin,
                        on_complete,
                    });
                    self.start_next_hop();
                }
            }
            Motion::Settle { target } => {
                self.current_index = target;
                self.settle_items();
                self.commit(origin, on_complete);
            }
            Motion::Expand => {
                self.settle_items();
                self.commit(origin, on_complete);
            }
            Motion::Contract => {
                for it in &mut self.items {
                    it.set_current_index(0);
                }
                self.commit(origin, on_complete);
            }
        }
    }

    /// Re-anchors every item on the current front: `current_index` and `shown_index` become
    /// the item's slot relative to it.
    fn settle_items(&mut self) {
        let n = self.items.len();
        let current = self.current_index;
        for it in &mut self.items {
            it.set_current_index(index_to_position(current, it.index(), n));
        }
    }

    fn commit(&mut self, origin: usize, on_complete: Option<Completion>) {
        let index = self.current_index;
        if index != origin {
            self.notify_change();
        }
        if let Some(f) = on_complete {
            f(index);
        }
    }

    fn notify_change(&self) {
        if let Some(cb) = self.options.on_change.clone() {
            cb(self, self.current_index);
        }
    }

    /// Drops the running leg and chain. Items keep their partial progress; if earlier hops
    /// already moved the front, listeners are told about the index they left behind.
    fn abort_in_flight(&mut self) {
        if self.animation.take().is_some() {
            cdebug!("animation superseded");
        }
        if let Some(in_flight) = self.in_flight.take() {
            if self.current_index != in_flight.origin {
                self.notify_change();
            }
        }
    }

    fn start_next_hop(&mut self) {
        let Some(InFlight {
            motion:
                Motion::Hops {
                    remaining,
                    direction,
                    easing,
                    ..
                },
            ..
        }) = self.in_flight.as_mut()
        else {
            return;
        };
        let Some(duration_ms) = remaining.pop_front() else {
            return;
        };
        let (direction, easing) = (*direction, *easing);

        let n = self.items.len();
        let motions = self
            .items
            .iter()
            .enumerate()
            .map(|(i, it)| {
                let slot = it.current_index();
                // Items move one slot against `direction`. The front item leaves through the
                // wrap slot `n` on a forward hop, and the last left item arrives through it on
                // a backward one.
                let to_slot = if direction > 0 {
                    if slot == 0 { n - 1 } else { slot - 1 }
                } else {
                    slot + 1
                };
                let to = to_slot as f64;
                // Pick the copy of the shown position nearest the hop's natural start.
                let start = to + f64::from(direction);
                let shown = it.shown_index();
                let from = shown + ((start - shown) / n as f64).round() * n as f64;
                ItemMotion { item: i, from, to }
            })
            .collect();

        self.start_leg(AnimationKind::Hop { direction }, motions, duration_ms, easing);
    }

    /// Starts a single leg that brings `target` to the front, each item taking the short way
    /// to its slot (through the wrap slot when that is closer).
    fn start_settle(
        &mut self,
        target: usize,
        origin: usize,
        duration_ms: f64,
        on_complete: Option<Completion>,
    ) {
        let n = self.items.len();
        let half = n as f64 / 2.0;
        let motions = self
            .items
            .iter()
            .enumerate()
            .map(|(i, it)| {
                let slot = index_to_position(target, it.index(), n) as f64;
                let mut from = it.shown_index();
                let mut to = slot;
                if slot - from > half {
                    from += n as f64;
                } else if from - slot > half {
                    to = slot + n as f64;
                }
                ItemMotion { item: i, from, to }
            })
            .collect();

        self.in_flight = Some(InFlight {
            motion: Motion::Settle { target },
            origin,
            on_complete,
        });
        self.start_leg(
            AnimationKind::Settle,
            motions,
            duration_ms,
            self.options.easing,
        );
    }

    fn start_leg(
        &mut self,
        kind: AnimationKind,
        motions: Vec<ItemMotion>,
        duration_ms: f64,
        easing: Easing,
    ) {
        for m in &motions {
            if let Some(it) = self.items.get_mut(m.item) {
                it.set_shown_index(m.from);
            }
        }
        let id = self.next_animation_id;
        self.next_animation_id = self.next_animation_id.wrapping_add(1);
        ctrace!(id, kind = ?kind, duration_ms, "animation started");
        self.animation = Some(Animation::new(id, kind, motions, duration_ms, easing));
    }
}

impl<T, K> core::fmt::Debug for Selector<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Selector")
            .field("count", &self.items.len())
            .field("current_index", &self.current_index)
            .field("counts", &self.counts)
            .field("unit_vector", &self.projector.unit())
            .field("animation", &self.animation)
            .field("transitioning", &self.in_flight.is_some())
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}
