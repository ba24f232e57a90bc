use carousel::{Entry, Item, ItemKey, Point, Selector, SelectorError, SelectorKey, SelectorOptions};

use crate::Tween;

/// A framework-neutral controller that wraps a `carousel::Selector` and plays its animation
/// legs from a frame clock.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - the request methods (`transition_to`, `expand_items`, drag hooks...) when UI events occur
/// - `tick(now_ms)` each frame/timer tick
///
/// Then render from `collate_for_render()`, using each item's `frame()`.
///
/// Legs of a multi-hop chain are scheduled back to back: the next hop starts at the exact time
/// the previous one was due to end, even when a frame lands late.
#[derive(Debug)]
pub struct Controller<T, K = ItemKey> {
    s: Selector<T, K>,
    tween: Option<Tween>,
}

impl<T, K: SelectorKey> Controller<T, K> {
    pub fn new(
        options: SelectorOptions<T, K>,
        entries: impl IntoIterator<Item = Entry<T, K>>,
    ) -> Self {
        Self {
            s: Selector::new(options, entries),
            tween: None,
        }
    }

    /// Replaces the item list; see `Selector::set_items`. A rebuild drops the running leg.
    pub fn set_items(&mut self, entries: impl IntoIterator<Item = Entry<T, K>>) -> bool {
        let rebuilt = self.s.set_items(entries);
        if rebuilt {
            self.tween = None;
        }
        rebuilt
    }
}

impl<T, K> Controller<T, K> {
    pub fn from_selector(s: Selector<T, K>) -> Self {
        Self { s, tween: None }
    }

    pub fn selector(&self) -> &Selector<T, K> {
        &self.s
    }

    pub fn selector_mut(&mut self) -> &mut Selector<T, K> {
        &mut self.s
    }

    pub fn into_selector(self) -> Selector<T, K> {
        self.s
    }

    pub fn is_animating(&self) -> bool {
        self.s.animation().is_some()
    }

    /// Interrupts the running leg. Items stay where the last tick put them and the rest of the
    /// chain is dropped.
    pub fn cancel_animation(&mut self) {
        self.tween = None;
        self.s.complete_animation(false);
    }

    pub fn set_options(&mut self, options: SelectorOptions<T, K>) {
        self.tween = None;
        self.s.set_options(options);
    }

    pub fn collate_for_render(&self) -> Vec<&Item<T, K>> {
        self.s.collate_for_render()
    }

    /// Advances the running chain to `now_ms`.
    ///
    /// Returns `true` when item positions were updated. Legs that end before `now_ms` are
    /// completed in order and their successors caught up within the same call.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let now = now_ms as f64;
        let mut moved = false;
        let mut chained_start = None;

        loop {
            let Some(animation) = self.s.animation() else {
                self.tween = None;
                return moved;
            };
            let tween = match self.tween {
                Some(t) if t.animation_id == animation.id() => t,
                _ => {
                    let t = Tween::new(
                        animation.id(),
                        chained_start.unwrap_or(now),
                        animation.duration_ms(),
                    );
                    self.tween = Some(t);
                    t
                }
            };

            self.s.advance_animation(tween.progress(now));
            moved = true;
            if !tween.is_done(now) {
                return moved;
            }

            chained_start = Some(tween.end_ms());
            self.tween = None;
            self.s.complete_animation(true);
        }
    }

    fn start_tween(&mut self, now_ms: u64) {
        self.tween = self
            .s
            .animation()
            .map(|a| Tween::new(a.id(), now_ms as f64, a.duration_ms()));
    }

    /// Starts rotating toward `index`; the first leg's clock starts at `now_ms`.
    pub fn transition_to(&mut self, index: usize, now_ms: u64) -> Result<(), SelectorError> {
        self.s.transition_to(index)?;
        self.start_tween(now_ms);
        Ok(())
    }

    pub fn transition_to_then(
        &mut self,
        index: usize,
        now_ms: u64,
        duration_ms: Option<f64>,
        on_complete: impl FnOnce(usize) + Send + 'static,
    ) -> Result<(), SelectorError> {
        self.s.transition_to_then(index, duration_ms, on_complete)?;
        self.start_tween(now_ms);
        Ok(())
    }

    pub fn transition(&mut self, distance: isize, now_ms: u64) -> Result<(), SelectorError> {
        self.s.transition(distance)?;
        self.start_tween(now_ms);
        Ok(())
    }

    pub fn expand_items(&mut self, now_ms: u64) -> bool {
        let started = self.s.expand_items();
        if started {
            self.start_tween(now_ms);
        }
        started
    }

    pub fn contract_items(&mut self, now_ms: u64) -> bool {
        let started = self.s.contract_items();
        if started {
            self.start_tween(now_ms);
        }
        started
    }

    /// Starts a drag. Any running chain stops where the last tick left it.
    pub fn on_drag_start(&mut self) {
        self.tween = None;
        self.s.on_drag_start();
    }

    pub fn on_drag_move(&mut self, displacement: Point) {
        self.s.on_drag_move(displacement);
    }

    /// Releases the drag. Without an active drag this does nothing, and a running leg keeps
    /// its clock.
    pub fn on_drag_end(&mut self, displacement: Point, now_ms: u64) {
        if !self.s.is_dragging() {
            return;
        }
        self.s.on_drag_end(displacement);
        self.start_tween(now_ms);
    }

    pub fn on_drag_cancel(&mut self, now_ms: u64) {
        if !self.s.is_dragging() {
            return;
        }
        self.s.on_drag_cancel();
        self.start_tween(now_ms);
    }
}
