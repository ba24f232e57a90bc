use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

fn entries(n: usize) -> Vec<Entry<usize>> {
    (0..n).map(|i| Entry::new(i as u64, i)).collect()
}

fn selector(n: usize, options: SelectorOptions<usize>) -> Selector<usize> {
    Selector::new(options, entries(n))
}

/// Plays every pending leg to its end, returning the legs in the order they ran.
fn play(s: &mut Selector<usize>) -> Vec<Animation> {
    let mut legs = Vec::new();
    for _ in 0..64 {
        let Some(leg) = s.animation().cloned() else {
            return legs;
        };
        s.advance_animation(0.5);
        s.advance_animation(1.0);
        s.complete_animation(true);
        legs.push(leg);
    }
    panic!("animation chain did not terminate");
}

fn expanded(n: usize, options: SelectorOptions<usize>) -> Selector<usize> {
    let mut s = selector(n, options);
    assert!(s.expand_items());
    play(&mut s);
    s
}

fn assert_settled_on(s: &Selector<usize>, current: usize) {
    assert_eq!(s.current_index(), current);
    for it in s.items() {
        let slot = index_to_position(current, it.index(), s.count());
        assert_eq!(it.current_index(), slot, "item {}", it.index());
        assert_eq!(it.shown_index(), slot as f64, "item {}", it.index());
    }
}

fn change_counter(
    options: SelectorOptions<usize>,
) -> (SelectorOptions<usize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicUsize::new(usize::MAX));
    let calls2 = Arc::clone(&calls);
    let last2 = Arc::clone(&last);
    let options = options.with_on_change(Some(move |s: &Selector<usize>, index: usize| {
        assert_eq!(s.current_index(), index);
        calls2.fetch_add(1, Ordering::SeqCst);
        last2.store(index, Ordering::SeqCst);
    }));
    (options, calls, last)
}

#[test]
fn arm_counts_follow_show_and_hide() {
    let s = selector(5, SelectorOptions::new().with_show(3, true));
    assert_eq!(
        s.counts(),
        ArmCounts {
            right: 1,
            left: 1,
            hidden: 2
        }
    );

    let s = selector(4, SelectorOptions::new().with_show(3, false));
    assert_eq!(
        s.counts(),
        ArmCounts {
            right: 2,
            left: 1,
            hidden: 0
        }
    );

    let s = selector(2, SelectorOptions::new().with_show(5, true));
    assert_eq!(
        s.counts(),
        ArmCounts {
            right: 1,
            left: 0,
            hidden: 0
        }
    );
}

#[test]
fn items_start_contracted_and_expand_onto_their_slots() {
    let mut s = selector(5, SelectorOptions::new().with_default_index(2));
    assert!(s.is_contracted());
    assert!(s.items().iter().all(|it| it.shown_index() == 0.0));

    assert!(s.expand_items());
    let leg = s.animation().cloned().unwrap();
    assert_eq!(leg.kind(), AnimationKind::Expand);
    // Items past the half-way point fan out from the wrap slot.
    let from: Vec<f64> = leg.motions().iter().map(|m| m.from).collect();
    assert_eq!(from, vec![5.0, 5.0, 0.0, 0.0, 0.0]);

    play(&mut s);
    assert_settled_on(&s, 2);
    assert!(s.is_idle());
    assert!(!s.expand_items());
}

#[test]
fn contract_collapses_onto_front_slot() {
    let mut s = expanded(5, SelectorOptions::new());
    assert!(s.contract_items());
    play(&mut s);
    assert!(s.is_contracted());
    assert_eq!(s.current_index(), 0);
    assert!(s.expand_items());
}

#[test]
fn out_of_range_default_index_falls_back_to_zero() {
    let s = selector(3, SelectorOptions::new().with_default_index(7));
    assert_eq!(s.current_index(), 0);
}

#[test]
fn invalid_targets_are_rejected() {
    let mut s = expanded(4, SelectorOptions::new());
    assert_eq!(
        s.transition_to(4),
        Err(SelectorError::IndexOutOfRange { index: 4, count: 4 })
    );
    assert_eq!(
        s.transition_to_value(1.5),
        Err(SelectorError::NonIntegerIndex(1.5))
    );
    assert!(s.animation().is_none());
    assert!(!s.is_transitioning());

    let mut empty = selector(0, SelectorOptions::new());
    assert!(empty.transition(1).is_err());
    assert!(empty.collate_for_render().is_empty());
}

#[test]
fn zero_distance_settles_without_changing_index() {
    let (options, calls, _) = change_counter(SelectorOptions::new().with_default_index(1));
    let mut s = expanded(5, options);
    s.set_shown_index(3, 2.4);

    s.transition(0).unwrap();
    let legs = play(&mut s);
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].kind(), AnimationKind::Settle);
    assert_settled_on(&s, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn single_hop_wraps_through_the_far_slot() {
    let mut s = expanded(5, SelectorOptions::new());

    s.transition(1).unwrap();
    let leg = s.animation().cloned().unwrap();
    assert_eq!(leg.kind(), AnimationKind::Hop { direction: 1 });
    assert_eq!(leg.easing(), Easing::default());
    let front = leg.motions()[0];
    assert_eq!((front.from, front.to), (5.0, 4.0));
    let next = leg.motions()[1];
    assert_eq!((next.from, next.to), (1.0, 0.0));
    play(&mut s);
    assert_settled_on(&s, 1);

    s.transition(-1).unwrap();
    let leg = s.animation().cloned().unwrap();
    // Item 0 sits on the last left slot and arrives in front through slot 5.
    let arriving = leg.motions()[0];
    assert_eq!((arriving.from, arriving.to), (4.0, 5.0));
    play(&mut s);
    assert_settled_on(&s, 0);
}

#[test]
fn multi_hop_takes_the_short_way_and_commits_once() {
    let (options, calls, last) = change_counter(SelectorOptions::new());
    let mut s = expanded(5, options);

    let done = Arc::new(AtomicUsize::new(usize::MAX));
    let done2 = Arc::clone(&done);
    s.transition_to_then(3, None, move |index| done2.store(index, Ordering::SeqCst))
        .unwrap();
    assert!(s.is_transitioning());

    let legs = play(&mut s);
    assert_eq!(legs.len(), 2);
    assert!(
        legs.iter()
            .all(|l| l.kind() == AnimationKind::Hop { direction: -1 } && l.easing() == Easing::Linear)
    );
    assert!(legs[0].duration_ms() > legs[1].duration_ms());
    let total: f64 = legs.iter().map(Animation::duration_ms).sum();
    assert!((total - 1000.0).abs() < 1e-9);

    assert_settled_on(&s, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 3);
    assert_eq!(done.load(Ordering::SeqCst), 3);
}

#[test]
fn duration_override_spreads_over_hops() {
    let mut s = expanded(7, SelectorOptions::new());
    s.transition_then(3, Some(300.0), |_| {}).unwrap();
    let legs = play(&mut s);
    assert_eq!(legs.len(), 3);
    let total: f64 = legs.iter().map(Animation::duration_ms).sum();
    assert!((total - 300.0).abs() < 1e-9);
    assert_settled_on(&s, 3);
}

#[test]
fn interrupted_hop_aborts_the_chain_in_place() {
    let (options, calls, last) = change_counter(SelectorOptions::new());
    let mut s = expanded(5, options);

    let done = Arc::new(AtomicUsize::new(0));
    let done2 = Arc::clone(&done);
    s.transition_then(2, None, move |_| {
        done2.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    s.advance_animation(1.0);
    s.complete_animation(true);
    assert_eq!(s.current_index(), 1);

    s.advance_animation(0.5);
    s.complete_animation(false);

    assert!(s.animation().is_none());
    assert!(!s.is_transitioning());
    assert_eq!(s.current_index(), 1);
    // Item 2 was half-way from slot 1 to the front.
    assert_eq!(s.item(2).unwrap().shown_index(), 0.5);
    assert_eq!(done.load(Ordering::SeqCst), 0);
    // Listeners learn about the hop that did land.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 1);

    s.transition(0).unwrap();
    play(&mut s);
    assert_settled_on(&s, 1);
}

#[test]
fn new_request_supersedes_the_chain_in_flight() {
    let mut s = expanded(5, SelectorOptions::new());

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(usize::MAX));
    let first2 = Arc::clone(&first);
    let second2 = Arc::clone(&second);

    s.transition_then(2, None, move |_| {
        first2.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    let first_id = s.animation().unwrap().id();
    s.advance_animation(0.3);

    s.transition_then(-1, None, move |index| second2.store(index, Ordering::SeqCst))
        .unwrap();
    assert_ne!(s.animation().unwrap().id(), first_id);

    play(&mut s);
    assert_settled_on(&s, 4);
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 4);
}

#[test]
fn drag_release_commits_the_nearest_item() {
    let (options, calls, last) = change_counter(SelectorOptions::new());
    let mut s = expanded(5, options);

    s.on_drag_start();
    assert!(s.is_dragging());
    s.on_drag_move(Point::new(-120.0, 40.0));
    assert!((s.item(0).unwrap().shown_index() - 3.8).abs() < 1e-9);
    assert_eq!(s.front_index(), 1);
    assert_eq!(s.collate_for_render().last().unwrap().index(), 1);
    assert_eq!(s.current_index(), 0);

    s.on_drag_end(Point::new(-120.0, 40.0));
    assert!(!s.is_dragging());
    let legs = play(&mut s);
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].kind(), AnimationKind::Settle);
    assert_eq!(legs[0].duration_ms(), 150.0);

    assert_settled_on(&s, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 1);
}

#[test]
fn drag_cancel_returns_to_origin() {
    let (options, calls, _) = change_counter(SelectorOptions::new());
    let mut s = expanded(5, options);

    s.on_drag_start();
    s.on_drag_move(Point::new(180.0, 0.0));
    assert_eq!(s.front_index(), 3);
    s.on_drag_cancel();
    play(&mut s);
    assert_settled_on(&s, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn drag_supersedes_a_running_transition() {
    let mut s = expanded(5, SelectorOptions::new());
    s.transition(1).unwrap();
    s.advance_animation(0.5);

    s.on_drag_start();
    assert!(s.animation().is_none());
    assert!(!s.is_transitioning());
    s.on_drag_end(Point::ZERO);
    play(&mut s);
    assert_settled_on(&s, 0);
}

#[test]
fn collation_covers_every_item_with_front_last() {
    let mut s = expanded(7, SelectorOptions::new().with_show(3, true));
    for target in [3usize, 6, 1] {
        s.transition_to(target).unwrap();
        play(&mut s);

        let order = s.collate_for_render();
        assert_eq!(order.len(), 7);
        assert_eq!(order.last().unwrap().index(), target);
        let mut seen: Vec<usize> = order.iter().map(|it| it.index()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
    }
}

#[test]
fn front_item_frame_is_centered_and_opaque() {
    let s = expanded(5, SelectorOptions::new());
    let front = s.current_item().unwrap().frame();
    assert_eq!(front.location, Point::ZERO);
    assert_eq!(front.scale, Point::splat(1.0));
    assert_eq!(front.opacity, 1.0);
    assert_eq!(front.descriptor_opacity, 1.0);

    let far = s.item(2).unwrap().frame();
    assert_eq!(far.descriptor_opacity, 0.0);
    assert!(far.opacity < 1.0);
}

#[test]
fn vanishing_gap_is_clamped() {
    let s = selector(5, SelectorOptions::new().with_vanishing_gap(0.9));
    let inputs = s.maps().opacity().input_range();
    assert!(inputs.iter().any(|v| (v - 2.45).abs() < 1e-12));
    assert!(!inputs.iter().any(|v| (v - 2.9).abs() < 1e-12));
    assert_eq!(
        s.options().scaling.clamped_vanishing_gap(),
        MAX_VANISHING_GAP
    );
}

#[test]
fn set_items_patches_matching_keys_in_place() {
    let mut s = expanded(4, SelectorOptions::new().with_default_index(2));
    let patched = (0..4).map(|i| Entry::new(i as u64, i * 10).with_descriptor("x"));
    assert!(!s.set_items(patched));
    assert_eq!(*s.item(3).unwrap().payload(), 30);
    assert_eq!(s.item(3).unwrap().descriptor(), Some("x"));
    assert_settled_on(&s, 2);
}

#[test]
fn set_items_rebuilds_on_key_changes() {
    let mut s = expanded(4, SelectorOptions::new().with_default_index(2));

    // Front key 2 survives at a new position.
    let reordered = [5u64, 2, 0].into_iter().map(|k| Entry::new(k, k as usize));
    assert!(s.set_items(reordered));
    assert_eq!(s.count(), 3);
    assert_eq!(s.current_index(), 1);
    assert!(s.is_contracted());

    // Duplicate keys never patch, even when the sequence is unchanged.
    let dupes = || [1u64, 1, 2].into_iter().map(|k| Entry::new(k, 0));
    assert!(s.set_items(dupes()));
    assert!(s.set_items(dupes()));
}

#[test]
fn set_options_rebinds_items_to_new_maps() {
    let mut s = expanded(5, SelectorOptions::new());
    let before = s.item(1).unwrap().frame();

    s.update_options(|o| {
        o.right_point = Point::new(300.0, 0.0);
        o.scroll_direction = ScrollDirection::Vertical;
    });
    assert_eq!(s.unit_vector(), Point::new(0.0, -1.0));
    let after = s.item(1).unwrap().frame();
    assert_ne!(before.location, after.location);
    assert_settled_on(&s, 0);
}

#[test]
fn five_items_showing_three_expand_onto_their_slots() {
    let mut s = selector(
        5,
        SelectorOptions::new().with_show(3, true).with_default_index(0),
    );
    assert_eq!((s.counts().left, s.counts().right), (1, 1));

    assert!(s.expand_items());
    play(&mut s);
    for it in s.items() {
        assert_eq!(
            it.shown_index(),
            index_to_position(0, it.index(), 5) as f64
        );
    }
}
