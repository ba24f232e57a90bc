// Example: build a selector, fan the items out and rotate by hand-driven legs.
use carousel::{ArmSide, Entry, Point, Selector, SelectorOptions};

fn play(s: &mut Selector<&'static str>) {
    while let Some(leg) = s.animation() {
        println!("  leg {} {:?} {:.1}ms", leg.id(), leg.kind(), leg.duration_ms());
        for step in 1..=4 {
            s.advance_animation(step as f64 / 4.0);
        }
        s.complete_animation(true);
    }
}

fn main() {
    let names = ["red", "orange", "yellow", "green", "blue", "indigo", "violet"];
    let options = SelectorOptions::new()
        .with_show(5, true)
        .with_points(Point::new(-200.0, 40.0), Point::new(200.0, 40.0))
        .with_on_change(Some(|_: &Selector<&'static str>, index: usize| {
            println!("  committed index {index}");
        }));
    let mut s = Selector::new(
        options,
        names.iter().enumerate().map(|(i, n)| Entry::new(i as u64, *n)),
    );

    println!("counts={:?}", s.counts());
    let location = s.maps().location();
    println!("inputs={:?}", location.input_range());
    if let Ok(inverse) = location.axis(carousel::Axis::X).arm_inverse(ArmSide::Right) {
        println!("x=100 sits at slot {:.3}", inverse.lookup(100.0));
    }

    s.expand_items();
    play(&mut s);

    s.transition_to(4).ok();
    play(&mut s);

    for it in s.collate_for_render() {
        let f = it.frame();
        println!(
            "{:>7} slot={} at ({:7.2}, {:6.2}) opacity={:.2}",
            it.payload(),
            it.current_index(),
            f.location.x,
            f.location.y,
            f.opacity
        );
    }
}
