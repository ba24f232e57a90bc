use carousel::{Entry, SelectorOptions};
use carousel_adapter::Controller;

fn main() {
    // Example: a controller playing a rotation without holding any UI objects.
    //
    // An adapter would:
    // - request a transition (e.g. in response to a "next" button)
    // - call tick(now_ms) in a frame loop / timer
    // - draw collate_for_render() using each item's frame
    let labels = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];
    let mut c = Controller::new(
        SelectorOptions::new().with_show(5, true),
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| Entry::new(i as u64, *label).with_descriptor(*label)),
    );

    c.expand_items(0);
    c.tick(1_000);
    c.transition_to(3, 1_000).ok();

    let mut now_ms = 1_000u64;
    while c.tick(now_ms) {
        if now_ms.is_multiple_of(160) {
            let front = c.collate_for_render().last().map(|it| *it.payload());
            println!("t={now_ms} front={front:?}");
        }
        now_ms += 16;
    }

    for it in c.collate_for_render() {
        let f = it.frame();
        println!(
            "{:>8} at ({:7.2}, {:7.2}) scale={:.2} opacity={:.2}",
            it.payload(),
            f.location.x,
            f.location.y,
            f.scale.x,
            f.opacity
        );
    }
}
