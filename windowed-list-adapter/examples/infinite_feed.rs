// Example: an infinite feed that appends a page of items whenever the list asks for more.
use windowed_list::{ListEvent, ListOptions};
use windowed_list_adapter::{ComponentRegistry, Driver};

fn main() {
    let mut components = ComponentRegistry::new();
    let options = ListOptions::default().with_height(500).with_item_size(100);
    let mut feed = Driver::<u64>::with_components(options, &mut components);
    feed.attach(0..15u64).expect("initial items are unique");

    for offset in (0..=6_000).step_by(350) {
        // Several wheel events land in the same frame; only the first schedules work.
        feed.on_scroll(offset);
        feed.on_scroll(offset + 20);
        let report = feed.tick();

        if let Some(done) = feed.serve_growth(|i| i as u64).expect("ids are unique") {
            println!(
                "offset={offset}: appended {} items, count={}, extent={}",
                done.appended, done.item_count, done.extent
            );
        }
        let shown: Vec<usize> = feed.list().tracked_indices().collect();
        println!(
            "offset={offset}: recomputed={} released={} shown={shown:?}",
            report.recomputed, report.released
        );
    }

    let finished = feed
        .host_mut()
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, ListEvent::AddItemsFinished(_)))
        .count();
    println!("growth batches completed: {finished}");

    feed.teardown();
    println!("components defined: {}", components.len());
}
