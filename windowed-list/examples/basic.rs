// Example: minimal host that prints what the list asks of it.
use windowed_list::{Host, ListEvent, ListOptions, WindowedList, compute_window};

struct PrintHost {
    offset: i64,
}

impl Host<u32> for PrintHost {
    fn scroll_offset(&self) -> i64 {
        self.offset
    }

    fn request_frame(&mut self) {
        println!("request_frame");
    }

    fn attach(&mut self, index: usize, handle: &u32) {
        println!("attach #{index} (node {handle})");
    }

    fn detach(&mut self, index: usize, handle: &u32) {
        println!("detach #{index} (node {handle})");
    }

    fn observe(&mut self, _index: usize, _handle: &u32) {}

    fn unobserve(&mut self, _index: usize, _handle: &u32) {}

    fn place(&mut self, _index: usize, _handle: &u32, _top: u64) {}

    fn place_placeholder(&mut self, top: u64, extent: u64) {
        println!("placeholder at {top}, extent {extent}");
    }

    fn emit(&mut self, event: ListEvent) {
        println!("event {event:?}");
    }
}

fn main() {
    let options = ListOptions::default();
    println!(
        "window at 1450: {:?}",
        compute_window(1450, options.height, options.item_size, options.overscan)
    );

    let mut host = PrintHost { offset: 0 };
    let mut list = WindowedList::new(options);
    list.attach(0..15u32, &mut host).expect("unique nodes");

    host.offset = 1450;
    list.on_scroll(&mut host);
    list.run_frame(&mut host);

    list.on_children_inserted(15..23u32, &mut host).expect("unique nodes");
    println!("item_count={} extent={}", list.item_count(), list.extent());
}
