use crate::*;

use alloc::string::ToString;
use alloc::vec::Vec;
use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Attach(usize),
    Detach(usize),
    Observe(usize),
    Unobserve(usize),
    Place(usize, u64),
    Placeholder(u64, u64),
    Event(ListEvent),
    Frame,
    Disconnect,
}

#[derive(Debug, Default)]
struct RecordingHost {
    offset: i64,
    calls: Vec<Call>,
}

impl RecordingHost {
    fn take(&mut self) -> Vec<Call> {
        core::mem::take(&mut self.calls)
    }

    fn events(&self) -> Vec<ListEvent> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Event(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| f(c)).count()
    }
}

impl Host<u32> for RecordingHost {
    fn scroll_offset(&self) -> i64 {
        self.offset
    }

    fn request_frame(&mut self) {
        self.calls.push(Call::Frame);
    }

    fn attach(&mut self, index: usize, _handle: &u32) {
        self.calls.push(Call::Attach(index));
    }

    fn detach(&mut self, index: usize, _handle: &u32) {
        self.calls.push(Call::Detach(index));
    }

    fn observe(&mut self, index: usize, _handle: &u32) {
        self.calls.push(Call::Observe(index));
    }

    fn unobserve(&mut self, index: usize, _handle: &u32) {
        self.calls.push(Call::Unobserve(index));
    }

    fn place(&mut self, index: usize, _handle: &u32, top: u64) {
        self.calls.push(Call::Place(index, top));
    }

    fn place_placeholder(&mut self, top: u64, extent: u64) {
        self.calls.push(Call::Placeholder(top, extent));
    }

    fn emit(&mut self, event: ListEvent) {
        self.calls.push(Call::Event(event));
    }

    fn disconnect(&mut self) {
        self.calls.push(Call::Disconnect);
    }
}

fn handles(range: core::ops::Range<u32>) -> Vec<u32> {
    range.map(|i| 1000 + i).collect()
}

fn attached_list(count: u32) -> (WindowedList<u32>, RecordingHost) {
    let mut list = WindowedList::new(ListOptions::default().with_item_count(count as usize));
    let mut host = RecordingHost::default();
    list.attach(handles(0..count), &mut host).unwrap();
    (list, host)
}

fn scroll(list: &mut WindowedList<u32>, host: &mut RecordingHost, offset: i64) {
    host.offset = offset;
    assert!(list.on_scroll(host));
    list.run_frame(host);
}

#[test]
fn window_matches_formula() {
    let w = compute_window(1450, 500, 100, Overscan::new(1, 1));
    assert_eq!(w, WindowRange { first: 14, last: 22 });

    let w = compute_window(0, 500, 100, Overscan::new(1, 1));
    assert_eq!(w, WindowRange { first: 0, last: 7 });

    // Exact multiples do not round up.
    let w = compute_window(100, 400, 100, Overscan::new(0, 0));
    assert_eq!(w, WindowRange { first: 1, last: 5 });
}

#[test]
fn window_accepts_out_of_bounds_inputs() {
    let w = compute_window(-250, 100, 100, Overscan::new(0, 0));
    assert_eq!(w, WindowRange { first: -3, last: -1 });
    assert!(w.is_empty());
    assert_eq!(w.known(10), None);
    assert_eq!(w.missing(10), None);

    let w = compute_window(10_000, 500, 0, Overscan::new(0, 0));
    assert_eq!(w.first, 10_000);
    assert_eq!(w.last, 10_500);
}

#[test]
fn window_known_and_missing_split_at_count() {
    let w = WindowRange { first: 14, last: 22 };
    assert_eq!(w.known(15), Some(14..=14));
    assert_eq!(w.missing(15), Some(GrowthRequest { start: 15, end: 22 }));

    // `first` past the count: only the gap from `first` is requested.
    let w = WindowRange { first: 30, last: 35 };
    assert_eq!(w.known(20), None);
    assert_eq!(w.missing(20), Some(GrowthRequest { start: 30, end: 35 }));

    let w = WindowRange { first: 2, last: 5 };
    assert_eq!(w.missing(6), None);
}

proptest! {
    #[test]
    fn window_first_never_exceeds_last(
        offset in 0i64..10_000_000,
        height in 0u32..5_000,
        item_size in 1u32..1_000,
        top in 0u32..8,
        bottom in 0u32..8,
    ) {
        let w = compute_window(offset, height, item_size, Overscan::new(top, bottom));
        prop_assert!(w.first <= w.last);
    }

    #[test]
    fn window_first_is_monotonic(
        a in 0i64..10_000_000,
        b in 0i64..10_000_000,
        height in 0u32..5_000,
        item_size in 1u32..1_000,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let overscan = Overscan::default();
        let w_lo = compute_window(lo, height, item_size, overscan);
        let w_hi = compute_window(hi, height, item_size, overscan);
        prop_assert!(w_lo.first <= w_hi.first);
        prop_assert!(w_lo.last <= w_hi.last);
    }
}

#[test]
fn registry_is_append_only_and_contiguous() {
    let mut r = IndexRegistry::<u32>::new();
    r.register(0, 10).unwrap();
    assert_eq!(r.append(11), Ok(1));
    assert_eq!(r.len(), 2);
    assert_eq!(r.lookup(1), Ok(&11));
    assert_eq!(r.index_of(&10), Some(0));

    assert_eq!(r.register(1, 99), Err(Error::DuplicateIndex { index: 1 }));
    assert_eq!(
        r.register(5, 99),
        Err(Error::NonContiguousIndex {
            index: 5,
            expected: 2
        })
    );
    assert_eq!(r.lookup(2), Err(Error::OutOfRange { index: 2, count: 2 }));

    // Same handle twice is a collision even at a fresh index.
    assert_eq!(r.append(10), Err(Error::DuplicateIndex { index: 0 }));
    assert_eq!(r.len(), 2);
}

#[test]
fn error_messages_are_readable() {
    let e = Error::OutOfRange { index: 7, count: 3 };
    assert_eq!(e.to_string(), "index 7 is out of range (item count 3)");
    let e = Error::DuplicateIndex { index: 2 };
    assert_eq!(e.to_string(), "index 2 is already bound");
}

#[test]
fn options_parse_attributes_leniently() {
    let o = ListOptions::from_attributes([
        ("height", "600"),
        ("width", " 200px"),
        ("itemSize", "50"),
        ("itemCount", "40"),
        ("topCount", "2"),
        ("bottomCount", "abc"),
        ("unknown", "1"),
    ]);
    assert_eq!(o.height, 600);
    assert_eq!(o.width, 200);
    assert_eq!(o.item_size, 50);
    assert_eq!(o.item_count, 40);
    assert_eq!(o.overscan, Overscan::new(2, 1));

    let o = ListOptions::from_attributes([("itemSize", "0"), ("itemCount", "-4")]);
    assert_eq!(o.item_size, 1);
    assert_eq!(o.item_count, 0);

    assert_eq!(crate::options::parse_int_prefix("-12x"), Some(-12));
    assert_eq!(crate::options::parse_int_prefix("px"), None);
}

#[test]
fn state_derives_offsets_and_extent() {
    let mut s = ViewportState::from_options(&ListOptions::default());
    s.item_count = 15;
    assert_eq!(s.item_offset(3), 300);
    assert_eq!(s.placeholder_offset(), 1500);
    assert_eq!(s.extent(), 1600);
    assert_eq!(s.observation_margin(), ObservationMargin { top: 100, bottom: 100 });
}

#[test]
fn intersection_ratio_uses_margin() {
    let margin = ObservationMargin { top: 100, bottom: 100 };
    // Fully inside.
    assert_eq!(intersection_ratio(0, 100, 0, 500, margin), 1.0);
    // Inside the top margin only.
    assert_eq!(intersection_ratio(100, 100, 200, 500, margin), 1.0);
    // Half inside the top margin.
    assert_eq!(intersection_ratio(50, 100, 200, 500, margin), 0.5);
    // Fully past the top margin.
    assert_eq!(intersection_ratio(0, 100, 200, 500, margin), 0.0);
    // Below the bottom margin.
    assert_eq!(intersection_ratio(700, 100, 0, 500, margin), 0.0);
    assert_eq!(intersection_ratio(500, 100, 0, 500, margin), 1.0);
    // Touching the bottom edge is not an intersection.
    assert_eq!(intersection_ratio(600, 100, 0, 500, margin), 0.0);
}

#[test]
fn attach_places_items_and_shows_first_screen() {
    let (list, host) = attached_list(15);
    assert_eq!(list.item_count(), 15);
    assert_eq!(list.extent(), 1600);

    let calls = &host.calls;
    assert!(calls.contains(&Call::Place(0, 0)));
    assert!(calls.contains(&Call::Place(14, 1400)));
    assert!(calls.contains(&Call::Placeholder(1500, 1600)));

    let shown: Vec<usize> = list.tracked_indices().collect();
    assert_eq!(shown, (0..=5).collect::<Vec<_>>());
    assert!(host.events().is_empty());
    assert_eq!(list.recompute_passes(), 1);
}

#[test]
fn shown_items_are_attached_in_ascending_order() {
    let (_list, host) = attached_list(15);
    let attached: Vec<usize> = host
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Attach(i) => Some(*i),
            _ => None,
        })
        .collect();
    assert_eq!(attached, (0..=5).collect::<Vec<_>>());
}

#[test]
fn attach_with_fewer_children_requests_growth() {
    let (list, host) = attached_list(3);
    assert_eq!(list.item_count(), 3);
    assert_eq!(
        host.events(),
        [ListEvent::AddItems(GrowthRequest { start: 3, end: 5 })]
    );
}

#[test]
fn attach_rejects_duplicate_children() {
    let mut list = WindowedList::<u32>::new(ListOptions::default());
    let mut host = RecordingHost::default();
    let err = list.attach([1, 2, 1], &mut host).unwrap_err();
    assert_eq!(err, Error::DuplicateIndex { index: 0 });
    assert!(list.is_torn_down());
    assert!(!list.is_attached());
    assert!(list.registry().is_empty());
    assert_eq!(host.count(|c| *c == Call::Disconnect), 1);
    assert_eq!(host.count(|c| matches!(c, Call::Placeholder(..))), 0);

    host.take();
    assert_eq!(list.attach([7, 8, 9], &mut host), Ok(()));
    assert_eq!(list.on_children_inserted([50], &mut host), Ok(None));
    assert!(list.registry().is_empty());
    assert!(host.calls.is_empty());
}

#[test]
fn scroll_past_end_requests_missing_suffix() {
    let (mut list, mut host) = attached_list(15);
    host.take();

    scroll(&mut list, &mut host, 1450);
    assert_eq!(list.window(), WindowRange { first: 14, last: 22 });
    assert!(list.is_tracked(14));
    assert_eq!(
        host.events(),
        [ListEvent::AddItems(GrowthRequest { start: 15, end: 22 })]
    );
    assert_eq!(
        list.item(15),
        Err(Error::OutOfRange {
            index: 15,
            count: 15
        })
    );
}

#[test]
fn scroll_events_are_coalesced_until_the_frame_runs() {
    let (mut list, mut host) = attached_list(15);
    host.take();

    host.offset = 120;
    assert!(list.on_scroll(&mut host));
    for offset in [200, 350, 410] {
        host.offset = offset;
        assert!(!list.on_scroll(&mut host));
    }
    assert!(list.has_pending_recompute());
    assert_eq!(host.count(|c| *c == Call::Frame), 1);

    list.run_frame(&mut host);
    assert_eq!(list.recompute_passes(), 2);
    assert!(!list.has_pending_recompute());
    // The freshest offset wins.
    assert_eq!(list.state().scroll_offset, 410);
    assert!(list.is_tracked(10));

    // A stray frame without a pending scroll does nothing.
    list.run_frame(&mut host);
    assert_eq!(list.recompute_passes(), 2);
}

#[test]
fn reshowing_a_tracked_item_has_no_side_effects() {
    let (mut list, mut host) = attached_list(15);
    host.take();

    scroll(&mut list, &mut host, 0);
    assert_eq!(host.count(|c| matches!(c, Call::Attach(i) if *i <= 5)), 0);
    assert_eq!(host.count(|c| matches!(c, Call::Observe(i) if *i <= 5)), 0);
    // 6 and 7 come from overscan.
    assert_eq!(host.count(|c| matches!(c, Call::Attach(_))), 2);
    assert_eq!(list.tracked_indices().count(), 8);
}

#[test]
fn released_item_can_be_shown_again() {
    let (mut list, mut host) = attached_list(15);
    assert!(list.is_tracked(3));
    host.take();

    // Non-zero ratios do not release.
    assert!(!list.on_intersection(3, 0.25, &mut host));
    assert!(list.on_intersection(3, 0.0, &mut host));
    assert!(!list.is_tracked(3));
    assert_eq!(host.take(), [Call::Detach(3), Call::Unobserve(3)]);
    assert_eq!(list.registry().lookup(3), Ok(&1003));

    // Releasing twice is a no-op.
    assert!(!list.on_intersection(3, 0.0, &mut host));
    assert!(host.take().is_empty());

    scroll(&mut list, &mut host, 0);
    assert!(list.is_tracked(3));
    assert_eq!(host.count(|c| *c == Call::Attach(3)), 1);
    assert_eq!(list.item(3).map(|it| it.shown), Ok(true));
}

#[test]
fn intersection_by_handle_resolves_index() {
    let (mut list, mut host) = attached_list(15);
    assert!(list.on_intersection_handle(&1004, 0.0, &mut host));
    assert!(!list.is_tracked(4));
    assert!(!list.on_intersection_handle(&9999, 0.0, &mut host));
}

#[test]
fn growth_appends_in_order_and_moves_placeholder() {
    let (mut list, mut host) = attached_list(15);
    scroll(&mut list, &mut host, 1450);
    host.take();

    let complete = list
        .on_children_inserted(handles(15..23), &mut host)
        .unwrap()
        .unwrap();
    assert_eq!(
        complete,
        GrowthComplete {
            appended: 8,
            item_count: 23,
            extent: 2400
        }
    );
    let calls = host.take();
    assert!(calls.contains(&Call::Place(15, 1500)));
    assert!(calls.contains(&Call::Place(22, 2200)));
    assert!(calls.contains(&Call::Placeholder(2300, 2400)));
    assert_eq!(
        calls.last(),
        Some(&Call::Event(ListEvent::AddItemsFinished(complete)))
    );
    assert_eq!(list.extent(), list.item_count() as u64 * 100 + 100);

    // The next frame shows the new items without another request.
    scroll(&mut list, &mut host, 1450);
    assert!(list.is_tracked(22));
    assert!(host.events().is_empty());
}

#[test]
fn stale_growth_request_still_completes() {
    let (list, mut host) = attached_list(15);
    host.take();
    let mut growth = GrowthCoordinator::new();

    growth.request(GrowthRequest { start: 3, end: 9 }, list.state(), &mut host);
    growth.request(GrowthRequest { start: 3, end: 9 }, list.state(), &mut host);
    let finished = ListEvent::AddItemsFinished(GrowthComplete {
        appended: 0,
        item_count: 15,
        extent: 1600,
    });
    assert_eq!(host.events(), [finished, finished]);
    assert_eq!(growth.outstanding(), None);
}

#[test]
fn growth_request_is_trimmed_to_unknown_indices() {
    let (list, mut host) = attached_list(15);
    host.take();
    let mut growth = GrowthCoordinator::new();

    growth.request(GrowthRequest { start: 10, end: 18 }, list.state(), &mut host);
    let expected = GrowthRequest { start: 15, end: 18 };
    assert_eq!(host.events(), [ListEvent::AddItems(expected)]);
    assert_eq!(growth.outstanding(), Some(expected));
}

#[test]
fn empty_insertion_batch_only_completes() {
    let (mut list, mut host) = attached_list(15);
    host.take();
    let complete = list
        .on_children_inserted(Vec::new(), &mut host)
        .unwrap()
        .unwrap();
    assert_eq!(complete.appended, 0);
    assert_eq!(list.item_count(), 15);
    assert_eq!(list.registry().len(), 15);
}

#[test]
fn extent_tracks_item_count_across_batches() {
    let (mut list, mut host) = attached_list(2);
    let mut next = 2u32;
    for batch in [1u32, 4, 0, 7, 3] {
        let items = handles(next..next + batch);
        next += batch;
        list.on_children_inserted(items, &mut host).unwrap();
        assert_eq!(list.item_count(), next as usize);
        assert_eq!(list.extent(), next as u64 * 100 + 100);
    }
}

#[test]
fn duplicate_insertion_is_fatal() {
    let (mut list, mut host) = attached_list(15);
    host.take();
    let err = list.on_children_inserted([1003], &mut host).unwrap_err();
    assert_eq!(err, Error::DuplicateIndex { index: 3 });
    assert!(list.is_torn_down());
    assert!(host.calls.contains(&Call::Disconnect));
}

#[test]
fn teardown_releases_everything_and_ignores_late_callbacks() {
    let (mut list, mut host) = attached_list(15);
    host.offset = 300;
    assert!(list.on_scroll(&mut host));
    host.take();

    list.teardown(&mut host);
    let calls = host.take();
    assert_eq!(calls.iter().filter(|c| matches!(c, Call::Unobserve(_))).count(), 6);
    assert_eq!(calls.last(), Some(&Call::Disconnect));
    assert_eq!(list.registry().len(), 0);
    assert_eq!(list.tracked_indices().count(), 0);

    // The frame scheduled before teardown fires late.
    list.run_frame(&mut host);
    assert!(!list.on_scroll(&mut host));
    assert!(!list.on_intersection(0, 0.0, &mut host));
    assert_eq!(list.on_children_inserted([5000], &mut host), Ok(None));
    assert!(host.calls.is_empty());
    assert_eq!(list.recompute_passes(), 1);

    // Idempotent.
    list.teardown(&mut host);
    assert!(host.calls.is_empty());
}

#[test]
fn scroll_before_attach_is_ignored() {
    let mut list = WindowedList::<u32>::new(ListOptions::default());
    let mut host = RecordingHost::default();
    assert!(!list.on_scroll(&mut host));
    assert!(host.calls.is_empty());
}

#[test]
fn insertion_before_attach_is_ignored() {
    let mut list = WindowedList::<u32>::new(ListOptions::default());
    let mut host = RecordingHost::default();
    assert_eq!(list.on_children_inserted([500, 501], &mut host), Ok(None));
    assert!(list.registry().is_empty());
    assert_eq!(list.item_count(), 0);
    assert!(host.calls.is_empty());

    list.attach(handles(0..15), &mut host).unwrap();
    assert!(list.is_attached());
    assert_eq!(list.registry().index_of(&1000), Some(0));
    assert_eq!(list.tracked_indices().collect::<Vec<_>>(), (0..=5).collect::<Vec<_>>());
}

#[test]
fn growth_coordinator_seeds_the_initial_count() {
    let options = ListOptions::default().with_item_count(3);
    let mut state = ViewportState::from_options(&options);
    let mut registry = IndexRegistry::new();
    let mut growth = GrowthCoordinator::new();
    let mut host = RecordingHost::default();

    let count = growth
        .seed(handles(0..5), &mut state, &mut registry, &mut host)
        .unwrap();
    assert_eq!(count, 5);
    assert_eq!(state.item_count, 5);
    assert_eq!(state.extent(), 600);
    assert_eq!(host.take().last(), Some(&Call::Placeholder(500, 600)));
    assert!(growth.outstanding().is_none());
}
