#![allow(non_snake_case)]
//! A counter that also shows the value it had one render ago.

use hindsight_core::*;
use hindsight_ui::*;

/// Rendered in place of a previous value on the first frame.
pub const UNDEFINED: &str = "undefined";

pub fn counter_label(count: i32, previous: Option<i32>) -> String {
    match previous {
        Some(prev) => format!("Counter Value : {count} || Old Value : {prev}"),
        None => format!("Counter Value : {count} || Old Value : {UNDEFINED}"),
    }
}

pub fn increment(count: &Signal<i32>) {
    count.update(|c| *c = c.wrapping_add(1));
}

pub fn decrement(count: &Signal<i32>) {
    count.update(|c| *c = c.wrapping_sub(1));
}

pub fn Counter() -> View {
    CounterFrom(0)
}

/// A counter whose first frame shows `start`.
pub fn CounterFrom(start: i32) -> View {
    let count = remember(|| signal(start));
    let current = count.get();
    let previous = use_previous(current);

    disposable_effect((), || {
        log::info!("counter mounted");
        on_unmount(|| log::info!("counter unmounted"))
    });

    Column().with_children(vec![
        Text(counter_label(current, previous)),
        Row().with_children(vec![
            Button("Increment", {
                let count = count.clone();
                move || increment(&count)
            }),
            Button("Decrement", {
                let count = count.clone();
                move || decrement(&count)
            }),
        ]),
    ])
}

pub fn app(_s: &mut Scheduler) -> View {
    Counter()
}
