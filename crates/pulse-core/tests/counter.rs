//! Counter accounting properties.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use pulse_core::RequestCounter;

#[test]
fn fresh_counter_drains_zero() {
    let counter = RequestCounter::new();
    assert_eq!(counter.drain(), 0);
}

#[test]
fn drain_returns_increments_since_previous_drain() {
    let counter = RequestCounter::new();
    counter.increment();
    counter.increment();
    counter.increment();
    assert_eq!(counter.drain(), 3);
    assert_eq!(counter.drain(), 0);

    counter.increment();
    assert_eq!(counter.drain(), 1);
}

#[test]
fn clones_share_the_same_cell() {
    let a = RequestCounter::new();
    let b = a.clone();
    a.increment();
    b.increment();
    assert_eq!(a.drain(), 2);
    assert_eq!(b.drain(), 0);
}

#[test]
fn concurrent_increments_are_each_drained_exactly_once() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 25_000;

    let counter = RequestCounter::new();
    let stop = Arc::new(AtomicBool::new(false));

    // Drain continuously while the incrementers run, then once more after
    // they have all finished. The running total must account for every
    // increment exactly once.
    let drainer = {
        let counter = counter.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut total = 0u64;
            while !stop.load(Ordering::Acquire) {
                total += counter.drain();
            }
            total + counter.drain()
        })
    };

    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    counter.increment();
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }
    stop.store(true, Ordering::Release);

    assert_eq!(drainer.join().unwrap(), THREADS * PER_THREAD);
}
