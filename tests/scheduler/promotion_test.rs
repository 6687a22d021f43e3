/*!
 * Promotion Tests
 * Starvation avoidance timing and ordering
 */

use mlfq_kernel::{Cycle, Event, ProcessDescriptor, QueueLevel, RecordingReporter, Scheduler};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_promotion_fires_every_interval() {
    let recorder = Arc::new(RecordingReporter::new());
    let mut scheduler = Scheduler::builder(1)
        .with_reporter(recorder.clone())
        .build()
        .unwrap();

    // 20-tick quanta: clock 20, 40, 60, ... promotion checked before each dispatch
    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 1, 20, 8))
        .unwrap();
    scheduler.run().unwrap();

    let promotions: Vec<u64> = recorder
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::Promoted { clock, .. } => Some(*clock),
            _ => None,
        })
        .collect();
    assert_eq!(promotions, vec![60, 120]);
    assert_eq!(scheduler.stats().promotions, 2);
}

#[test]
fn test_promoted_process_restarts_demotion_from_q1() {
    let mut scheduler = Scheduler::builder(1).build().unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 1, 20, 8))
        .unwrap();

    let levels: Vec<QueueLevel> = std::iter::from_fn(|| match scheduler.step().unwrap() {
        Cycle::Dispatched(d) => Some(d.level),
        _ => None,
    })
    .collect();

    use QueueLevel::*;
    assert_eq!(levels, vec![Q1, Q2, Q3, Q1, Q2, Q3, Q1, Q2]);
}

#[test]
fn test_promotion_is_unconditional() {
    let recorder = Arc::new(RecordingReporter::new());
    let mut scheduler = Scheduler::builder(10)
        .with_promotion_interval(10)
        .with_reporter(recorder.clone())
        .build()
        .unwrap();

    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 1, 10, 2))
        .unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(2, 1, 1, 1))
        .unwrap();

    // pid 1 runs first and reaches Q2; pid 2 is still in Q1 when promotion fires
    scheduler.step().unwrap();
    assert_eq!(scheduler.queue(QueueLevel::Q1), vec![2]);
    assert_eq!(scheduler.queue(QueueLevel::Q2), vec![1]);

    let Cycle::Dispatched(d) = scheduler.step().unwrap() else {
        panic!("expected a dispatch");
    };
    assert_eq!(d.pid, 2);
    assert!(recorder
        .events()
        .contains(&Event::Promoted { clock: 10, moved: 1 }));
    assert_eq!(scheduler.queue(QueueLevel::Q1), vec![1]);
}

#[test]
fn test_promotion_with_empty_lower_levels_still_resets_timer() {
    let mut scheduler = Scheduler::builder(1).build().unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 1, 70, 2))
        .unwrap();

    scheduler.step().unwrap();
    assert_eq!(scheduler.clock(), 70);
    assert_eq!(scheduler.promote(), 1);
    assert_eq!(scheduler.promote(), 0);
    assert_eq!(scheduler.last_promotion(), 70);
}
