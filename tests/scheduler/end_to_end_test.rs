/*!
 * End-to-End Scheduler Tests
 * Full runs observed through the recording reporter
 */

use mlfq_kernel::{
    load_str, Event, ProcessDescriptor, QueueLevel, RecordingReporter, RunOutcome, Scheduler,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn scheduler_with_recorder(budget: u32) -> (Scheduler, Arc<RecordingReporter>) {
    let recorder = Arc::new(RecordingReporter::new());
    let scheduler = Scheduler::builder(budget)
        .with_reporter(recorder.clone())
        .build()
        .unwrap();
    (scheduler, recorder)
}

#[test]
fn test_waiting_process_admitted_after_release() {
    let (mut scheduler, recorder) = scheduler_with_recorder(4);

    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 2, 5, 2))
        .unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(2, 3, 3, 1))
        .unwrap();

    let outcome = scheduler.run().unwrap();
    assert_eq!(outcome, RunOutcome::Drained { clock: 13 });

    assert_eq!(
        recorder.events(),
        vec![
            Event::Admitted {
                pid: 1,
                units: 2,
                available: 2
            },
            Event::Waiting {
                pid: 2,
                required: 3,
                available: 2
            },
            Event::Dispatched {
                pid: 1,
                level: QueueLevel::Q1,
                charge: 5
            },
            Event::Progress {
                pid: 1,
                ticks: 5,
                remaining: 1
            },
            Event::Dispatched {
                pid: 1,
                level: QueueLevel::Q2,
                charge: 5
            },
            Event::Terminated { pid: 1, clock: 10 },
            Event::Released {
                pid: 1,
                units: 2,
                available: 4
            },
            Event::AdmittedFromWaiting {
                pid: 2,
                units: 3,
                available: 1
            },
            Event::Dispatched {
                pid: 2,
                level: QueueLevel::Q1,
                charge: 3
            },
            Event::Terminated { pid: 2, clock: 13 },
            Event::Released {
                pid: 2,
                units: 3,
                available: 4
            },
            Event::Drained { clock: 13 },
        ]
    );

    assert!(scheduler.is_drained());
    assert_eq!(scheduler.available_units(), 4);
}

#[test]
fn test_loaded_workload_runs_to_completion() {
    let input = "\
Procesadores 2
Hilos 2
1|0|main|8|64|2|5|2
2|1|worker|8|64|3|3|1
2|1|duplicate|8|64|1|1|1
3|1|bad|8|64|0|1|1
";
    let workload = load_str(input).unwrap();
    assert_eq!(workload.report.rejected.len(), 2);

    let (mut scheduler, recorder) = scheduler_with_recorder(workload.budget());
    for descriptor in workload.descriptors {
        scheduler.admit_descriptor(descriptor).unwrap();
    }

    assert!(scheduler.run().unwrap().is_drained());

    let terminated: Vec<u32> = recorder
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::Terminated { pid, .. } => Some(*pid),
            _ => None,
        })
        .collect();
    assert_eq!(terminated, vec![1, 2]);
}

#[test]
fn test_process_larger_than_budget_only_waits() {
    let (mut scheduler, recorder) = scheduler_with_recorder(4);

    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 2, 5, 3))
        .unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(2, 5, 1, 1))
        .unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(3, 1, 1, 1))
        .unwrap();

    let outcome = scheduler.run().unwrap();
    assert_eq!(
        outcome,
        RunOutcome::Stalled {
            clock: 16,
            waiting: vec![2],
        }
    );

    // pid 2 was never dispatched
    assert!(!recorder
        .events()
        .iter()
        .any(|e| matches!(e, Event::Dispatched { pid: 2, .. })));
    assert_eq!(
        recorder.events().last(),
        Some(&Event::Stalled {
            clock: 16,
            waiting: vec![2]
        })
    );
    assert_eq!(scheduler.available_units(), 4);
}

#[test]
fn test_head_of_line_blocks_smaller_processes() {
    let (mut scheduler, _recorder) = scheduler_with_recorder(4);

    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 4, 1, 1))
        .unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(2, 9, 1, 1))
        .unwrap();
    scheduler
        .admit_descriptor(ProcessDescriptor::new(3, 1, 1, 1))
        .unwrap();

    let outcome = scheduler.run().unwrap();
    assert_eq!(
        outcome,
        RunOutcome::Stalled {
            clock: 1,
            waiting: vec![2, 3],
        }
    );
}

#[test]
fn test_throughput_factor_shortens_run() {
    let recorder = Arc::new(RecordingReporter::new());
    let mut scheduler = Scheduler::builder(2)
        .with_throughput(2)
        .with_reporter(recorder.clone())
        .build()
        .unwrap();

    scheduler
        .admit_descriptor(ProcessDescriptor::new(1, 1, 10, 3))
        .unwrap();

    assert_eq!(scheduler.run().unwrap(), RunOutcome::Drained { clock: 15 });
    assert_eq!(scheduler.completed()[0].executed_time, 15);
}
