/*!
 * Scheduler Invariant Tests
 * Property-based checks over random workloads
 */

use mlfq_kernel::{Cycle, ProcessDescriptor, ProcessState, Scheduler};
use proptest::prelude::*;
use std::collections::HashMap;

const MAX_CYCLES: usize = 10_000;

fn workload() -> impl Strategy<Value = (u32, Vec<(u32, u32, u32)>)> {
    (
        1u32..=8,
        prop::collection::vec((1u32..=10, 1u32..=40, 1u32..=6), 1..12),
    )
}

fn build(budget: u32, jobs: &[(u32, u32, u32)]) -> Scheduler {
    let mut scheduler = Scheduler::builder(budget).build().unwrap();
    for (i, &(units, quantum, iterations)) in jobs.iter().enumerate() {
        scheduler
            .admit_descriptor(ProcessDescriptor::new(
                i as u32 + 1,
                units,
                quantum,
                iterations,
            ))
            .unwrap();
    }
    scheduler
}

proptest! {
    #[test]
    fn prop_budget_is_conserved((budget, jobs) in workload()) {
        let mut scheduler = build(budget, &jobs);

        for _ in 0..MAX_CYCLES {
            prop_assert_eq!(
                scheduler.units_in_use() + scheduler.available_units(),
                scheduler.total_units()
            );
            prop_assert!(scheduler.units_in_use() <= budget);

            match scheduler.step().unwrap() {
                Cycle::Dispatched(_) => {}
                _ => break,
            }
        }
    }

    #[test]
    fn prop_each_dispatch_consumes_one_iteration((budget, jobs) in workload()) {
        let mut scheduler = build(budget, &jobs);
        let pids: Vec<u32> = (1..=jobs.len() as u32).collect();

        for _ in 0..MAX_CYCLES {
            let before: HashMap<u32, u32> = pids
                .iter()
                .filter_map(|&pid| scheduler.process(pid).map(|p| (pid, p.remaining_iterations())))
                .collect();

            let Cycle::Dispatched(dispatch) = scheduler.step().unwrap() else {
                break;
            };

            let remaining_before = before[&dispatch.pid];
            match dispatch.state {
                ProcessState::Terminated => {
                    prop_assert_eq!(remaining_before, 1);
                    prop_assert!(scheduler.process(dispatch.pid).is_none());
                }
                ProcessState::Ready => {
                    let after = scheduler.process(dispatch.pid).unwrap();
                    prop_assert_eq!(after.remaining_iterations(), remaining_before - 1);
                    prop_assert_eq!(after.state(), ProcessState::Ready);
                }
                ProcessState::Running => prop_assert!(false, "process left running"),
            }

            // Nobody else moved
            for (&pid, &remaining) in &before {
                if pid != dispatch.pid {
                    prop_assert_eq!(scheduler.process(pid).unwrap().remaining_iterations(), remaining);
                }
            }
        }
    }

    #[test]
    fn prop_promotion_happens_exactly_when_due((budget, jobs) in workload()) {
        let mut scheduler = build(budget, &jobs);

        for _ in 0..MAX_CYCLES {
            let clock = scheduler.clock();
            let last = scheduler.last_promotion();

            let cycle = scheduler.step().unwrap();
            if cycle == Cycle::Drained {
                break;
            }

            if clock - last >= 60 {
                prop_assert_eq!(scheduler.last_promotion(), clock);
            } else {
                prop_assert_eq!(scheduler.last_promotion(), last);
            }

            if cycle == Cycle::Idle {
                break;
            }
        }
    }

    #[test]
    fn prop_drains_iff_every_process_fits_budget((budget, jobs) in workload()) {
        let mut scheduler = build(budget, &jobs);
        let outcome = scheduler.run().unwrap();

        let all_fit = jobs.iter().all(|&(units, _, _)| units <= budget);
        prop_assert_eq!(outcome.is_drained(), all_fit);

        if all_fit {
            prop_assert_eq!(scheduler.completed().len(), jobs.len());
            for summary in scheduler.completed() {
                let (_, quantum, iterations) = jobs[summary.pid as usize - 1];
                prop_assert_eq!(summary.executed_time, u64::from(quantum * iterations));
                prop_assert_eq!(summary.dispatches, iterations);
            }
        }
    }
}
