/*!
 * Policy Traces
 * Hand-derived Gantt charts and timings for every scheduling policy
 */

use cpu_sched_sim::{
    Policy, ProcessResult, SimError, SimReport, Sim, Workload,
    core::SchedCore,
    scheduler::{PreemptivePriorityScheduler, PriorityScheduler},
};
use pretty_assertions::assert_eq;

fn workload(specs: &[(i64, i64)]) -> Workload {
    let mut workload = Workload::new();
    for &(arrival, burst) in specs {
        workload.add(arrival, burst).unwrap();
    }
    workload
}

fn prioritized(specs: &[(i64, i64, i64)]) -> Workload {
    let mut workload = Workload::new();
    for &(arrival, burst, priority) in specs {
        workload.add_with_priority(arrival, burst, priority).unwrap();
    }
    workload
}

fn run(workload: &Workload, policy: Policy) -> SimReport {
    Sim::new(workload, policy).unwrap().run().unwrap()
}

fn chart(events: &[(u64, Option<usize>)]) -> Vec<(u64, Option<String>)> {
    events
        .iter()
        .map(|&(time, pid)| (time, pid.map(|pid| format!("P{pid}"))))
        .collect()
}

// (start, completion, turnaround, waiting, response)
fn timings(report: &SimReport) -> Vec<(u64, u64, u64, u64, u64)> {
    report
        .processes
        .iter()
        .map(|p: &ProcessResult| {
            (
                p.starting_time,
                p.completion_time,
                p.turnaround_time,
                p.waiting_time,
                p.response_time,
            )
        })
        .collect()
}

#[test]
fn test_fcfs_two_processes() {
    let report = run(&workload(&[(0, 5), (1, 3)]), Policy::Fcfs);

    assert_eq!(report.gantt.labels(), chart(&[(0, Some(1)), (5, Some(2)), (8, None)]));
    assert_eq!(timings(&report), vec![(0, 5, 5, 0, 0), (5, 8, 7, 4, 4)]);

    let metrics = report.metrics.unwrap();
    assert_eq!(metrics.avg_turnaround_time, 6.0);
    assert_eq!(metrics.avg_waiting_time, 2.0);
    assert_eq!(metrics.avg_response_time, 2.0);
}

#[test]
fn test_fcfs_idle_gap_is_not_recorded() {
    let report = run(&workload(&[(0, 2), (5, 1)]), Policy::Fcfs);

    assert_eq!(report.gantt.labels(), chart(&[(0, Some(1)), (5, Some(2)), (6, None)]));
    assert_eq!(report.process(2).unwrap().response_time, 0);
}

#[test]
fn test_fcfs_same_arrival_uses_pid() {
    let report = run(&workload(&[(2, 1), (0, 3), (0, 3)]), Policy::Fcfs);

    assert_eq!(
        report.gantt.labels(),
        chart(&[(0, Some(2)), (3, Some(3)), (6, Some(1)), (7, None)])
    );
}

#[test]
fn test_sjf_trace() {
    let report = run(&workload(&[(0, 7), (2, 4), (4, 1), (5, 4)]), Policy::Sjf);

    assert_eq!(
        report.gantt.labels(),
        chart(&[(0, Some(1)), (7, Some(3)), (8, Some(2)), (12, Some(4)), (16, None)])
    );
    assert_eq!(
        timings(&report),
        vec![(0, 7, 7, 0, 0), (8, 12, 10, 6, 6), (7, 8, 4, 3, 3), (12, 16, 11, 7, 7)]
    );
}

#[test]
fn test_non_preemptive_priority_trace() {
    let input = prioritized(&[(0, 4, 2), (1, 3, 1), (2, 1, 1), (3, 2, 0)]);
    let report = run(&input, Policy::Priority);

    assert_eq!(
        report.gantt.labels(),
        chart(&[(0, Some(1)), (4, Some(4)), (6, Some(2)), (9, Some(3)), (10, None)])
    );
}

#[test]
fn test_hrrn_trace() {
    let input = workload(&[(0, 3), (2, 6), (4, 4), (6, 5), (8, 2)]);
    let report = run(&input, Policy::Hrrn);

    // At t=9: P3 2.25, P4 1.6, P5 1.5. At t=13: P4 2.4, P5 3.5
    assert_eq!(
        report.gantt.labels(),
        chart(&[
            (0, Some(1)),
            (3, Some(2)),
            (9, Some(3)),
            (13, Some(5)),
            (15, Some(4)),
            (20, None)
        ])
    );
    assert_eq!(report.process(4).unwrap().waiting_time, 9);
}

#[test]
fn test_srtf_trace() {
    let report = run(&workload(&[(0, 7), (2, 4), (4, 1), (5, 4)]), Policy::Srtf);

    assert_eq!(
        report.gantt.labels(),
        chart(&[
            (0, Some(1)),
            (2, Some(2)),
            (4, Some(3)),
            (5, Some(2)),
            (7, Some(4)),
            (11, Some(1)),
            (16, None)
        ])
    );
    assert_eq!(
        timings(&report),
        vec![(0, 16, 16, 9, 0), (2, 7, 5, 1, 0), (4, 5, 1, 0, 0), (7, 11, 6, 2, 2)]
    );
    assert_eq!(report.context_switches(), 5);
}

#[test]
fn test_preemptive_priority_trace() {
    let input = prioritized(&[(0, 5, 3), (1, 3, 1), (2, 2, 1), (4, 1, 0)]);
    let report = run(&input, Policy::PreemptivePriority);

    assert_eq!(
        report.gantt.labels(),
        chart(&[
            (0, Some(1)),
            (1, Some(2)),
            (4, Some(4)),
            (5, Some(3)),
            (7, Some(1)),
            (11, None)
        ])
    );
    assert_eq!(
        timings(&report),
        vec![(0, 11, 11, 6, 0), (1, 4, 3, 0, 0), (5, 7, 5, 3, 3), (4, 5, 1, 0, 0)]
    );
}

#[test]
fn test_preemptive_priority_equal_priority_arrival_does_not_preempt() {
    // P2 arrives with the same priority while P1 runs. Arrival order alone keeps
    // P1 on the CPU; the running-process tie rule is unit tested with its comparator
    let input = prioritized(&[(0, 4, 1), (1, 1, 1)]);
    let report = run(&input, Policy::PreemptivePriority);

    assert_eq!(report.gantt.labels(), chart(&[(0, Some(1)), (4, Some(2)), (5, None)]));
    assert_eq!(report.context_switches(), 1);
}

#[test]
fn test_round_robin_quantum_two() {
    let report = run(&workload(&[(0, 5), (1, 3)]), Policy::round_robin(2).unwrap());

    assert_eq!(
        report.gantt.labels(),
        chart(&[
            (0, Some(1)),
            (2, Some(2)),
            (4, Some(1)),
            (6, Some(2)),
            (7, Some(1)),
            (8, None)
        ])
    );
    assert_eq!(timings(&report), vec![(0, 8, 8, 3, 0), (2, 7, 6, 3, 1)]);
}

#[test]
fn test_round_robin_arrivals_queue_ahead_of_preempted() {
    let input = workload(&[(0, 4), (1, 5), (2, 2), (3, 1)]);
    let report = run(&input, Policy::round_robin(3).unwrap());

    assert_eq!(
        report.gantt.labels(),
        chart(&[
            (0, Some(1)),
            (3, Some(2)),
            (6, Some(3)),
            (8, Some(4)),
            (9, Some(1)),
            (10, Some(2)),
            (12, None)
        ])
    );
    let response: Vec<_> = report.processes.iter().map(|p| p.response_time).collect();
    assert_eq!(response, vec![0, 2, 4, 5]);
}

#[test]
fn test_round_robin_lone_process_is_one_event() {
    let report = run(&workload(&[(0, 5)]), Policy::round_robin(2).unwrap());
    assert_eq!(report.gantt.labels(), chart(&[(0, Some(1)), (5, None)]));
}

#[test]
fn test_empty_workload_every_policy() {
    for policy in [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::Hrrn,
        Policy::Srtf,
        Policy::PreemptivePriority,
        Policy::round_robin(1).unwrap(),
    ] {
        let report = run(&Workload::new(), policy);
        assert_eq!(report.gantt.labels(), chart(&[(0, None)]));
        assert_eq!(report.metrics, None);
    }
}

#[test]
fn test_single_process_metrics_equal_its_own() {
    let report = run(&workload(&[(3, 4)]), Policy::Hrrn);
    let p = report.process(1).unwrap();
    let metrics = report.metrics.unwrap();

    assert_eq!(metrics.avg_turnaround_time, p.turnaround_time as f64);
    assert_eq!(metrics.avg_waiting_time, p.waiting_time as f64);
    assert_eq!(metrics.avg_response_time, p.response_time as f64);
}

#[test]
fn test_invalid_input_is_rejected() {
    let mut input = Workload::new();
    assert_eq!(
        input.add(0, 0),
        Err(SimError::InvalidBurstTime { pid: 1, value: 0 })
    );
    assert_eq!(Policy::round_robin(-1), Err(SimError::InvalidTimeQuantum { value: -1 }));

    input.add(0, 2).unwrap();
    assert_eq!(
        Sim::new(&input, Policy::PreemptivePriority).err(),
        Some(SimError::MissingPriority { pid: 1 })
    );
}

#[test]
fn test_core_rejects_missing_priority_without_sim() {
    let mut input = Workload::new();
    input.add(0, 3).unwrap();
    input.add_with_priority(0, 1, 5).unwrap();
    let tasks = input.processes().to_vec();

    let err = SchedCore::new(tasks.clone(), PriorityScheduler).err();
    assert_eq!(err, Some(SimError::MissingPriority { pid: 1 }));
    let err = SchedCore::new(tasks, PreemptivePriorityScheduler).err();
    assert_eq!(err, Some(SimError::MissingPriority { pid: 1 }));
}

#[test]
fn test_total_time_past_u64_is_rejected() {
    let input = workload(&[(0, i64::MAX), (0, i64::MAX), (0, i64::MAX)]);
    assert_eq!(
        Sim::new(&input, Policy::Fcfs).err(),
        Some(SimError::TimeOverflow { max: u64::MAX })
    );

    // Two maximal bursts still end exactly on the last representable tick
    let report = run(&workload(&[(0, i64::MAX), (0, i64::MAX)]), Policy::Fcfs);
    assert_eq!(report.makespan(), u64::MAX - 1);
}

#[test]
fn test_report_serializes_to_json() {
    let report = run(&workload(&[(0, 5), (1, 3)]), Policy::Fcfs);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["policy"], serde_json::json!({ "policy": "fcfs" }));
    assert_eq!(json["gantt"], serde_json::json!([[0, "P1"], [5, "P2"], [8, null]]));
    assert_eq!(json["processes"][1]["waiting_time"], 4);
    assert_eq!(json["metrics"]["avg_turnaround_time"], 6.0);
}
