use cpu_sched_sim::{Policy, ProcessSpec, SimReport, Workload, compare};
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let workload = Workload::from_specs(bernoulli_jobs(12, 0.5, 0.4, 2, 6, 0))?;
    let policies = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::Hrrn,
        Policy::Srtf,
        Policy::PreemptivePriority,
        Policy::round_robin(2)?,
    ];

    let reports = compare(&workload, &policies)?;
    for report in &reports {
        print_report(report);
    }

    if let Some(report) = reports.last() {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}

fn print_report(report: &SimReport) {
    println!("== {}", report.policy);
    println!("{}", report.gantt);
    for p in &report.processes {
        println!(
            "{:<4} AT={:<3} BT={:<3} ST={:<3} CT={:<3} TAT={:<3} WT={:<3} RT={:<3}",
            p.label(),
            p.arrival_time,
            p.burst_time,
            p.starting_time,
            p.completion_time,
            p.turnaround_time,
            p.waiting_time,
            p.response_time
        );
    }
    match report.metrics {
        Some(m) => println!(
            "TAT: {:<10.2}WT: {:<10.2}RT: {:<10.2}",
            m.avg_turnaround_time, m.avg_waiting_time, m.avg_response_time
        ),
        None => println!("no processes"),
    }
    println!("Context switches: {}\n", report.context_switches());
}

// Each tick admits a job with probability `p_arrival`; jobs are short with
// probability `p_short`. Priorities are uniform in 0..=4.
fn bernoulli_jobs(
    ticks: i64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: i64,
    long_ticks: i64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };
            let priority = rng.random_range(0..=4);
            jobs.push(ProcessSpec::new(t, burst_time).with_priority(priority));
        }
    }

    jobs
}
