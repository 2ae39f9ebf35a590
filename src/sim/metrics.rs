use super::report::ProcessResult;
use crate::{
    core::{Process, Ticks},
    error::Result,
};
use average::{Estimate, Mean};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub avg_turnaround_time: f64,
    pub avg_waiting_time: f64,
    pub avg_response_time: f64,
}

impl Metrics {
    /// Means over completed results. `None` when there is nothing to average.
    pub fn aggregate(results: &[ProcessResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        Some(Self {
            avg_turnaround_time: avg(results.iter().map(|r| r.turnaround_time)),
            avg_waiting_time: avg(results.iter().map(|r| r.waiting_time)),
            avg_response_time: avg(results.iter().map(|r| r.response_time)),
        })
    }

    /// Fails on the first process that has not completed.
    pub fn from_processes(processes: &[Process]) -> Result<Option<Self>> {
        let results = processes
            .iter()
            .map(ProcessResult::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::aggregate(&results))
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|t| t as f64).collect::<Mean>().estimate()
}
