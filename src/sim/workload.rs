use crate::{
    core::{Pid, Priority, Process, Ticks},
    error::{Result, SimError},
};
use serde::{Deserialize, Serialize};

/// A process creation request as submitted by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival_time: i64,
    pub burst_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ProcessSpec {
    pub fn new(arrival_time: i64, burst_time: i64) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// An ordered set of validated processes. Pids are handed out from 1 in
/// submission order; a rejected request does not consume a pid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = ProcessSpec>,
    {
        let mut workload = Self::new();
        for spec in specs {
            workload.submit(spec)?;
        }
        Ok(workload)
    }

    pub fn submit(&mut self, spec: ProcessSpec) -> Result<Pid> {
        let pid = self.processes.len() + 1;
        if spec.arrival_time < 0 {
            return Err(SimError::InvalidArrivalTime {
                pid,
                value: spec.arrival_time,
            });
        }
        if spec.burst_time <= 0 {
            return Err(SimError::InvalidBurstTime {
                pid,
                value: spec.burst_time,
            });
        }

        self.processes.push(Process::new(
            pid,
            spec.arrival_time as Ticks,
            spec.burst_time as Ticks,
            spec.priority,
        ));
        Ok(pid)
    }

    pub fn add(&mut self, arrival_time: i64, burst_time: i64) -> Result<Pid> {
        self.submit(ProcessSpec::new(arrival_time, burst_time))
    }

    pub fn add_with_priority(
        &mut self,
        arrival_time: i64,
        burst_time: i64,
        priority: Priority,
    ) -> Result<Pid> {
        self.submit(ProcessSpec::new(arrival_time, burst_time).with_priority(priority))
    }

    /// Drops every process and restarts pid numbering at 1.
    pub fn clear(&mut self) {
        self.processes.clear();
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pids_follow_submission_order() {
        let mut workload = Workload::new();
        assert_eq!(workload.add(3, 2), Ok(1));
        assert_eq!(workload.add_with_priority(0, 1, 4), Ok(2));
        assert_eq!(workload.processes()[1].priority(), Some(4));
        assert_eq!(workload.processes()[0].arrival_time(), 3);
    }

    #[test]
    fn rejects_invalid_fields_without_consuming_pid() {
        let mut workload = Workload::new();
        assert_eq!(
            workload.add(0, 0),
            Err(SimError::InvalidBurstTime { pid: 1, value: 0 })
        );
        assert_eq!(
            workload.add(-2, 5),
            Err(SimError::InvalidArrivalTime { pid: 1, value: -2 })
        );
        assert_eq!(workload.add(0, 5), Ok(1));
        assert_eq!(
            workload.add(1, -4),
            Err(SimError::InvalidBurstTime { pid: 2, value: -4 })
        );
        assert_eq!(workload.len(), 1);
    }

    #[test]
    fn clear_restarts_numbering() {
        let specs = [ProcessSpec::new(0, 1), ProcessSpec::new(1, 1)];
        let mut workload = Workload::from_specs(specs).unwrap();
        workload.clear();
        assert!(workload.is_empty());
        assert_eq!(workload.add(0, 1), Ok(1));
    }

    #[test]
    fn from_specs_stops_at_first_error() {
        let result = Workload::from_specs([
            ProcessSpec::new(0, 1),
            ProcessSpec::new(0, 0),
            ProcessSpec::new(-1, 1),
        ]);
        assert_eq!(result, Err(SimError::InvalidBurstTime { pid: 2, value: 0 }));
    }
}
