use super::metrics::Metrics;
use crate::{
    core::{GanttChart, Pid, Priority, Process, Ticks},
    error::SimError,
    scheduler::Policy,
};
use serde::Serialize;

/// Final timing fields of one completed process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub starting_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

impl ProcessResult {
    pub fn label(&self) -> String {
        format!("P{}", self.pid)
    }
}

impl TryFrom<&Process> for ProcessResult {
    type Error = SimError;

    fn try_from(task: &Process) -> Result<Self, Self::Error> {
        let incomplete = || SimError::IncompleteProcess {
            pid: task.pid(),
            remaining: task.remaining_time(),
        };
        if !task.is_completed() {
            return Err(incomplete());
        }

        Ok(Self {
            pid: task.pid(),
            arrival_time: task.arrival_time(),
            burst_time: task.burst_time(),
            priority: task.priority(),
            starting_time: task.starting_time().ok_or_else(incomplete)?,
            completion_time: task.completion_time().ok_or_else(incomplete)?,
            turnaround_time: task.turnaround_time().ok_or_else(incomplete)?,
            waiting_time: task.waiting_time().ok_or_else(incomplete)?,
            response_time: task.response_time().ok_or_else(incomplete)?,
        })
    }
}

/// Everything a caller needs to render one finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub policy: Policy,
    pub gantt: GanttChart,
    pub processes: Vec<ProcessResult>,
    // None for an empty workload
    pub metrics: Option<Metrics>,
}

impl SimReport {
    pub fn process(&self, pid: Pid) -> Option<&ProcessResult> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn makespan(&self) -> Ticks {
        self.gantt.end_time().unwrap_or(0)
    }

    pub fn context_switches(&self) -> usize {
        self.gantt.switches()
    }
}
