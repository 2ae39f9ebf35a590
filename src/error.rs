use crate::core::{Pid, Ticks};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("P{pid}: burst_time must be greater than 0, got {value}")]
    InvalidBurstTime { pid: Pid, value: i64 },

    #[error("P{pid}: arrival_time must not be negative, got {value}")]
    InvalidArrivalTime { pid: Pid, value: i64 },

    #[error("P{pid}: priority is required by the selected policy")]
    MissingPriority { pid: Pid },

    #[error("time_quantum must be greater than 0, got {value}")]
    InvalidTimeQuantum { value: i64 },

    #[error("latest arrival plus total burst time exceeds {max} ticks")]
    TimeOverflow { max: Ticks },

    #[error("P{pid} has not completed (remaining_time {remaining})")]
    IncompleteProcess { pid: Pid, remaining: Ticks },

    #[error(
        "unknown policy '{0}'. Valid: fcfs, sjf, priority, hrrn, srtf, \
         preemptive_priority, round_robin"
    )]
    UnknownPolicy(String),
}
