pub mod fcfs;
pub mod hrrn;
pub mod preemptive_priority;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use crate::{
    core::{
        Ticks,
        state::{Pid, Priority, Process, SimCtx},
    },
    error::{Result, SimError},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{cmp::Ordering, fmt, str::FromStr};

pub use fcfs::FcfsScheduler;
pub use hrrn::HrrnScheduler;
pub use preemptive_priority::PreemptivePriorityScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;

/// How long a dispatched process may hold the CPU before control returns to
/// the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    UntilComplete,
    Ticks(Ticks),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub pid: Pid,
    pub slice: Slice,
}

pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Rejects a process table this scheduler cannot order.
    fn validate(&self, _tasks: &[Process]) -> Result<()> {
        Ok(())
    }

    fn init(&mut self, _ctx: &SimCtx) {}

    /// Picks the next process to run at `ctx.now()`, or `None` to idle one tick.
    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch>;

    /// Called after a dispatched process gives up the CPU. `runnable` is false
    /// once it has completed.
    fn stopping(&mut self, _ctx: &SimCtx, _pid: Pid, _runnable: bool) {}
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn validate(&self, tasks: &[Process]) -> Result<()> {
        (**self).validate(tasks)
    }

    fn init(&mut self, ctx: &SimCtx) {
        (**self).init(ctx)
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        (**self).dispatch(ctx)
    }

    fn stopping(&mut self, ctx: &SimCtx, pid: Pid, runnable: bool) {
        (**self).stopping(ctx, pid, runnable)
    }
}

/// Best eligible process under `order`, where `Ordering::Less` means "runs first".
/// Every order ends on pid, so the result never depends on table layout.
pub fn select_by<F>(ctx: &SimCtx, mut order: F) -> Option<Pid>
where
    F: FnMut(&Process, &Process) -> Ordering,
{
    ctx.eligible().min_by(|a, b| order(a, b)).map(Process::pid)
}

pub(crate) fn require_priorities(tasks: &[Process]) -> Result<()> {
    match tasks.iter().find(|t| t.priority().is_none()) {
        Some(task) => Err(SimError::MissingPriority { pid: task.pid() }),
        None => Ok(()),
    }
}

// Priority schedulers reject tables without priorities in `validate`
pub(crate) fn priority_of(task: &Process) -> Priority {
    match task.priority() {
        Some(priority) => priority,
        None => unreachable!("P{} has no priority", task.pid()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeQuantum(Ticks);

impl TimeQuantum {
    pub fn new(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(SimError::InvalidTimeQuantum { value });
        }
        Ok(Self(value as Ticks))
    }

    pub const fn get(&self) -> Ticks {
        self.0
    }
}

impl Serialize for TimeQuantum {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Policy names as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fcfs,
    Sjf,
    Priority,
    Hrrn,
    Srtf,
    PreemptivePriority,
    RoundRobin,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 7] = [
        Self::Fcfs,
        Self::Sjf,
        Self::Priority,
        Self::Hrrn,
        Self::Srtf,
        Self::PreemptivePriority,
        Self::RoundRobin,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::Hrrn => "hrrn",
            Self::Srtf => "srtf",
            Self::PreemptivePriority => "preemptive_priority",
            Self::RoundRobin => "round_robin",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" | "first_come_first_serve" => Ok(Self::Fcfs),
            "sjf" | "shortest_job_first" => Ok(Self::Sjf),
            "priority" | "prio" | "non_preemptive_priority" => Ok(Self::Priority),
            "hrrn" | "highest_response_ratio_next" => Ok(Self::Hrrn),
            "srtf" | "shortest_remaining_time_first" => Ok(Self::Srtf),
            "preemptive_priority" | "pprio" => Ok(Self::PreemptivePriority),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PolicyKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A fully parameterised policy, ready to build a scheduler from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    Hrrn,
    Srtf,
    PreemptivePriority,
    RoundRobin { time_quantum: TimeQuantum },
}

impl Policy {
    pub fn round_robin(time_quantum: i64) -> Result<Self> {
        Ok(Self::RoundRobin {
            time_quantum: TimeQuantum::new(time_quantum)?,
        })
    }

    /// Combines a configured policy name with its optional quantum.
    pub fn from_kind(kind: PolicyKind, time_quantum: Option<i64>) -> Result<Self> {
        Ok(match kind {
            PolicyKind::Fcfs => Self::Fcfs,
            PolicyKind::Sjf => Self::Sjf,
            PolicyKind::Priority => Self::Priority,
            PolicyKind::Hrrn => Self::Hrrn,
            PolicyKind::Srtf => Self::Srtf,
            PolicyKind::PreemptivePriority => Self::PreemptivePriority,
            PolicyKind::RoundRobin => {
                // A missing quantum is reported the same way as a zero one
                Self::round_robin(time_quantum.unwrap_or(0))?
            }
        })
    }

    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Fcfs => PolicyKind::Fcfs,
            Self::Sjf => PolicyKind::Sjf,
            Self::Priority => PolicyKind::Priority,
            Self::Hrrn => PolicyKind::Hrrn,
            Self::Srtf => PolicyKind::Srtf,
            Self::PreemptivePriority => PolicyKind::PreemptivePriority,
            Self::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }

    pub const fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Self::Srtf | Self::PreemptivePriority | Self::RoundRobin { .. }
        )
    }

    pub const fn requires_priority(&self) -> bool {
        matches!(self, Self::Priority | Self::PreemptivePriority)
    }

    /// Rejects workloads this policy cannot schedule.
    pub fn validate(&self, tasks: &[Process]) -> Result<()> {
        if !self.requires_priority() {
            return Ok(());
        }
        require_priorities(tasks)
    }

    pub fn build(&self) -> Box<dyn Scheduler> {
        match *self {
            Self::Fcfs => Box::new(FcfsScheduler),
            Self::Sjf => Box::new(SjfScheduler),
            Self::Priority => Box::new(PriorityScheduler),
            Self::Hrrn => Box::new(HrrnScheduler),
            Self::Srtf => Box::new(SrtfScheduler),
            Self::PreemptivePriority => Box::new(PreemptivePriorityScheduler),
            Self::RoundRobin { time_quantum } => Box::new(RoundRobinScheduler::new(time_quantum)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { time_quantum } => {
                write!(f, "{} (q={})", self.kind(), time_quantum.get())
            }
            _ => write!(f, "{}", self.kind()),
        }
    }
}
