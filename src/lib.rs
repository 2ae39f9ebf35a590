//! Discrete-time simulation of uniprocessor CPU scheduling policies.
//!
//! Build a [`Workload`], pick a [`Policy`], and [`Sim::run`] it to get a Gantt
//! chart, per-process timings and averages back as a [`SimReport`].

pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{Result, SimError};
pub use scheduler::{Policy, PolicyKind, Scheduler, TimeQuantum};
pub use sim::{
    Metrics, ProcessResult, ProcessSpec, Sim, SimReport, SimulationRequest, Workload, compare,
};
