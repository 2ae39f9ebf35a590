use super::{Dispatch, Scheduler, Slice, priority_of, require_priorities, select_by};
use crate::{
    core::{Process, SimCtx},
    error::Result,
};

/// Non-preemptive priority. Lower values are more urgent.
#[derive(Debug, Default)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn validate(&self, tasks: &[Process]) -> Result<()> {
        require_priorities(tasks)
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let pid = select_by(ctx, |a, b| {
            priority_of(a)
                .cmp(&priority_of(b))
                .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
                .then_with(|| a.burst_time().cmp(&b.burst_time()))
                .then_with(|| a.pid().cmp(&b.pid()))
        })?;
        Some(Dispatch {
            pid,
            slice: Slice::UntilComplete,
        })
    }
}
