use super::{Dispatch, Scheduler, Slice, priority_of, require_priorities, select_by};
use crate::{
    core::{Pid, Process, SimCtx},
    error::Result,
};
use std::cmp::Ordering;

/// Preemptive priority, re-evaluated every tick. On an exact priority tie the
/// process already on the CPU keeps it, so ties never cost a context switch.
#[derive(Debug, Default)]
pub struct PreemptivePriorityScheduler;

pub fn by_priority_preferring(a: &Process, b: &Process, running: Option<Pid>) -> Ordering {
    let is_running = |task: &Process| Some(task.pid()) == running;
    priority_of(a)
        .cmp(&priority_of(b))
        // `true` sorts after `false`, so compare b against a
        .then_with(|| is_running(b).cmp(&is_running(a)))
        .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
        .then_with(|| a.burst_time().cmp(&b.burst_time()))
        .then_with(|| a.pid().cmp(&b.pid()))
}

impl Scheduler for PreemptivePriorityScheduler {
    fn name(&self) -> &'static str {
        "preemptive_priority"
    }

    fn validate(&self, tasks: &[Process]) -> Result<()> {
        require_priorities(tasks)
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let running = ctx.running();
        let pid = select_by(ctx, |a, b| by_priority_preferring(a, b, running))?;
        Some(Dispatch {
            pid,
            slice: Slice::Ticks(1),
        })
    }
}
