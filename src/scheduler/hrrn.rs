use super::{Dispatch, Scheduler, Slice, select_by};
use crate::core::{Process, SimCtx, Ticks};
use std::cmp::Ordering;

/// Highest response ratio next, non-preemptive.
///
/// The ratio `(waited + burst) / burst` favours short jobs and jobs that have
/// waited long, so long jobs cannot starve the way they can under SJF.
#[derive(Debug, Default)]
pub struct HrrnScheduler;

/// Orders `a` before `b` when `a` has the strictly higher response ratio at `now`.
///
/// Ratios are compared by cross-multiplying, so equal ratios tie exactly.
pub fn by_response_ratio(a: &Process, b: &Process, now: Ticks) -> Ordering {
    let lhs = u128::from(a.waited(now) + a.burst_time()) * u128::from(b.burst_time());
    let rhs = u128::from(b.waited(now) + b.burst_time()) * u128::from(a.burst_time());
    rhs.cmp(&lhs)
}

impl Scheduler for HrrnScheduler {
    fn name(&self) -> &'static str {
        "hrrn"
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let now = ctx.now();
        let pid = select_by(ctx, |a, b| {
            by_response_ratio(a, b, now)
                .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
                .then_with(|| a.pid().cmp(&b.pid()))
        })?;
        Some(Dispatch {
            pid,
            slice: Slice::UntilComplete,
        })
    }
}
