use super::{Dispatch, Scheduler, Slice, select_by};
use crate::core::SimCtx;

/// First come, first served: earliest arrival runs to completion.
#[derive(Debug, Default)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let pid = select_by(ctx, |a, b| {
            a.arrival_time()
                .cmp(&b.arrival_time())
                .then_with(|| a.pid().cmp(&b.pid()))
        })?;
        Some(Dispatch {
            pid,
            slice: Slice::UntilComplete,
        })
    }
}
