use super::{Dispatch, Scheduler, Slice, select_by};
use crate::core::SimCtx;

/// Shortest remaining time first. Re-evaluated every tick.
#[derive(Debug, Default)]
pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    fn name(&self) -> &'static str {
        "srtf"
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let pid = select_by(ctx, |a, b| {
            a.remaining_time()
                .cmp(&b.remaining_time())
                .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
                .then_with(|| a.pid().cmp(&b.pid()))
        })?;
        Some(Dispatch {
            pid,
            slice: Slice::Ticks(1),
        })
    }
}
