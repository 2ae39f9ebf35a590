use super::{Dispatch, Scheduler, Slice, select_by};
use crate::core::SimCtx;

/// Shortest job first, non-preemptive.
#[derive(Debug, Default)]
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let pid = select_by(ctx, |a, b| {
            a.burst_time()
                .cmp(&b.burst_time())
                .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
                .then_with(|| a.pid().cmp(&b.pid()))
        })?;
        Some(Dispatch {
            pid,
            slice: Slice::UntilComplete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Process;

    #[test]
    fn shortest_burst_wins_then_arrival_then_pid() {
        let mut ctx = SimCtx::new(vec![
            Process::new(1, 0, 6, None),
            Process::new(2, 3, 2, None),
            Process::new(3, 1, 2, None),
            Process::new(4, 1, 2, None),
        ]);
        ctx.advance_time(3);
        assert_eq!(SjfScheduler.dispatch(&ctx).map(|d| d.pid), Some(3));
    }
}
