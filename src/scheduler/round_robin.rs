use super::{Dispatch, Scheduler, Slice, TimeQuantum};
use crate::core::{Pid, SimCtx};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::trace;

/// Round robin over a FIFO ready queue with a fixed quantum.
///
/// Processes join the queue in (arrival, pid) order. A process whose quantum
/// expires goes to the tail, behind anything that arrived while it ran.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: TimeQuantum,
    queue: VecDeque<Pid>,
    queued: FxHashSet<Pid>,
    // Pids sorted by (arrival, pid); everything before `cursor` was admitted
    arrivals: Vec<Pid>,
    cursor: usize,
}

impl RoundRobinScheduler {
    pub fn new(quantum: TimeQuantum) -> Self {
        Self {
            quantum,
            queue: VecDeque::new(),
            queued: FxHashSet::default(),
            arrivals: Vec::new(),
            cursor: 0,
        }
    }

    pub fn ready_queue(&self) -> impl Iterator<Item = Pid> + '_ {
        self.queue.iter().copied()
    }

    fn push_back(&mut self, pid: Pid) {
        let inserted = self.queued.insert(pid);
        debug_assert!(inserted, "P{pid} already present in the ready queue");
        if inserted {
            self.queue.push_back(pid);
        }
    }

    fn pop_front(&mut self) -> Option<Pid> {
        let pid = self.queue.pop_front()?;
        let removed = self.queued.remove(&pid);
        debug_assert!(removed, "P{pid} missing queue membership");
        Some(pid)
    }

    // Moves every process that has arrived by now into the queue
    fn admit_arrivals(&mut self, ctx: &SimCtx, exclude: Option<Pid>) {
        while let Some(&pid) = self.arrivals.get(self.cursor) {
            let task = ctx.task(pid);
            if task.arrival_time() > ctx.now() {
                break;
            }
            self.cursor += 1;
            if task.is_completed() || Some(pid) == exclude || self.queued.contains(&pid) {
                continue;
            }
            trace!(pid, now = ctx.now(), "admitted to ready queue");
            self.push_back(pid);
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn init(&mut self, ctx: &SimCtx) {
        let mut arrivals: Vec<_> = ctx
            .tasks()
            .iter()
            .filter(|t| !t.is_completed())
            .map(|t| (t.arrival_time(), t.pid()))
            .collect();
        arrivals.sort_unstable();

        self.arrivals = arrivals.into_iter().map(|(_, pid)| pid).collect();
        self.cursor = 0;
        self.queue.clear();
        self.queued.clear();
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        self.admit_arrivals(ctx, None);
        let pid = self.pop_front()?;
        Some(Dispatch {
            pid,
            slice: Slice::Ticks(self.quantum.get()),
        })
    }

    fn stopping(&mut self, ctx: &SimCtx, pid: Pid, runnable: bool) {
        // Arrivals during the slice queue ahead of the preempted process
        self.admit_arrivals(ctx, Some(pid));
        if runnable {
            self.push_back(pid);
        }
    }
}
