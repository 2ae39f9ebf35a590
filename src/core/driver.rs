use super::{
    event::SchedCoreEvent,
    gantt::GanttChart,
    observer::Observer,
    state::{CpuState, Process, SimCtx, Ticks},
};
use crate::{
    error::{Result, SimError},
    scheduler::{Dispatch, Scheduler, Slice},
};
use tracing::{debug, trace};

/// The time-stepping loop shared by every policy. The scheduler decides who
/// runs; the core owns the clock, the process table and the Gantt chart.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    gantt: GanttChart,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    /// Fails if `scheduler` cannot order `tasks` or if the run could push the
    /// clock past `Ticks::MAX`.
    pub fn new(tasks: Vec<Process>, mut scheduler: S) -> Result<Self> {
        scheduler.validate(&tasks)?;
        if SimCtx::horizon(&tasks).is_none() {
            return Err(SimError::TimeOverflow { max: Ticks::MAX });
        }

        let ctx = SimCtx::new(tasks);
        scheduler.init(&ctx);
        Ok(Self {
            ctx,
            scheduler,
            gantt: GanttChart::new(),
            observer: Observer::new(),
        })
    }

    /// Runs one scheduling decision: either an idle tick or one dispatched slice.
    /// Does nothing once every process has completed.
    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();
        if self.ctx.all_completed() {
            return events;
        }

        let now = self.ctx.now();
        match self.scheduler.dispatch(&self.ctx) {
            Some(dispatch) => self.run_slice(dispatch, &mut events),
            None => {
                let prev = self.ctx.cpu();
                self.ctx.clear_cpu();
                if prev != CpuState::Idle {
                    events.push(SchedCoreEvent::CpuCurrentChange {
                        at: now,
                        from: prev,
                        to: CpuState::Idle,
                    });
                }
                self.ctx.advance_time(1);
                trace!(now, "cpu idle");
                events.push(SchedCoreEvent::CpuIdle { at: now });
            }
        }

        self.observer.observe(&self.ctx, &self.gantt);
        events
    }

    fn run_slice(&mut self, dispatch: Dispatch, events: &mut Vec<SchedCoreEvent>) {
        let Dispatch { pid, slice } = dispatch;
        let now = self.ctx.now();
        debug_assert!(
            self.ctx.task(pid).is_eligible(now),
            "{} dispatched ineligible P{pid} at {now}",
            self.scheduler.name()
        );

        let prev = self.ctx.set_running(pid);
        let to = CpuState::Running(pid);
        if prev != to {
            events.push(SchedCoreEvent::CpuCurrentChange { at: now, from: prev, to });
        }

        if self.ctx.task_mut(pid).mark_running(now) {
            debug!(pid, now, "first dispatch");
        }
        if self.gantt.record(now, pid) {
            debug!(scheduler = self.scheduler.name(), pid, now, "switched to process");
        }

        let remaining = self.ctx.task(pid).remaining_time();
        let units = match slice {
            Slice::UntilComplete => remaining,
            Slice::Ticks(ticks) => {
                debug_assert!(ticks > 0, "{} dispatched an empty slice", self.scheduler.name());
                ticks.min(remaining)
            }
        };

        self.ctx.task_mut(pid).consume(units);
        self.ctx.advance_time(units);
        events.push(SchedCoreEvent::Executed {
            pid,
            start: now,
            units,
        });

        let runnable = self.ctx.task(pid).remaining_time() > 0;
        if !runnable {
            let at = self.ctx.now();
            self.ctx.mark_completed(pid);
            debug!(pid, at, "completed");
            events.push(SchedCoreEvent::Completed { pid, at });
            events.push(SchedCoreEvent::CpuCurrentChange {
                at,
                from: to,
                to: CpuState::Idle,
            });
        }

        self.scheduler.stopping(&self.ctx, pid, runnable);
    }

    /// Steps until every process has completed.
    pub fn run_to_completion(&mut self) {
        while !self.ctx.all_completed() {
            self.step();
        }
    }

    pub fn is_done(&self) -> bool {
        self.ctx.all_completed()
    }

    /// Closes the Gantt chart at the current time and hands back the results.
    pub fn finish(mut self) -> (Vec<Process>, GanttChart) {
        self.gantt.finish(self.ctx.now());
        (self.ctx.into_tasks(), self.gantt)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now()
    }

    pub fn gantt(&self) -> &GanttChart {
        &self.gantt
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
