use super::{metrics::Metrics, report::ProcessResult, report::SimReport, workload::Workload};
use crate::{
    core::{Process, SchedCore, SchedCoreEvent, SimCtx, Ticks},
    error::Result,
    scheduler::{Policy, Scheduler},
};
use std::{panic, thread};
use tracing::{info, info_span};

/// One policy run over a private copy of a workload.
pub struct Sim {
    policy: Policy,
    pub core: SchedCore<Box<dyn Scheduler>>,
}

impl Sim {
    pub fn new(workload: &Workload, policy: Policy) -> Result<Self> {
        let mut tasks = workload.processes().to_vec();
        tasks.iter_mut().for_each(Process::reset);
        let core = SchedCore::new(tasks, policy.build())?;
        Ok(Self { policy, core })
    }

    /// Advances the simulation by one scheduling decision. Callers that need
    /// cancellation can check their flag between steps.
    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        self.core.step()
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.is_done()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn ctx(&self) -> &SimCtx {
        &self.core.ctx
    }

    pub fn run(mut self) -> Result<SimReport> {
        let processes = self.ctx().tasks().len();
        let span = info_span!("simulate", policy = %self.policy, processes);
        let _guard = span.enter();

        self.core.run_to_completion();
        let report = self.finish()?;
        info!(
            makespan = report.makespan(),
            switches = report.context_switches(),
            "simulation complete"
        );
        Ok(report)
    }

    /// Closes the timeline and builds the report. Fails if any process is
    /// still incomplete.
    pub fn finish(self) -> Result<SimReport> {
        let (tasks, gantt) = self.core.finish();
        let processes = tasks
            .iter()
            .map(ProcessResult::try_from)
            .collect::<Result<Vec<_>>>()?;
        let metrics = Metrics::aggregate(&processes);

        Ok(SimReport {
            policy: self.policy,
            gantt,
            processes,
            metrics,
        })
    }
}

/// Runs each policy on its own copy of `workload`, one thread per policy.
/// Reports come back in the order of `policies`.
pub fn compare(workload: &Workload, policies: &[Policy]) -> Result<Vec<SimReport>> {
    thread::scope(|scope| {
        let handles: Vec<_> = policies
            .iter()
            .map(|&policy| scope.spawn(move || Sim::new(workload, policy)?.run()))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .collect()
    })
}
