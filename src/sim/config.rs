use super::{
    driver::Sim,
    report::SimReport,
    workload::{ProcessSpec, Workload},
};
use crate::{
    error::Result,
    scheduler::{Policy, PolicyKind},
};
use serde::{Deserialize, Serialize};

/// A complete simulation request, e.g. parsed from JSON:
///
/// ```json
/// { "policy": "rr", "time_quantum": 2,
///   "processes": [{ "arrival_time": 0, "burst_time": 5 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub policy: PolicyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<i64>,
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
}

impl SimulationRequest {
    /// Validates every field and splits the request into a workload and a policy.
    pub fn into_parts(self) -> Result<(Workload, Policy)> {
        let policy = Policy::from_kind(self.policy, self.time_quantum)?;
        let workload = Workload::from_specs(self.processes)?;
        policy.validate(workload.processes())?;
        Ok((workload, policy))
    }

    pub fn run(self) -> Result<SimReport> {
        let (workload, policy) = self.into_parts()?;
        Sim::new(&workload, policy)?.run()
    }
}
