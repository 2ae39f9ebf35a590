use crate::core::{CpuState, Pid, Ticks};

/// What happened during one [`SchedCore::step`](super::SchedCore::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedCoreEvent {
    CpuCurrentChange {
        at: Ticks,
        from: CpuState,
        to: CpuState,
    },
    Executed {
        pid: Pid,
        start: Ticks,
        units: Ticks,
    },
    Completed {
        pid: Pid,
        at: Ticks,
    },
    // Nothing eligible, clock moved one tick
    CpuIdle {
        at: Ticks,
    },
}
