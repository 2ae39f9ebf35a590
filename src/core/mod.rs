pub mod driver;
pub mod event;
pub mod gantt;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use gantt::{GanttChart, GanttEvent};
pub use state::{CpuState, Pid, Priority, Process, ProcessState, SimCtx, Ticks};
