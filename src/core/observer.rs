use super::{
    gantt::GanttChart,
    state::{CpuState, ProcessState, SimCtx},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx, gantt: &GanttChart) {
        self.step += 1;

        if let CpuState::Running(pid) = ctx.cpu() {
            let task = ctx.task(pid);
            debug_assert_eq!(
                task.state(),
                ProcessState::Running,
                "cpu.current P{pid} must be Running"
            );
            debug_assert!(task.remaining_time() > 0, "Running P{pid} has no work left");
        }

        let mut running = 0;
        for task in ctx.tasks() {
            let pid = task.pid();
            debug_assert!(
                task.remaining_time() <= task.burst_time(),
                "P{pid} remaining_time exceeds burst_time"
            );

            match task.state() {
                ProcessState::Running => running += 1,
                ProcessState::Completed => {
                    debug_assert_eq!(task.remaining_time(), 0, "Completed P{pid} has work left");
                    let (Some(start), Some(end)) = (task.starting_time(), task.completion_time())
                    else {
                        debug_assert!(false, "Completed P{pid} missing timing fields");
                        continue;
                    };
                    debug_assert!(
                        task.arrival_time() <= start && start <= end && end <= ctx.now(),
                        "P{pid} timing out of order: arrival {} start {start} end {end}",
                        task.arrival_time()
                    );
                }
                ProcessState::Ready => {
                    let executed = task.remaining_time() < task.burst_time();
                    debug_assert!(
                        task.starting_time().is_some() == executed,
                        "P{pid} started flag disagrees with executed work"
                    );
                }
            }
        }
        debug_assert!(running <= 1, "{running} processes Running on one CPU");

        if let Some(last) = gantt.events().last() {
            debug_assert!(
                last.time <= ctx.now(),
                "Gantt event at {} is ahead of the clock {}",
                last.time,
                ctx.now()
            );
        }
    }
}
