use serde::Serialize;

// Pids start at 1 and index the task table as `pid - 1`
pub type Pid = usize;
pub type Ticks = u64;
pub type Priority = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    Idle,
    Running(Pid),
}

/// One simulated job: static workload parameters plus the timing fields the
/// engine fills in while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    arrival_time: Ticks,
    burst_time: Ticks,
    priority: Option<Priority>,
    state: ProcessState,
    remaining_time: Ticks,
    starting_time: Option<Ticks>,
    completion_time: Option<Ticks>,
    turnaround_time: Option<Ticks>,
    waiting_time: Option<Ticks>,
    response_time: Option<Ticks>,
}

impl Process {
    pub(crate) fn new(
        pid: Pid,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: Option<Priority>,
    ) -> Self {
        debug_assert!(pid > 0, "pids are 1-based");
        debug_assert!(burst_time > 0, "P{pid} created with zero burst_time");
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            state: ProcessState::Ready,
            remaining_time: burst_time,
            starting_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn starting_time(&self) -> Option<Ticks> {
        self.starting_time
    }

    pub fn completion_time(&self) -> Option<Ticks> {
        self.completion_time
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.turnaround_time
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.waiting_time
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.response_time
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }

    pub fn is_eligible(&self, now: Ticks) -> bool {
        self.arrival_time <= now && !self.is_completed()
    }

    /// Time spent waiting for the CPU so far, counted from arrival.
    pub fn waited(&self, now: Ticks) -> Ticks {
        now.saturating_sub(self.arrival_time)
    }

    /// Clears every runtime field so the record can be simulated again.
    pub fn reset(&mut self) {
        *self = Self::new(self.pid, self.arrival_time, self.burst_time, self.priority);
    }

    // Returns true on the first dispatch
    pub(crate) fn mark_running(&mut self, now: Ticks) -> bool {
        debug_assert!(!self.is_completed(), "P{} dispatched after completion", self.pid);
        self.state = ProcessState::Running;
        if self.starting_time.is_some() {
            return false;
        }
        self.starting_time = Some(now);
        self.response_time = Some(now - self.arrival_time);
        true
    }

    pub(crate) fn mark_ready(&mut self) {
        debug_assert!(self.state == ProcessState::Running);
        self.state = ProcessState::Ready;
    }

    pub(crate) fn consume(&mut self, units: Ticks) {
        debug_assert!(
            units <= self.remaining_time,
            "P{} would overrun its burst ({} > {})",
            self.pid,
            units,
            self.remaining_time
        );
        self.remaining_time -= units;
    }

    pub(crate) fn mark_completed(&mut self, now: Ticks) {
        debug_assert_eq!(self.remaining_time, 0, "P{} completed with work left", self.pid);
        debug_assert!(
            self.state == ProcessState::Running,
            "P{} must have been running before marked complete",
            self.pid
        );

        let turnaround = now - self.arrival_time;
        self.state = ProcessState::Completed;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }
}

/// Everything a single simulation run owns: the clock, the CPU and a private
/// table of processes.
#[derive(Debug, Clone)]
pub struct SimCtx {
    now: Ticks,
    cpu: CpuState,
    tasks: Vec<Process>,
    completed: usize,
}

impl SimCtx {
    pub fn new(tasks: Vec<Process>) -> Self {
        for (index, task) in tasks.iter().enumerate() {
            debug_assert_eq!(task.pid, index + 1, "Pid must match table position");
        }
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        Self {
            now: 0,
            cpu: CpuState::Idle,
            tasks,
            completed,
        }
    }

    /// Upper bound on the clock for a run over `tasks`: the CPU can idle only
    /// until the latest arrival, and busy time totals the bursts. `None` when
    /// that does not fit in `Ticks`.
    pub fn horizon(tasks: &[Process]) -> Option<Ticks> {
        let latest_arrival = tasks.iter().map(Process::arrival_time).max().unwrap_or(0);
        tasks
            .iter()
            .try_fold(latest_arrival, |total, t| total.checked_add(t.burst_time()))
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn cpu(&self) -> CpuState {
        self.cpu
    }

    pub fn running(&self) -> Option<Pid> {
        match self.cpu {
            CpuState::Running(pid) => Some(pid),
            CpuState::Idle => None,
        }
    }

    pub fn tasks(&self) -> &[Process] {
        &self.tasks
    }

    pub fn task(&self, pid: Pid) -> &Process {
        &self.tasks[pid - 1]
    }

    pub(crate) fn task_mut(&mut self, pid: Pid) -> &mut Process {
        &mut self.tasks[pid - 1]
    }

    pub fn eligible(&self) -> impl Iterator<Item = &Process> + '_ {
        let now = self.now;
        self.tasks.iter().filter(move |t| t.is_eligible(now))
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    // Runs are bounded by `horizon`, checked when the core is built
    pub(crate) fn advance_time(&mut self, delta: Ticks) {
        debug_assert!(self.now.checked_add(delta).is_some(), "clock overflow");
        self.now = self.now.saturating_add(delta);
    }

    // Returns the previous CPU state
    pub(crate) fn set_running(&mut self, pid: Pid) -> CpuState {
        let prev = self.cpu;
        if let CpuState::Running(prev_pid) = prev {
            if prev_pid != pid {
                self.task_mut(prev_pid).mark_ready();
            }
        }
        self.cpu = CpuState::Running(pid);
        prev
    }

    pub(crate) fn clear_cpu(&mut self) {
        if let CpuState::Running(pid) = self.cpu {
            let task = self.task_mut(pid);
            if !task.is_completed() {
                task.mark_ready();
            }
        }
        self.cpu = CpuState::Idle;
    }

    pub(crate) fn mark_completed(&mut self, pid: Pid) {
        let now = self.now;
        self.task_mut(pid).mark_completed(now);
        self.completed += 1;
        debug_assert!(self.completed <= self.tasks.len());
        if self.cpu == CpuState::Running(pid) {
            self.cpu = CpuState::Idle;
        }
    }

    pub fn into_tasks(self) -> Vec<Process> {
        self.tasks
    }
}
