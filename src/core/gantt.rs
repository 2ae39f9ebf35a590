use super::state::{Pid, Ticks};
use serde::{Serialize, Serializer, ser::SerializeTuple};
use std::fmt;

/// A point on the timeline. `pid == None` is the end-of-simulation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GanttEvent {
    pub time: Ticks,
    pub pid: Option<Pid>,
}

impl GanttEvent {
    pub fn label(&self) -> Option<String> {
        self.pid.map(|pid| format!("P{pid}"))
    }
}

// Serialized as the `(time, label)` pair consumers render
impl Serialize for GanttEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.time)?;
        tuple.serialize_element(&self.label())?;
        tuple.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GanttChart {
    events: Vec<GanttEvent>,
}

impl GanttChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `(time, pid)` unless `pid` is already the last process recorded.
    /// Returns whether an event was appended.
    pub fn record(&mut self, time: Ticks, pid: Pid) -> bool {
        if self.last_pid() == Some(pid) {
            return false;
        }
        self.push(GanttEvent {
            time,
            pid: Some(pid),
        });
        true
    }

    /// Closes the chart with the end marker.
    pub fn finish(&mut self, time: Ticks) {
        debug_assert!(!self.is_finished(), "Gantt chart finished twice");
        self.push(GanttEvent { time, pid: None });
    }

    fn push(&mut self, event: GanttEvent) {
        debug_assert!(!self.is_finished(), "event appended after end marker");
        if let Some(last) = self.events.last() {
            debug_assert!(
                last.time <= event.time,
                "Gantt time went backwards: {} -> {}",
                last.time,
                event.time
            );
        }
        self.events.push(event);
    }

    pub fn last_pid(&self) -> Option<Pid> {
        self.events.last().and_then(|e| e.pid)
    }

    pub fn is_finished(&self) -> bool {
        self.events.last().is_some_and(|e| e.pid.is_none())
    }

    pub fn end_time(&self) -> Option<Ticks> {
        self.events
            .last()
            .filter(|e| e.pid.is_none())
            .map(|e| e.time)
    }

    pub fn events(&self) -> &[GanttEvent] {
        &self.events
    }

    /// The timeline as `(time, label)` pairs.
    pub fn labels(&self) -> Vec<(Ticks, Option<String>)> {
        self.events.iter().map(|e| (e.time, e.label())).collect()
    }

    /// Number of times the CPU switched to a different process.
    pub fn switches(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.pid.is_some())
            .count()
            .saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// Two rows: labels centred over their start times, then the times
impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = String::new();
        let mut times = String::new();
        for event in &self.events {
            if let Some(label) = event.label() {
                labels.push_str(&format!("{label:^10}"));
            }
            times.push_str(&format!("{:<10}", event.time));
        }
        writeln!(f, "{}", labels.trim_end())?;
        write!(f, "{}", times.trim_end())
    }
}
