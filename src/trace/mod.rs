// Trace storage for step-by-step replay

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded snapshot of program state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStep {
    /// 1-based source line about to execute
    pub line: usize,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// Frame names, outermost first
    #[serde(default)]
    pub call_stack: Vec<String>,
    /// All output emitted up to and including this step
    #[serde(default)]
    pub output: Vec<String>,
}

impl ExecutionStep {
    pub fn new(line: usize) -> Self {
        ExecutionStep {
            line,
            variables: BTreeMap::new(),
            call_stack: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.call_stack.push(frame.into());
        self
    }

    pub fn with_output(mut self, line: impl Into<String>) -> Self {
        self.output.push(line.into());
        self
    }
}

/// The steps of one run, paired with the source they were recorded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<ExecutionStep>,
    source_lines: Vec<String>,
}

#[allow(clippy::len_without_is_empty)] // Never empty once constructed
impl Trace {
    /// Build a trace. Returns `None` for an empty step list, since a loaded
    /// trace always has a step at the cursor.
    pub fn new(steps: Vec<ExecutionStep>, source: &str) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Trace {
            steps,
            source_lines: source.lines().map(|line| line.to_string()).collect(),
        })
    }

    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    /// Number of steps (always at least one)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    /// Whether `line` names a line of the source
    pub fn has_line(&self, line: usize) -> bool {
        line >= 1 && line <= self.source_lines.len()
    }

    /// Indices of steps whose line falls outside the source text
    pub fn malformed_steps(&self) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| !self.has_line(step.line))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Holds the trace of the currently loaded run
#[derive(Debug, Default)]
pub struct TraceStore {
    trace: Option<Trace>,
}

impl TraceStore {
    pub fn new() -> Self {
        TraceStore { trace: None }
    }

    /// Replace the loaded trace wholesale
    pub fn load(&mut self, trace: Trace) {
        self.trace = Some(trace);
    }

    /// Drop the loaded trace
    pub fn clear(&mut self) {
        self.trace = None;
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Check if no trace is loaded
    pub fn is_empty(&self) -> bool {
        self.trace.is_none()
    }

    /// Get the number of steps (zero when nothing is loaded)
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_steps_are_not_a_trace() {
        assert!(Trace::new(Vec::new(), "x = 1").is_none());
    }

    #[test]
    fn test_malformed_steps_are_reported() {
        let steps = vec![ExecutionStep::new(1), ExecutionStep::new(999), ExecutionStep::new(0)];
        let trace = Trace::new(steps, "a\nb\nc\nd\ne").unwrap();
        assert_eq!(trace.malformed_steps(), vec![1, 2]);
    }

    #[test]
    fn test_crlf_source_lines_are_stripped() {
        let trace = Trace::new(vec![ExecutionStep::new(2)], "a = 1\r\nb = 2\r\n").unwrap();
        assert_eq!(trace.source_lines().join("|"), "a = 1|b = 2");
        assert!(trace.has_line(2));
        assert!(!trace.has_line(3));
    }

    #[test]
    fn test_load_replaces_previous_trace() {
        let mut store = TraceStore::new();
        assert!(store.is_empty());

        store.load(Trace::new(vec![ExecutionStep::new(1)], "a").unwrap());
        store.load(Trace::new(vec![ExecutionStep::new(1), ExecutionStep::new(2)], "a\nb").unwrap());
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
