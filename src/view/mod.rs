//! Projection of a trace position into renderable views
//!
//! Every view is a pure function of `(trace, cursor)`. Nothing here keeps
//! state between calls, so the projection for a given cursor is the same no
//! matter which transitions led to it.
//!
//! # Views
//!
//! - [`SourceView`]: source lines with the current line and every line
//!   executed so far marked
//! - [`VariablesView`]: bindings of the step at the cursor
//! - [`CallStackView`]: frame chain of the step at the cursor, outermost first
//! - [`OutputView`]: cumulative program output at the cursor
//!
//! [`project`] builds all four at once into a [`Projection`], which the
//! session hands to its [`ViewSink`].

mod sink;

pub use sink::{ProjectionCache, ViewSink};

use crate::config::{FRAME_SEPARATOR, NO_OUTPUT, NO_VARIABLES, TOP_LEVEL};
use crate::trace::{ExecutionStep, Trace};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt;

/// Where the cursor sits in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub total: usize,
}

impl Position {
    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.total
    }
}

/// One line of the source pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    pub text: String,
    pub current: bool,
    pub executed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceView {
    pub lines: Vec<SourceLine>,
    /// Line number reported by the step, even when it is not in the source
    pub reported_line: usize,
}

impl SourceView {
    /// The highlighted line, if the step's line exists in the source
    pub fn current_line(&self) -> Option<usize> {
        self.lines.iter().find(|l| l.current).map(|l| l.number)
    }

    /// Numbers of the source lines marked executed
    pub fn executed_lines(&self) -> BTreeSet<usize> {
        self.lines
            .iter()
            .filter(|l| l.executed)
            .map(|l| l.number)
            .collect()
    }
}

/// A `name = value` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: String,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariablesView {
    Empty,
    Bindings(Vec<Binding>),
}

impl VariablesView {
    pub fn lines(&self) -> Vec<String> {
        match self {
            VariablesView::Empty => vec![NO_VARIABLES.to_string()],
            VariablesView::Bindings(bindings) => bindings.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStackView {
    TopLevel,
    /// Frames, outermost first
    Chain(Vec<String>),
}

impl fmt::Display for CallStackView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallStackView::TopLevel => f.write_str(TOP_LEVEL),
            CallStackView::Chain(frames) => f.write_str(&frames.join(FRAME_SEPARATOR)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView {
    Empty,
    Lines(Vec<String>),
}

impl OutputView {
    pub fn lines(&self) -> Vec<String> {
        match self {
            OutputView::Empty => vec![NO_OUTPUT.to_string()],
            OutputView::Lines(lines) => lines.clone(),
        }
    }
}

/// Everything the views show for one cursor position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub position: Position,
    pub source: SourceView,
    pub variables: VariablesView,
    pub call_stack: CallStackView,
    pub output: OutputView,
}

/// Project all views for `cursor`. Out of range cursors are clamped to the
/// last step.
pub fn project(trace: &Trace, cursor: usize) -> Projection {
    let index = cursor.min(trace.last_index());
    let step = &trace.steps()[index];

    Projection {
        position: Position {
            index,
            total: trace.len(),
        },
        source: project_source(trace, index),
        variables: project_variables(step),
        call_stack: project_call_stack(step),
        output: project_output(step),
    }
}

/// Lines of every step up to and including `cursor`
pub fn executed_lines(trace: &Trace, cursor: usize) -> BTreeSet<usize> {
    trace
        .steps()
        .iter()
        .take(cursor.saturating_add(1))
        .map(|step| step.line)
        .collect()
}

pub fn project_source(trace: &Trace, cursor: usize) -> SourceView {
    let steps = trace.steps();
    let index = cursor.min(trace.last_index());
    let current = steps[index].line;

    let executed: FxHashSet<usize> = steps[..=index].iter().map(|step| step.line).collect();

    let lines = trace
        .source_lines()
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let number = idx + 1;
            SourceLine {
                number,
                text: text.clone(),
                current: number == current,
                executed: executed.contains(&number),
            }
        })
        .collect();

    SourceView {
        lines,
        reported_line: current,
    }
}

pub fn project_variables(step: &ExecutionStep) -> VariablesView {
    if step.variables.is_empty() {
        return VariablesView::Empty;
    }
    VariablesView::Bindings(
        step.variables
            .iter()
            .map(|(name, value)| Binding {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
    )
}

pub fn project_call_stack(step: &ExecutionStep) -> CallStackView {
    if step.call_stack.is_empty() {
        CallStackView::TopLevel
    } else {
        CallStackView::Chain(step.call_stack.clone())
    }
}

pub fn project_output(step: &ExecutionStep) -> OutputView {
    if step.output.is_empty() {
        OutputView::Empty
    } else {
        OutputView::Lines(step.output.clone())
    }
}
