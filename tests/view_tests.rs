// Tests for the view projections

use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use stepscope::trace::{ExecutionStep, Trace};
use stepscope::view::{
    executed_lines, project, Binding, CallStackView, OutputView, VariablesView,
};

fn trace_over(lines: &[usize], source_len: usize) -> Trace {
    let source: Vec<String> = (1..=source_len).map(|n| format!("line{}", n)).collect();
    let steps = lines.iter().map(|&line| ExecutionStep::new(line)).collect();
    Trace::new(steps, &source.join("\n")).unwrap()
}

#[test]
fn test_exactly_one_current_line() {
    let trace = trace_over(&[1, 3, 2, 3], 4);
    for cursor in 0..trace.len() {
        let projection = project(&trace, cursor);
        let current: Vec<usize> = projection
            .source
            .lines
            .iter()
            .filter(|l| l.current)
            .map(|l| l.number)
            .collect();
        assert_eq!(current, vec![trace.steps()[cursor].line]);
    }
}

#[test]
fn test_executed_set_matches_prefix() {
    let lines = [2, 4, 2, 5, 1, 4];
    let trace = trace_over(&lines, 6);
    for cursor in 0..lines.len() {
        let expected: BTreeSet<usize> = lines[..=cursor].iter().copied().collect();
        assert_eq!(executed_lines(&trace, cursor), expected);
        assert_eq!(project(&trace, cursor).source.executed_lines(), expected);
    }
}

#[test]
fn test_executed_set_keeps_out_of_range_lines() {
    let trace = trace_over(&[1, 999], 5);
    assert_eq!(executed_lines(&trace, 1), BTreeSet::from([1, 999]));
    // Only real source lines can be marked
    assert_eq!(project(&trace, 1).source.executed_lines(), BTreeSet::from([1]));
}

#[test]
fn test_cursor_past_end_is_clamped() {
    let trace = trace_over(&[1, 2], 2);
    assert_eq!(project(&trace, 50), project(&trace, 1));
    assert_eq!(project(&trace, 50).position.index, 1);
}

#[test]
fn test_variables_render_name_equals_value() {
    let step = ExecutionStep::new(1)
        .with_variable("total", "42")
        .with_variable("name", "'bob'");
    let trace = Trace::new(vec![step], "x").unwrap();
    let projection = project(&trace, 0);

    assert_eq!(
        projection.variables,
        VariablesView::Bindings(vec![
            Binding {
                name: "name".to_string(),
                value: "'bob'".to_string()
            },
            Binding {
                name: "total".to_string(),
                value: "42".to_string()
            },
        ])
    );
    assert_eq!(projection.variables.lines(), vec!["name = 'bob'", "total = 42"]);
}

#[test]
fn test_empty_views_have_indicators() {
    let trace = Trace::new(vec![ExecutionStep::new(1)], "x = 1").unwrap();
    let projection = project(&trace, 0);

    assert_eq!(projection.variables, VariablesView::Empty);
    assert_eq!(projection.variables.lines(), vec!["No variables yet"]);
    assert_eq!(projection.call_stack, CallStackView::TopLevel);
    assert_eq!(projection.call_stack.to_string(), "(top level)");
    assert_eq!(projection.output, OutputView::Empty);
    assert_eq!(projection.output.lines(), vec!["No output yet"]);
}

#[test]
fn test_call_stack_chain() {
    let step = ExecutionStep::new(2)
        .with_frame("example")
        .with_frame("helper");
    let trace = Trace::new(vec![step], "a\nb").unwrap();
    assert_eq!(project(&trace, 0).call_stack.to_string(), "example → helper");
}

#[test]
fn test_output_is_taken_verbatim() {
    let steps = vec![
        ExecutionStep::new(1).with_output("first"),
        ExecutionStep::new(2).with_output("first").with_output("second"),
    ];
    let trace = Trace::new(steps, "a\nb").unwrap();

    assert_eq!(project(&trace, 0).output.lines(), vec!["first"]);
    assert_eq!(project(&trace, 1).output.lines(), vec!["first", "second"]);
    // Going back shows the earlier step's output, not an accumulation
    assert_eq!(project(&trace, 0).output.lines(), vec!["first"]);
}

#[test]
fn test_position_reports_ends() {
    let trace = trace_over(&[1, 2, 3], 3);
    assert!(project(&trace, 0).position.at_start());
    assert!(project(&trace, 2).position.at_end());
    assert!(!project(&trace, 1).position.at_end());
    assert_eq!(project(&trace, 1).position.total, 3);
}
