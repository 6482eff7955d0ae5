// Rendering smoke tests against ratatui's test backend

use ratatui::{backend::TestBackend, Terminal};
use std::path::PathBuf;
use std::sync::Arc;
use stepscope::client::RecordedTracer;
use stepscope::playback::Session;
use stepscope::trace::{ExecutionStep, Trace};
use stepscope::ui::App;
use stepscope::view::ProjectionCache;

const EXAMPLE: &str = "def example():
    a = 5
    b = a + 3
    print(b)

example()";

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn app() -> App {
    App::new(
        Session::new(ProjectionCache::new()),
        Arc::new(RecordedTracer::new("unused.json")),
        PathBuf::from("example.py"),
    )
}

fn example_trace() -> Trace {
    let steps = vec![
        ExecutionStep::new(2)
            .with_variable("a", "5")
            .with_frame("example"),
        ExecutionStep::new(3)
            .with_variable("a", "5")
            .with_variable("b", "8")
            .with_frame("example"),
        ExecutionStep::new(4)
            .with_variable("a", "5")
            .with_variable("b", "8")
            .with_frame("example")
            .with_output("8"),
    ];
    Trace::new(steps, EXAMPLE).unwrap()
}

#[test]
fn test_renders_all_views_for_first_step() {
    let mut app = app();
    app.session.load(example_trace());

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("Source Code"));
    assert!(text.contains("def example():"));
    assert!(text.contains("a = 5"));
    assert!(!text.contains("b = 8"));
    assert!(text.contains("No output yet"));
    assert!(text.contains("example()"));
    assert!(text.contains("Step 1/3"));
    assert!(text.contains("Line 2"));
}

#[test]
fn test_renders_last_step() {
    let mut app = app();
    app.session.load(example_trace());
    app.session.jump_to_end().unwrap();

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("b = 8"));
    assert!(!text.contains("No output yet"));
    assert!(text.contains("Step 3/3"));
    assert!(text.contains("Line 4"));
    assert!(text.contains("END"));
}

#[test]
fn test_renders_line_outside_source() {
    let mut app = app();
    let steps = vec![ExecutionStep::new(999).with_variable("a", "5")];
    app.session.load(Trace::new(steps, EXAMPLE).unwrap());

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("Step 1/1"));
    assert!(text.contains("Line 999"));
    assert!(text.contains("a = 5"));
}

#[test]
fn test_renders_idle_placeholders() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let text = screen(&terminal);

    assert!(text.contains("No variables yet"));
    assert!(text.contains("(top level)"));
    assert!(text.contains("Step -/-"));
    assert!(!text.contains("Line "));
}
