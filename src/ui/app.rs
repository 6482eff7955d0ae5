//! Main TUI application state and logic

use crate::client::TracerClient;
use crate::errors::{LoadError, PlaybackError};
use crate::playback::{LoadOutcome, LoadTicket, PlayOutcome, Session, StepOutcome};
use crate::source::read_source;
use crate::trace::ExecutionStep;
use crate::ui::panes::{self, SourceScrollState, StatusRenderData};
use crate::view::{CallStackView, OutputView, ProjectionCache, SourceLine, VariablesView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{error, info};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// A tracer response together with the ticket of the request it answers
type LoadResponse = (LoadTicket, Result<Vec<ExecutionStep>, LoadError>);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Variables,
    Stack,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> variables -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Source,
        }
    }
}

/// Failed load shown in the error popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub title: String,
    pub message: String,
}

impl From<&LoadError> for ErrorState {
    fn from(err: &LoadError) -> Self {
        ErrorState {
            title: err.title().to_string(),
            message: err.message(),
        }
    }
}

/// The main application state
pub struct App {
    /// Playback session; its sink holds the projection to draw
    pub session: Session<ProjectionCache>,

    tracer: Arc<dyn TracerClient>,

    /// File the program is read from
    pub source_path: PathBuf,

    /// Text of the most recent submission, shown before a trace arrives
    pub submitted_code: String,

    responses_tx: Sender<LoadResponse>,
    responses_rx: Receiver<LoadResponse>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub variables_scroll: usize,
    pub stack_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Error popup, if one is showing
    pub error: Option<ErrorState>,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app that traces `source_path` with `tracer`
    pub fn new(
        session: Session<ProjectionCache>,
        tracer: Arc<dyn TracerClient>,
        source_path: PathBuf,
    ) -> Self {
        let (responses_tx, responses_rx) = mpsc::channel();
        App {
            session,
            tracer,
            source_path,
            submitted_code: String::new(),
            responses_tx,
            responses_rx,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            variables_scroll: 0,
            stack_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            error: None,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Read the source file and submit it for tracing
    pub fn submit(&mut self) {
        match read_source(&self.source_path) {
            Ok(code) => self.submit_code(code),
            Err(e) => self.show_error(&LoadError::from(e)),
        }
    }

    /// Submit `code` for tracing on a worker thread
    pub fn submit_code(&mut self, code: String) {
        let ticket = self.session.begin_load(code.clone());
        self.submitted_code = code.clone();
        self.error = None;
        self.status_message = "Processing...".to_string();

        let tracer = Arc::clone(&self.tracer);
        let tx = self.responses_tx.clone();
        thread::spawn(move || {
            let result = tracer.trace(&code);
            // The receiver only goes away when the app exits
            let _ = tx.send((ticket, result));
        });
    }

    /// Apply any tracer responses that have arrived. Returns how many were handled.
    pub fn poll_responses(&mut self) -> usize {
        let mut handled = 0;
        while let Ok((ticket, result)) = self.responses_rx.try_recv() {
            self.apply_response(ticket, result);
            handled += 1;
        }
        handled
    }

    fn apply_response(&mut self, ticket: LoadTicket, result: Result<Vec<ExecutionStep>, LoadError>) {
        match self.session.complete_load(ticket, result) {
            Ok(LoadOutcome::Installed { steps, malformed }) => {
                self.source_scroll = SourceScrollState::default();
                self.variables_scroll = 0;
                self.stack_scroll = 0;
                self.output_scroll = 0;
                self.status_message = if malformed.is_empty() {
                    format!("Loaded {} steps", steps)
                } else {
                    format!(
                        "Loaded {} steps ({} outside the source)",
                        steps,
                        malformed.len()
                    )
                };
            }
            Ok(LoadOutcome::Discarded) => {}
            Err(e) => self.show_error(&e),
        }
    }

    fn show_error(&mut self, err: &LoadError) {
        error!("load failed: {}", err);
        self.status_message = err.title().to_string();
        self.error = Some(ErrorState::from(err));
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.poll_responses();

            // Handle auto-play mode
            if self.session.is_playing() {
                if self.session.tick() > 0 {
                    self.status_message = "Playing...".to_string();
                    self.output_scroll = usize::MAX;
                }
                if !self.session.is_playing() {
                    self.status_message = "Playback complete".to_string();
                }
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        info!("quitting");
        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Variables (top) | Call Stack (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let projection = self.session.sink().latest().cloned();

        match &projection {
            Some(projection) => {
                panes::render_source_pane(
                    frame,
                    left_rows[0],
                    &projection.source.lines,
                    projection.source.current_line(),
                    self.focused_pane == FocusedPane::Source,
                    &mut self.source_scroll,
                );
                panes::render_terminal_pane(
                    frame,
                    left_rows[1],
                    &projection.output,
                    self.focused_pane == FocusedPane::Output,
                    &mut self.output_scroll,
                );
                panes::render_variables_pane(
                    frame,
                    right_rows[0],
                    &projection.variables,
                    self.focused_pane == FocusedPane::Variables,
                    &mut self.variables_scroll,
                );
                panes::render_stack_pane(
                    frame,
                    right_rows[1],
                    &projection.call_stack,
                    self.focused_pane == FocusedPane::Stack,
                    &mut self.stack_scroll,
                );
            }
            None => {
                // Nothing traced yet: show the submitted code unmarked
                let lines: Vec<SourceLine> = self
                    .submitted_code
                    .lines()
                    .enumerate()
                    .map(|(idx, text)| SourceLine {
                        number: idx + 1,
                        text: text.to_string(),
                        current: false,
                        executed: false,
                    })
                    .collect();
                panes::render_source_pane(
                    frame,
                    left_rows[0],
                    &lines,
                    None,
                    self.focused_pane == FocusedPane::Source,
                    &mut self.source_scroll,
                );
                panes::render_terminal_pane(
                    frame,
                    left_rows[1],
                    &OutputView::Empty,
                    self.focused_pane == FocusedPane::Output,
                    &mut self.output_scroll,
                );
                panes::render_variables_pane(
                    frame,
                    right_rows[0],
                    &VariablesView::Empty,
                    self.focused_pane == FocusedPane::Variables,
                    &mut self.variables_scroll,
                );
                panes::render_stack_pane(
                    frame,
                    right_rows[1],
                    &CallStackView::TopLevel,
                    self.focused_pane == FocusedPane::Stack,
                    &mut self.stack_scroll,
                );
            }
        }

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                position: projection.as_ref().map(|p| p.position),
                line: projection.as_ref().map(|p| p.source.reported_line),
                is_playing: self.session.is_playing(),
                is_loading: self.session.is_loading(),
                has_error: self.error.is_some(),
            },
        );

        if let Some(error) = &self.error {
            panes::render_error_popup(frame, size, &error.title, &error.message);
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.error.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.error = None,
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.submit();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                let result = self.session.step_backward();
                self.report_step(result, "backward");
            }
            KeyCode::Right => {
                let result = self.session.step_forward();
                self.report_step(result, "forward");
            }
            KeyCode::Up => self.scroll(-1),
            KeyCode::Down => self.scroll(1),
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.status_message = match self.session.toggle_play() {
                        Ok(PlayOutcome::Playing) => "Playing...".to_string(),
                        Ok(PlayOutcome::Paused) => "Paused".to_string(),
                        Ok(PlayOutcome::AtEnd) => "Already at the last step".to_string(),
                        Err(e) => refused(e),
                    };
                }
            }
            KeyCode::Enter => {
                self.status_message = match self.session.jump_to_end() {
                    Ok(_) => "Jumped to end".to_string(),
                    Err(e) => refused(e),
                };
                self.output_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.status_message = match self.session.reset() {
                    Ok(()) => "Reset to start".to_string(),
                    Err(e) => refused(e),
                };
            }
            _ => {}
        }
    }

    fn report_step(&mut self, result: Result<StepOutcome, PlaybackError>, direction: &str) {
        self.status_message = match result {
            Ok(StepOutcome::Moved { at_end: true, .. }) => "Reached the last step".to_string(),
            Ok(StepOutcome::Moved { .. }) => format!("Stepped {}", direction),
            Ok(StepOutcome::Boundary) => "Cannot step forward: already at the last step".to_string(),
            Ok(StepOutcome::AtStart) => {
                "Cannot step backward: already at the first step".to_string()
            }
            Err(e) => refused(e),
        };
        // Auto-scroll output to bottom
        self.output_scroll = usize::MAX;
    }

    fn scroll(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Source => {
                // Scrolling down moves the current line up visually
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_add_signed(-delta));
                }
            }
            FocusedPane::Variables => {
                self.variables_scroll = self.variables_scroll.saturating_add_signed(delta)
            }
            FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_add_signed(delta),
            FocusedPane::Output => {
                self.output_scroll = self.output_scroll.saturating_add_signed(delta)
            }
        }
    }
}

fn refused(err: PlaybackError) -> String {
    match err {
        PlaybackError::NoTrace => "No trace loaded".to_string(),
        PlaybackError::LoadPending => "Waiting for the tracer...".to_string(),
    }
}
