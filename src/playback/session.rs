//! Session controller: the only place the cursor changes
//!
//! A [`Session`] ties together the [`TraceStore`], the [`Cursor`], the
//! autoplay [`Scheduler`] and a [`ViewSink`]. Each public transition runs
//! synchronously to completion and, if it moved the cursor or installed a
//! trace, publishes exactly one [`Projection`](crate::view::Projection)
//! before returning.
//!
//! # Loading
//!
//! Trace requests are asynchronous from the session's point of view:
//! [`Session::begin_load`] issues a [`LoadTicket`] and
//! [`Session::complete_load`] accepts the response for it. Only the newest
//! ticket is honoured; late responses for older tickets are discarded. While
//! a request is outstanding every playback transition is refused with
//! [`PlaybackError::LoadPending`].

use super::cursor::Cursor;
use super::scheduler::{Clock, Scheduler, SystemClock};
use crate::config::DEFAULT_PLAY_INTERVAL;
use crate::errors::{LoadError, PlaybackError};
use crate::trace::{ExecutionStep, Trace, TraceStore};
use crate::view::{self, Projection, ViewSink};
use log::{debug, info, warn};
use std::time::Duration;

/// Playback state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No trace loaded
    Idle,
    /// Trace loaded, not advancing
    Ready,
    /// A manual step is being applied; back to `Ready` once the call returns
    Stepping,
    /// Autoplay is running
    Playing,
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { index: usize, at_end: bool },
    /// Already at the last step; nothing changed
    Boundary,
    /// Already at the first step; nothing changed
    AtStart,
}

impl StepOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }

    /// True when no further forward step is possible
    pub fn reached_end(&self) -> bool {
        matches!(
            self,
            StepOutcome::Boundary | StepOutcome::Moved { at_end: true, .. }
        )
    }
}

/// Result of toggling autoplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Playing,
    Paused,
    /// Toggled at the last step: playback stopped without advancing
    AtEnd,
}

/// Correlates a trace response with the request that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Result of a completed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Installed {
        steps: usize,
        /// Steps whose line is outside the source; rendered without a current line
        malformed: Vec<usize>,
    },
    /// Response for a superseded request; nothing changed
    Discarded,
}

#[derive(Debug)]
struct PendingLoad {
    ticket: LoadTicket,
    source: String,
}

/// Replay session over one trace at a time
pub struct Session<V: ViewSink, C: Clock = SystemClock> {
    store: TraceStore,
    cursor: Option<Cursor>,
    state: PlaybackState,
    scheduler: Scheduler,
    sink: V,
    clock: C,
    next_ticket: u64,
    pending: Option<PendingLoad>,
}

impl<V: ViewSink> Session<V, SystemClock> {
    /// Session on the wall clock with the default autoplay interval
    pub fn new(sink: V) -> Self {
        Session::with_clock(sink, SystemClock::new(), DEFAULT_PLAY_INTERVAL)
    }
}

impl<V: ViewSink, C: Clock> Session<V, C> {
    pub fn with_clock(sink: V, clock: C, interval: Duration) -> Self {
        Session {
            store: TraceStore::new(),
            cursor: None,
            state: PlaybackState::Idle,
            scheduler: Scheduler::new(interval),
            sink,
            clock,
            next_ticket: 0,
            pending: None,
        }
    }

    // ========== Accessors ==========

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current step index, `None` when idle
    pub fn cursor(&self) -> Option<usize> {
        self.cursor.map(|c| c.index())
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.store.trace()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether the autoplay timer is armed
    pub fn timer_active(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether stepping controls should be enabled
    pub fn controls_enabled(&self) -> bool {
        self.cursor.is_some() && self.pending.is_none()
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut V {
        &mut self.sink
    }

    /// Recompute the projection for the current cursor
    pub fn projection(&self) -> Option<Projection> {
        let trace = self.store.trace()?;
        let cursor = self.cursor?;
        Some(view::project(trace, cursor.index()))
    }

    // ========== Loading ==========

    /// Start a trace request for `source`. Any earlier request is superseded
    /// and autoplay stops.
    pub fn begin_load(&mut self, source: impl Into<String>) -> LoadTicket {
        self.stop_playback();
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.pending = Some(PendingLoad {
            ticket,
            source: source.into(),
        });
        debug!("load {:?} started", ticket);
        ticket
    }

    /// Accept the response for `ticket`.
    ///
    /// Transport and execution errors leave the previously loaded trace (if
    /// any) active. An empty step list drops it and returns to `Idle`. A
    /// response for anything but the newest ticket is discarded.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        response: Result<Vec<ExecutionStep>, LoadError>,
    ) -> Result<LoadOutcome, LoadError> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                warn!("discarding stale response for {:?}", ticket);
                return Ok(LoadOutcome::Discarded);
            }
        }
        let Some(pending) = self.pending.take() else {
            return Ok(LoadOutcome::Discarded);
        };

        let steps = response?;
        match Trace::new(steps, &pending.source) {
            Some(trace) => Ok(self.install(trace)),
            None => {
                // A run with no steps leaves nothing to step through
                warn!("trace for {:?} has no steps", ticket);
                self.clear();
                Err(LoadError::EmptyResult)
            }
        }
    }

    /// Install a trace directly, superseding any outstanding request
    pub fn load(&mut self, trace: Trace) -> LoadOutcome {
        self.pending = None;
        self.install(trace)
    }

    /// Drop the trace and return to `Idle`
    pub fn clear(&mut self) {
        self.stop_playback();
        self.pending = None;
        self.store.clear();
        self.cursor = None;
        self.state = PlaybackState::Idle;
        self.sink.clear();
    }

    fn install(&mut self, trace: Trace) -> LoadOutcome {
        let steps = trace.len();
        let malformed = trace.malformed_steps();
        if !malformed.is_empty() {
            warn!(
                "{} step(s) reference lines outside the source: {:?}",
                malformed.len(),
                malformed
            );
        }

        self.scheduler.stop();
        self.store.load(trace);
        self.cursor = Some(Cursor::start(steps));
        self.state = PlaybackState::Ready;
        info!("loaded trace with {} steps", steps);
        self.publish();

        LoadOutcome::Installed { steps, malformed }
    }

    // ========== Transitions ==========

    /// Advance one step. Allowed while ready or playing.
    pub fn step_forward(&mut self) -> Result<StepOutcome, PlaybackError> {
        self.ready_cursor()?;
        if self.state == PlaybackState::Playing {
            return Ok(self.advance());
        }

        self.state = PlaybackState::Stepping;
        let outcome = self.advance();
        self.state = PlaybackState::Ready;
        Ok(outcome)
    }

    /// Go back one step. Pauses autoplay first.
    pub fn step_backward(&mut self) -> Result<StepOutcome, PlaybackError> {
        self.ready_cursor()?;
        self.stop_playback();

        self.state = PlaybackState::Stepping;
        let outcome = match self.cursor.as_mut() {
            Some(cursor) if !cursor.at_start() => {
                cursor.backward();
                StepOutcome::Moved {
                    index: cursor.index(),
                    at_end: false,
                }
            }
            _ => StepOutcome::AtStart,
        };
        if outcome.moved() {
            self.publish();
        }
        self.state = PlaybackState::Ready;
        debug!("step backward: {:?}", outcome);
        Ok(outcome)
    }

    /// Start or pause autoplay
    pub fn toggle_play(&mut self) -> Result<PlayOutcome, PlaybackError> {
        let cursor = self.ready_cursor()?;

        if self.state == PlaybackState::Playing {
            self.stop_playback();
            debug!("autoplay paused at step {}", cursor.index());
            return Ok(PlayOutcome::Paused);
        }

        if cursor.at_end() {
            self.stop_playback();
            return Ok(PlayOutcome::AtEnd);
        }

        self.scheduler.start(self.clock.now());
        self.state = PlaybackState::Playing;
        debug!(
            "autoplay started at step {} every {:?}",
            cursor.index(),
            self.scheduler.interval()
        );
        Ok(PlayOutcome::Playing)
    }

    /// Back to the first step with autoplay stopped
    pub fn reset(&mut self) -> Result<(), PlaybackError> {
        self.ready_cursor()?;
        self.stop_playback();
        self.seek(0);
        Ok(())
    }

    /// Move straight to `index` (clamped), pausing autoplay
    pub fn jump_to(&mut self, index: usize) -> Result<usize, PlaybackError> {
        self.ready_cursor()?;
        self.stop_playback();
        Ok(self.seek(index))
    }

    pub fn jump_to_end(&mut self) -> Result<usize, PlaybackError> {
        self.jump_to(usize::MAX)
    }

    /// Run any autoplay ticks that are due. Returns how many steps were taken.
    pub fn tick(&mut self) -> usize {
        if self.state != PlaybackState::Playing {
            return 0;
        }

        let due = self.scheduler.poll(self.clock.now());
        let mut advanced = 0;
        for _ in 0..due {
            if self.state != PlaybackState::Playing {
                break;
            }
            if self.advance().moved() {
                advanced += 1;
            }
        }
        advanced
    }

    // ========== Internals ==========

    /// The shared forward transition used by manual steps and autoplay ticks
    fn advance(&mut self) -> StepOutcome {
        let outcome = match self.cursor.as_mut() {
            Some(cursor) if !cursor.at_end() => {
                cursor.forward();
                StepOutcome::Moved {
                    index: cursor.index(),
                    at_end: cursor.at_end(),
                }
            }
            _ => StepOutcome::Boundary,
        };

        if outcome.moved() {
            self.publish();
        }
        if self.state == PlaybackState::Playing && outcome.reached_end() {
            self.stop_playback();
            debug!("autoplay reached the last step");
        }
        outcome
    }

    fn seek(&mut self, index: usize) -> usize {
        let Some(cursor) = self.cursor.as_mut() else {
            return 0;
        };
        let moved = cursor.seek(index);
        let index = cursor.index();
        if moved {
            self.publish();
        }
        index
    }

    fn stop_playback(&mut self) {
        self.scheduler.stop();
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Ready;
        }
    }

    fn ready_cursor(&self) -> Result<Cursor, PlaybackError> {
        if self.pending.is_some() {
            return Err(PlaybackError::LoadPending);
        }
        self.cursor.ok_or(PlaybackError::NoTrace)
    }

    fn publish(&mut self) {
        if let (Some(trace), Some(cursor)) = (self.store.trace(), self.cursor) {
            let projection = view::project(trace, cursor.index());
            self.sink.present(&projection);
        }
    }
}
