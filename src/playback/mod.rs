//! Trace playback: cursor, autoplay timer and the session controller

pub mod cursor;
pub mod scheduler;
pub mod session;

pub use cursor::Cursor;
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock};
pub use session::{LoadOutcome, LoadTicket, PlayOutcome, PlaybackState, Session, StepOutcome};
