//! Constants shared by the playback engine, the tracer client and the UI.

use std::time::Duration;

/// Tracing service used when `--server` is not given
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Path of the tracing endpoint, relative to the server URL
pub const EXECUTE_PATH: &str = "/execute";

/// Timeout for a single trace request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Autoplay cadence
pub const DEFAULT_PLAY_INTERVAL: Duration = Duration::from_millis(1000);

/// Largest program the tracing service accepts (in characters)
pub const MAX_SOURCE_CHARS: usize = 10_000;

/// Extension required for submitted source files
pub const SOURCE_EXTENSION: &str = "py";

// Indicators shown when a view has nothing to display
pub const NO_VARIABLES: &str = "No variables yet";
pub const TOP_LEVEL: &str = "(top level)";
pub const NO_OUTPUT: &str = "No output yet";

/// Separator between call stack frames (outermost first)
pub const FRAME_SEPARATOR: &str = " → ";
