//! Shared crate-wide constants.

use std::time::Duration;

/// How long a launch may wait for the application to report its first
/// window before the attempt is abandoned.
///
/// The deadline and the windows-changed signal are mutually exclusive:
/// whichever resolves first cancels the other. Expiry surfaces as
/// [`QuakeError::LaunchTimeout`](crate::controller::QuakeError::LaunchTimeout)
/// and kills the controller.
pub const LAUNCH_TIMEOUT: Duration = Duration::from_millis(5000);
