mod quake_controller;

pub use quake_controller::QuakeController;

use thiserror::Error;

/// Lifecycle of a managed quake-mode application.
///
/// States only move forward `Initial -> Ready -> Starting -> Running`, or
/// jump to `Dead` from anywhere. `Dead` is terminal; a new controller must
/// be constructed for a subsequent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Construction in progress; no operations accepted yet.
    Initial,
    /// Application resolved, no window yet; a toggle launches.
    Ready,
    /// Launch issued; awaiting the first window.
    Starting,
    /// Window captured and under management.
    Running,
    /// Terminal; all resources released.
    Dead,
}

#[derive(Debug, Error)]
pub enum QuakeError {
    #[error("application '{0}' not found")]
    AppNotFound(String),
    #[error("launch '{0}' timed out")]
    LaunchTimeout(String),
    #[error("application '{0}' reported a window change with no windows")]
    LaunchEmpty(String),
}
