//! Quake-mode window control for compositor shells.
//!
//! One [`QuakeController`] manages one application window so it slides in
//! from the top screen edge like a drop-down terminal and back out again,
//! toggled by a single action. The controller owns the lifecycle state
//! machine and the show/hide animation protocol; the window system itself is
//! reached only through the narrow collaborator traits in [`shell`],
//! [`events`], and [`settings`], which keeps the sequencing logic testable
//! against fakes.
//!
//! The concurrency model is single-threaded cooperative: all work runs on a
//! tokio current-thread runtime, and "concurrency" means overlapping
//! asynchronous callbacks, never parallel execution. Hosts drive the
//! controller from inside a [`tokio::task::LocalSet`] so the fire-and-forget
//! auto-hide path can spawn locally.

pub mod constants;
pub mod controller;
pub mod easing;
pub mod events;
pub mod geometry;
pub mod settings;
pub mod shell;
pub mod tracing_sub;

pub use controller::{Lifecycle, QuakeController, QuakeError};
pub use easing::Curve;
pub use events::{ActorId, EventHub, Signal, SignalHandler, SignalPayload, Subscription};
pub use geometry::Rect;
pub use settings::{SettingKey, Settings};
pub use shell::{ActorHandle, AppHandle, Compositor, WindowHandle, WindowHider};
