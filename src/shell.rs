//! Compositor collaborator contracts.
//!
//! Everything the controller needs from the window system is expressed here
//! as narrow traits: application lookup and launch, logical window frame
//! operations, and the window's visual layer (its actor) for clipping and
//! slide transitions. Handles are cheap clones of reference-counted shell
//! objects; the controller clones them out of its cells rather than holding
//! borrows across awaits.

use std::time::Duration;

use async_trait::async_trait;

use crate::easing::Curve;
use crate::events::ActorId;
use crate::geometry::Rect;

/// Entry point into the window system.
pub trait Compositor {
    type App: AppHandle<Window = Self::Window>;
    type Window: WindowHandle<Actor = Self::Actor>;
    type Actor: ActorHandle;
    type Hider: WindowHider;

    /// Resolve an application identifier to a running-application handle.
    fn lookup_app(&self, app_id: &str) -> Option<Self::App>;

    /// Give `window` input focus, restoring it if minimized.
    fn activate(&self, window: &Self::Window);

    /// Suppress the window manager's next default transition effect on `actor`.
    fn skip_next_effect(&self, actor: &Self::Actor);

    /// Cancel any effect the window manager is running on `actor` right now.
    fn kill_window_effects(&self, actor: &Self::Actor);

    /// Number of connected monitors.
    fn monitor_count(&self) -> usize;

    /// Build the collaborator that keeps `window` out of switchers and
    /// overviews while it is managed. Opaque to the controller apart from
    /// [`WindowHider::destroy`].
    fn window_hider(&self, window: &Self::Window) -> Self::Hider;
}

/// A running application as seen by the shell's registry.
pub trait AppHandle: Clone {
    type Window;

    /// Ask the application to open a fresh window.
    fn open_new_window(&self);

    fn window_count(&self) -> usize;

    /// The application's windows, most recently created first.
    fn windows(&self) -> Vec<Self::Window>;
}

/// Logical window frame operations.
pub trait WindowHandle: Clone {
    type Actor;

    fn has_focus(&self) -> bool;

    /// Whether the window is currently hidden or minimized.
    fn is_hidden(&self) -> bool;

    fn minimize(&self);

    fn move_to_monitor(&self, monitor: usize);

    /// Reposition and resize the window frame. `interactive` distinguishes a
    /// user-driven resize grab from a programmatic one; the controller always
    /// passes `false`.
    fn move_resize_frame(&self, interactive: bool, frame: Rect);

    fn work_area_for_monitor(&self, monitor: usize) -> Rect;

    /// Keep the window present on every workspace.
    fn stick(&self);

    /// The window's compositor actor, absent while the window has no visual
    /// representation yet.
    fn actor(&self) -> Option<Self::Actor>;
}

/// The on-screen visual layer of a window, distinct from its logical frame.
#[async_trait(?Send)]
pub trait ActorHandle: Clone {
    fn id(&self) -> ActorId;

    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn translation_y(&self) -> f64;
    fn set_translation_y(&self, y: f64);

    fn set_clip(&self, x: f64, y: f64, width: f64, height: f64);
    fn remove_clip(&self);

    /// Raise the actor above all of its siblings.
    fn raise_to_top(&self);

    /// Animate the vertical translation to `target`, resolving when the
    /// transition completes.
    async fn ease_translation_y(&self, target: f64, duration: Duration, curve: Curve);
}

/// Keeps the managed window out of window switchers; released on destroy.
pub trait WindowHider {
    fn destroy(self);
}
