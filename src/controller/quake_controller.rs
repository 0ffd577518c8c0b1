use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tokio::time::timeout;

use super::{Lifecycle, QuakeError};
use crate::constants::LAUNCH_TIMEOUT;
use crate::easing::Curve;
use crate::events::{EventHub, Signal, Subscription};
use crate::geometry::top_slide_frame;
use crate::settings::{SettingKey, Settings};
use crate::shell::{ActorHandle, AppHandle, Compositor, WindowHandle, WindowHider};

/// Controller for a single quake-mode application window.
///
/// Drives one window of one application so it slides in from the top screen
/// edge and back out, toggled by a single action. The controller is the only
/// writer of its own state; collaborators deliver events through the
/// [`EventHub`] and [`Settings`] seams and the controller turns them into
/// lifecycle transitions.
///
/// All work runs on one thread. The controller lives in an [`Rc`] and hands
/// weak self-references to its event handlers; the auto-hide-on-focus-loss
/// path spawns onto the current [`tokio::task::LocalSet`], so hosts drive the
/// controller from inside one.
pub struct QuakeController<C, E, S>
where
    C: Compositor,
{
    weak: Weak<Self>,
    app_id: String,
    shell: Rc<C>,
    hub: Rc<E>,
    settings: Rc<S>,
    lifecycle: Cell<Lifecycle>,
    transitioning: Cell<bool>,
    app: RefCell<Option<C::App>>,
    window: RefCell<Option<C::Window>>,
    hider: RefCell<Option<C::Hider>>,
    setting_subs: RefCell<Vec<Subscription>>,
    unmanaged_sub: RefCell<Option<Subscription>>,
    focus_out_sub: RefCell<Option<Subscription>>,
}

impl<C, E, S> QuakeController<C, E, S>
where
    C: Compositor + 'static,
    E: EventHub + 'static,
    S: Settings + 'static,
{
    /// Resolve `app_id` and prepare a `Ready` controller.
    ///
    /// Fails with [`QuakeError::AppNotFound`] when the registry cannot
    /// resolve the identifier; no usable controller exists in that case.
    pub fn new(
        app_id: &str,
        shell: Rc<C>,
        hub: Rc<E>,
        settings: Rc<S>,
    ) -> Result<Rc<Self>, QuakeError> {
        crate::tracing_sub::init_default();

        let Some(app) = shell.lookup_app(app_id) else {
            return Err(QuakeError::AppNotFound(app_id.to_owned()));
        };

        let controller = Rc::new_cyclic(|weak| Self {
            weak: weak.clone(),
            app_id: app_id.to_owned(),
            shell,
            hub,
            settings,
            lifecycle: Cell::new(Lifecycle::Initial),
            transitioning: Cell::new(false),
            app: RefCell::new(Some(app)),
            window: RefCell::new(None),
            hider: RefCell::new(None),
            setting_subs: RefCell::new(Vec::new()),
            unmanaged_sub: RefCell::new(None),
            focus_out_sub: RefCell::new(None),
        });

        // Geometry-relevant settings re-place the window live for the whole
        // controller lifetime; destroy() drops these subscriptions.
        let mut subs = Vec::new();
        for key in [
            SettingKey::WidthPercent,
            SettingKey::HeightPercent,
            SettingKey::Monitor,
        ] {
            let weak = controller.weak.clone();
            subs.push(controller.settings.on_change(
                key,
                Box::new(move || {
                    if let Some(controller) = weak.upgrade() {
                        controller.place();
                    }
                }),
            ));
        }
        controller.setting_subs.replace(subs);
        controller.lifecycle.set(Lifecycle::Ready);

        Ok(controller)
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning.get()
    }

    /// The managed window, present only while `Running` (and transiently
    /// during the first placement).
    pub fn window(&self) -> Option<C::Window> {
        self.window.borrow().clone()
    }

    fn actor(&self) -> Option<C::Actor> {
        self.window().and_then(|window| window.actor())
    }

    pub fn width_percent(&self) -> i32 {
        self.settings.get_int(SettingKey::WidthPercent)
    }

    pub fn height_percent(&self) -> i32 {
        self.settings.get_int(SettingKey::HeightPercent)
    }

    pub fn focus_out(&self) -> bool {
        self.settings.get_boolean(SettingKey::FocusOut)
    }

    pub fn animation_time(&self) -> Duration {
        Duration::from_secs_f64(self.settings.get_double(SettingKey::AnimationTime).max(0.0))
    }

    /// Resolved target monitor.
    ///
    /// Clamped to the connected monitor range only once a window exists;
    /// before that the raw configured value is returned, since clamping
    /// requires querying the live monitor count.
    pub fn monitor(&self) -> i32 {
        let configured = self.settings.get_int(SettingKey::Monitor);

        if self.window.borrow().is_none() {
            return configured;
        }

        if configured < 0 {
            return 0;
        }

        let max = self.shell.monitor_count().saturating_sub(1) as i32;
        configured.min(max)
    }

    /// Toggle the managed window.
    ///
    /// `Ready`: launch the application and run the first placement; launch
    /// errors destroy the controller and propagate to the caller.
    /// `Running`: hide a focused window, show a hidden one, and bring a
    /// visible-but-unfocused one to focus without animating.
    /// Any other state: no-op, so reentrant toggles during a launch and
    /// toggles after death are ignored.
    pub async fn toggle(&self) -> Result<(), QuakeError> {
        match self.lifecycle.get() {
            Lifecycle::Ready => {
                if let Err(err) = self.launch().await {
                    tracing::warn!(app = %self.app_id, error = %err, "launch failed");
                    self.destroy();
                    return Err(err);
                }
                self.first_place().await;
                Ok(())
            }
            Lifecycle::Running => {
                let Some(window) = self.window() else {
                    return Ok(());
                };
                if window.has_focus() {
                    self.hide().await;
                } else if window.is_hidden() {
                    self.show().await;
                } else {
                    self.shell.activate(&window);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Ask the application for a new window and capture it.
    ///
    /// Resolves once the application reports a window-set change with at
    /// least one window; the [`LAUNCH_TIMEOUT`] deadline and the signal are
    /// mutually exclusive, whichever resolves first cancels the other.
    async fn launch(&self) -> Result<(), QuakeError> {
        let Some(app) = self.app.borrow().clone() else {
            return Err(QuakeError::AppNotFound(self.app_id.clone()));
        };

        self.lifecycle.set(Lifecycle::Starting);
        tracing::debug!(app = %self.app_id, "launching");
        app.open_new_window();

        let changed = self.hub.once(Signal::WindowsChanged);
        if timeout(LAUNCH_TIMEOUT, changed).await.is_err() {
            return Err(QuakeError::LaunchTimeout(self.app_id.clone()));
        }

        if app.window_count() < 1 {
            return Err(QuakeError::LaunchEmpty(self.app_id.clone()));
        }
        let Some(window) = app.windows().into_iter().next() else {
            return Err(QuakeError::LaunchEmpty(self.app_id.clone()));
        };

        self.hider.replace(Some(self.shell.window_hider(&window)));

        let weak = self.weak.clone();
        let sub = self.hub.on(
            Signal::Unmanaged,
            Box::new(move |_| {
                if let Some(controller) = weak.upgrade() {
                    controller.destroy();
                }
            }),
        );
        self.unmanaged_sub.replace(Some(sub));

        self.window.replace(Some(window));
        tracing::debug!(app = %self.app_id, "captured window");
        Ok(())
    }

    /// One-time placement choreography after a successful launch.
    ///
    /// The window starts clipped to zero visible height so the first frame
    /// never flashes at full size. Once the compositor maps our actor, the
    /// default map effect is killed, the frame is placed, and after the
    /// resulting size change completes the controller finalizes to `Running`
    /// and runs the initial show. Each resumption re-checks the state so a
    /// destroy during any wait turns the rest of the chain into a no-op.
    async fn first_place(&self) {
        let Some(window) = self.window() else {
            return;
        };
        let Some(actor) = window.actor() else {
            tracing::debug!(app = %self.app_id, "captured window has no actor");
            self.destroy();
            return;
        };

        actor.set_clip(0.0, 0.0, actor.width(), 0.0);
        window.stick();

        loop {
            let event = self.hub.once(Signal::Mapped).await;
            if self.lifecycle.get() != Lifecycle::Starting {
                return;
            }
            if event.actor == Some(actor.id()) {
                break;
            }
        }

        self.shell.kill_window_effects(&actor);

        // Subscribe before placing; the placement itself triggers the size
        // change this wait resolves on.
        let resized = self.hub.once(Signal::SizeChanged);
        self.place();
        resized.await;

        if self.lifecycle.get() != Lifecycle::Starting {
            return;
        }
        self.lifecycle.set(Lifecycle::Running);
        tracing::debug!(app = %self.app_id, "window under management");
        actor.remove_clip();
        self.show().await;
    }

    /// Slide the window in and focus it.
    ///
    /// No-op unless `Running` with no transition in flight; a call arriving
    /// mid-animation is dropped rather than queued.
    pub async fn show(&self) {
        if self.lifecycle.get() != Lifecycle::Running || self.transitioning.get() {
            return;
        }
        let Some(window) = self.window() else {
            return;
        };
        let Some(actor) = window.actor() else {
            return;
        };

        actor.raise_to_top();
        self.shell.skip_next_effect(&actor);
        self.shell.activate(&window);

        let duration = self.animation_time();
        if duration.is_zero() {
            self.finish_show(&actor);
            return;
        }

        self.transitioning.set(true);
        actor.set_translation_y(-actor.height());
        actor
            .ease_translation_y(0.0, duration, Curve::EaseOutQuart)
            .await;
        self.finish_show(&actor);
        self.transitioning.set(false);
    }

    fn finish_show(&self, actor: &C::Actor) {
        actor.set_translation_y(0.0);

        if self.lifecycle.get() != Lifecycle::Running {
            return;
        }
        if !self.focus_out() {
            return;
        }

        // Arm the auto-hide listener fresh on every show; replacing the slot
        // detaches whatever a previous cycle may have left behind.
        let weak = self.weak.clone();
        let sub = self.hub.on(
            Signal::FocusChanged,
            Box::new(move |_| {
                if let Some(controller) = weak.upgrade() {
                    controller.on_focus_changed();
                }
            }),
        );
        self.focus_out_sub.replace(Some(sub));
    }

    fn on_focus_changed(&self) {
        // Single fire: disarm before reacting.
        if self.focus_out_sub.borrow_mut().take().is_none() {
            return;
        }
        let Some(controller) = self.weak.upgrade() else {
            return;
        };
        tokio::task::spawn_local(async move {
            controller.hide().await;
        });
    }

    /// Slide the window out and minimize it.
    ///
    /// Symmetric to [`show`](Self::show): no-op unless `Running` with no
    /// transition in flight. Any pending focus-out listener is disarmed on
    /// entry, so a manual hide never leaves a stale auto-hide armed for a
    /// later cycle.
    pub async fn hide(&self) {
        if self.lifecycle.get() != Lifecycle::Running || self.transitioning.get() {
            return;
        }

        self.focus_out_sub.borrow_mut().take();

        let Some(actor) = self.actor() else {
            return;
        };

        let duration = self.animation_time();
        if duration.is_zero() {
            self.finish_hide(&actor);
            return;
        }

        self.transitioning.set(true);
        actor
            .ease_translation_y(-actor.height(), duration, Curve::EaseInQuart)
            .await;
        self.finish_hide(&actor);
        self.transitioning.set(false);
    }

    fn finish_hide(&self, actor: &C::Actor) {
        self.shell.skip_next_effect(actor);
        if let Some(window) = self.window() {
            window.minimize();
        }
        actor.set_translation_y(0.0);
    }

    /// Apply the configured geometry to the managed window.
    ///
    /// No-op without a window. Reads the percent settings and the resolved
    /// monitor's work area, moves the window to that monitor, and applies a
    /// non-interactive frame move/resize. Idempotent for unchanged inputs.
    pub fn place(&self) {
        let Some(window) = self.window() else {
            return;
        };

        let monitor = self.monitor().max(0) as usize;
        let area = window.work_area_for_monitor(monitor);
        let frame = top_slide_frame(area, self.width_percent(), self.height_percent());

        window.move_to_monitor(monitor);
        window.move_resize_frame(false, frame);
    }

    /// Release everything and go terminal. Idempotent, callable from any
    /// state; in-flight waits are not cancelled but their continuations
    /// no-op against the `Dead` state.
    pub fn destroy(&self) {
        if self.lifecycle.get() == Lifecycle::Dead {
            return;
        }
        self.lifecycle.set(Lifecycle::Dead);

        self.setting_subs.borrow_mut().clear();
        self.unmanaged_sub.borrow_mut().take();
        self.focus_out_sub.borrow_mut().take();

        if let Some(hider) = self.hider.borrow_mut().take() {
            hider.destroy();
        }

        self.window.borrow_mut().take();
        self.app.borrow_mut().take();
        tracing::debug!(app = %self.app_id, "controller destroyed");
    }
}
