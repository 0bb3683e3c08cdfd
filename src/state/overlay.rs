//! Overlay surface visibility and animation.
//!
//! The modals tab renders a single physical sheet and projects different
//! panel bodies into it (see `panel.rs`). This module owns the sheet's
//! visibility state machine and its entrance/exit interpolations: an opacity
//! fade (0..1) and a vertical slide (1 = fully offscreen, 0 = settled).

use log::*;
use std::time::{Duration, Instant};

/// Default entrance animation length in milliseconds.
pub const DEFAULT_OPEN_MS: u64 = 300;

/// Default exit animation length in milliseconds.
pub const DEFAULT_CLOSE_MS: u64 = 200;

/// Delay between a confirm action clearing the panels and the overlay
/// starting its exit animation, so the panel-exit feedback gets a frame.
pub const CONFIRM_CLOSE_DELAY_MS: u64 = 300;

/// Specifying the visibility phases of the overlay surface.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OverlayVisibility {
    Hidden,
    AnimatingIn,
    Visible,
    AnimatingOut,
}

/// A linear interpolation between two values over a fixed wall-clock window.
///
#[derive(Debug, Clone, Copy)]
struct Interpolation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Interpolation {
    fn new(from: f32, to: f32, started: Instant, duration: Duration) -> Self {
        Interpolation {
            from,
            to,
            started,
            duration,
        }
    }

    /// Current value, clamped to the endpoint once the window has elapsed.
    ///
    fn value(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * t
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Owns the overlay surface's visibility and its fade/slide progress.
///
/// All mutation goes through `open`, `close`, `schedule_close`, and `tick`;
/// nothing else may write the animation values. A `close` during the
/// entrance animation cancels and reverses the interpolation from its
/// current values (and symmetrically for `open` during the exit), while
/// same-direction calls are idempotent no-ops.
pub struct Overlay {
    visibility: OverlayVisibility,
    fade: f32,
    slide: f32,
    fade_anim: Option<Interpolation>,
    slide_anim: Option<Interpolation>,
    open_duration: Duration,
    close_duration: Duration,
    scheduled_close: Option<Instant>,
}

impl Overlay {
    /// Return a new hidden overlay with the given animation durations.
    ///
    pub fn new(open_duration: Duration, close_duration: Duration) -> Self {
        Overlay {
            visibility: OverlayVisibility::Hidden,
            fade: 0.0,
            slide: 1.0,
            fade_anim: None,
            slide_anim: None,
            open_duration,
            close_duration,
            scheduled_close: None,
        }
    }

    pub fn visibility(&self) -> OverlayVisibility {
        self.visibility
    }

    /// Whether the surface should be mounted at all.
    ///
    pub fn is_mounted(&self) -> bool {
        self.visibility != OverlayVisibility::Hidden
    }

    /// Whether the surface is on its way in or settled. Panel transitions
    /// are only valid while this holds.
    ///
    pub fn is_shown(&self) -> bool {
        matches!(
            self.visibility,
            OverlayVisibility::AnimatingIn | OverlayVisibility::Visible
        )
    }

    /// Current backdrop/surface opacity, 0..1.
    ///
    pub fn fade(&self) -> f32 {
        self.fade
    }

    /// Current slide offset, 1 (offscreen) down to 0 (settled).
    ///
    pub fn slide(&self) -> f32 {
        self.slide
    }

    /// Begin the entrance animation. No-op unless hidden or animating out;
    /// from the latter the exit interpolation is reversed in place.
    ///
    pub fn open(&mut self, now: Instant) {
        match self.visibility {
            OverlayVisibility::Hidden => {
                debug!("Opening overlay surface...");
                self.start(now, 1.0, 0.0, self.open_duration);
                self.visibility = OverlayVisibility::AnimatingIn;
            }
            OverlayVisibility::AnimatingOut => {
                debug!("Reversing overlay exit animation...");
                self.scheduled_close = None;
                self.start(now, 1.0, 0.0, self.open_duration);
                self.visibility = OverlayVisibility::AnimatingIn;
            }
            OverlayVisibility::AnimatingIn | OverlayVisibility::Visible => {
                trace!("Ignoring open request while overlay already shown.");
            }
        }
    }

    /// Begin the exit animation. No-op unless visible or animating in; from
    /// the latter the entrance interpolation is reversed in place.
    ///
    pub fn close(&mut self, now: Instant) {
        self.scheduled_close = None;
        match self.visibility {
            OverlayVisibility::Visible => {
                debug!("Closing overlay surface...");
                self.start(now, 0.0, 1.0, self.close_duration);
                self.visibility = OverlayVisibility::AnimatingOut;
            }
            OverlayVisibility::AnimatingIn => {
                debug!("Reversing overlay entrance animation...");
                self.start(now, 0.0, 1.0, self.close_duration);
                self.visibility = OverlayVisibility::AnimatingOut;
            }
            OverlayVisibility::Hidden | OverlayVisibility::AnimatingOut => {
                trace!("Ignoring close request while overlay already hidden.");
            }
        }
    }

    /// Request a close after the confirm delay. No-op when not shown.
    ///
    pub fn schedule_close(&mut self, now: Instant) {
        if self.is_shown() {
            debug!(
                "Scheduling overlay close in {}ms...",
                CONFIRM_CLOSE_DELAY_MS
            );
            self.scheduled_close = Some(now + Duration::from_millis(CONFIRM_CLOSE_DELAY_MS));
        }
    }

    /// Advance the interpolations and fire any scheduled close. Returns true
    /// when the overlay finished closing on this tick, so the caller can
    /// reset collaborating state.
    ///
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(at) = self.scheduled_close {
            if now >= at {
                self.scheduled_close = None;
                // Start the exit at the scheduled instant, not at this tick,
                // so a coarse tick does not stretch the delay.
                self.close(at);
            }
        }

        if let Some(anim) = self.fade_anim {
            self.fade = anim.value(now);
            if anim.is_finished(now) {
                self.fade_anim = None;
            }
        }
        if let Some(anim) = self.slide_anim {
            self.slide = anim.value(now);
            if anim.is_finished(now) {
                self.slide_anim = None;
            }
        }
        if self.fade_anim.is_some() || self.slide_anim.is_some() {
            return false;
        }

        match self.visibility {
            OverlayVisibility::AnimatingIn => {
                debug!("Overlay entrance animation complete.");
                self.visibility = OverlayVisibility::Visible;
                false
            }
            OverlayVisibility::AnimatingOut => {
                debug!("Overlay exit animation complete.");
                self.visibility = OverlayVisibility::Hidden;
                self.fade = 0.0;
                self.slide = 1.0;
                true
            }
            _ => false,
        }
    }

    /// Start both interpolations from the current values toward the given
    /// fade/slide targets.
    ///
    fn start(&mut self, now: Instant, fade_to: f32, slide_to: f32, duration: Duration) {
        self.fade_anim = Some(Interpolation::new(self.fade, fade_to, now, duration));
        self.slide_anim = Some(Interpolation::new(self.slide, slide_to, now, duration));
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay::new(
            Duration::from_millis(DEFAULT_OPEN_MS),
            Duration::from_millis(DEFAULT_CLOSE_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> Overlay {
        Overlay::default()
    }

    fn after(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_open_runs_to_visible() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);

        overlay.open(t0);
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingIn);
        assert!(overlay.is_mounted());

        overlay.tick(t0);
        assert_eq!(overlay.fade(), 0.0);
        assert_eq!(overlay.slide(), 1.0);

        overlay.tick(after(t0, 150));
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingIn);
        assert!(overlay.fade() > 0.0 && overlay.fade() < 1.0);

        overlay.tick(after(t0, DEFAULT_OPEN_MS));
        assert_eq!(overlay.visibility(), OverlayVisibility::Visible);
        assert_eq!(overlay.fade(), 1.0);
        assert_eq!(overlay.slide(), 0.0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.open(t0);
        overlay.tick(after(t0, 100));
        let fade = overlay.fade();

        overlay.open(after(t0, 100));
        overlay.tick(after(t0, 100));
        assert_eq!(overlay.fade(), fade);
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingIn);

        overlay.tick(after(t0, DEFAULT_OPEN_MS));
        overlay.open(after(t0, DEFAULT_OPEN_MS));
        assert_eq!(overlay.visibility(), OverlayVisibility::Visible);
    }

    #[test]
    fn test_close_runs_to_hidden() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.open(t0);
        overlay.tick(after(t0, DEFAULT_OPEN_MS));

        let t1 = after(t0, 1000);
        overlay.close(t1);
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingOut);

        let closed = overlay.tick(after(t1, DEFAULT_CLOSE_MS));
        assert!(closed);
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);
        assert_eq!(overlay.fade(), 0.0);
        assert_eq!(overlay.slide(), 1.0);
        assert!(!overlay.is_mounted());
    }

    #[test]
    fn test_close_while_hidden_is_noop() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.close(t0);
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);
        assert!(!overlay.tick(after(t0, 500)));
    }

    #[test]
    fn test_close_mid_entrance_reverses() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.open(t0);
        overlay.tick(after(t0, 150));
        let fade = overlay.fade();
        assert!(fade > 0.0 && fade < 1.0);

        overlay.close(after(t0, 150));
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingOut);
        // Exit resumes from the interrupted value rather than snapping.
        overlay.tick(after(t0, 150));
        assert!((overlay.fade() - fade).abs() < 1e-3);

        let closed = overlay.tick(after(t0, 150 + DEFAULT_CLOSE_MS));
        assert!(closed);
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);
    }

    #[test]
    fn test_open_mid_exit_reverses() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.open(t0);
        overlay.tick(after(t0, DEFAULT_OPEN_MS));
        overlay.close(after(t0, 400));
        overlay.tick(after(t0, 500));
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingOut);

        overlay.open(after(t0, 500));
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingIn);
        overlay.tick(after(t0, 500 + DEFAULT_OPEN_MS));
        assert_eq!(overlay.visibility(), OverlayVisibility::Visible);
        assert_eq!(overlay.fade(), 1.0);
    }

    #[test]
    fn test_scheduled_close_fires_after_delay() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.open(t0);
        overlay.tick(after(t0, DEFAULT_OPEN_MS));

        let t1 = after(t0, 1000);
        overlay.schedule_close(t1);
        overlay.tick(after(t1, CONFIRM_CLOSE_DELAY_MS - 1));
        assert_eq!(overlay.visibility(), OverlayVisibility::Visible);

        overlay.tick(after(t1, CONFIRM_CLOSE_DELAY_MS));
        assert_eq!(overlay.visibility(), OverlayVisibility::AnimatingOut);

        let closed = overlay.tick(after(t1, CONFIRM_CLOSE_DELAY_MS + DEFAULT_CLOSE_MS));
        assert!(closed);
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);
    }

    #[test]
    fn test_scheduled_close_completes_on_coarse_tick() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.open(t0);
        overlay.tick(after(t0, DEFAULT_OPEN_MS));

        // One tick jumping past both the delay and the exit animation must
        // land on Hidden in a single step.
        let t1 = after(t0, 1000);
        overlay.schedule_close(t1);
        let closed = overlay.tick(after(t1, CONFIRM_CLOSE_DELAY_MS + DEFAULT_CLOSE_MS));
        assert!(closed);
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);
    }

    #[test]
    fn test_schedule_close_while_hidden_is_noop() {
        let t0 = Instant::now();
        let mut overlay = overlay();
        overlay.schedule_close(t0);
        assert!(!overlay.tick(after(t0, 2 * CONFIRM_CLOSE_DELAY_MS)));
        assert_eq!(overlay.visibility(), OverlayVisibility::Hidden);
    }
}
