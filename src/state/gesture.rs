// Gesture interpretation for the comparison grid: wheel zoom, single-pointer
// drag and two-finger pinch, expressed over plain screen coordinates so the
// transition logic stays independent of the DOM event types.

use super::geometry::{MIN_SCALE, distance};
use super::zoom::{WHEEL_ZOOM_INTENSITY, ZoomState};

/// Two taps within this window count as a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase {
    Idle,
    /// Single pointer held down while zoomed in. The anchor is the pointer
    /// position minus the translate at drag start, so each move maps the
    /// pointer position straight to a translate without accumulating drift.
    Dragging { anchor_x: f64, anchor_y: f64 },
    /// Two fingers down. `last_distance` is the prior inter-finger distance;
    /// zero means not yet established.
    Pinching { last_distance: f64 },
}

/// Owns the shared [`ZoomState`] and the current gesture phase. Every entry
/// point returns whether scale or translate changed, so the caller schedules
/// exactly one paint per mutating transition.
#[derive(Debug)]
pub struct GestureController {
    pub zoom: ZoomState,
    phase: GesturePhase,
}

impl Default for GestureController {
    fn default() -> Self {
        Self {
            zoom: ZoomState::default(),
            phase: GesturePhase::Idle,
        }
    }
}

impl GestureController {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    pub fn is_engaged(&self) -> bool {
        !matches!(self.phase, GesturePhase::Idle)
    }

    /// Wheel zoom. Works in any phase and never changes the phase.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let direction = -delta_y.signum();
        self.zoom.apply_zoom_delta(direction, WHEEL_ZOOM_INTENSITY)
    }

    /// Mouse button pressed over an image. Dragging only arms while zoomed
    /// in; at rest zoom this is a no-op.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        if self.zoom.scale > MIN_SCALE {
            self.phase = GesturePhase::Dragging {
                anchor_x: x - self.zoom.translate_x,
                anchor_y: y - self.zoom.translate_y,
            };
        }
        false
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        match self.phase {
            GesturePhase::Dragging { anchor_x, anchor_y } => {
                self.zoom.set_translate(x - anchor_x, y - anchor_y)
            }
            _ => false,
        }
    }

    pub fn on_pointer_up(&mut self) -> bool {
        self.phase = GesturePhase::Idle;
        false
    }

    /// A finger landed; `points` is the full set of active touches.
    pub fn on_touch_start(&mut self, points: &[(f64, f64)]) -> bool {
        match points {
            [p0, p1, ..] => {
                self.phase = GesturePhase::Pinching {
                    last_distance: distance(*p0, *p1),
                };
            }
            [p] if self.zoom.scale > MIN_SCALE => {
                self.phase = GesturePhase::Dragging {
                    anchor_x: p.0 - self.zoom.translate_x,
                    anchor_y: p.1 - self.zoom.translate_y,
                };
            }
            _ => {}
        }
        false
    }

    pub fn on_touch_move(&mut self, points: &[(f64, f64)]) -> bool {
        match points {
            [p0, p1, ..] => {
                let current = distance(*p0, *p1);
                let changed = match self.phase {
                    // skip the ratio while the prior distance is unknown to
                    // keep a zero denominator out of the scale
                    GesturePhase::Pinching { last_distance } if last_distance > 0.0 => {
                        self.zoom.apply_pinch_ratio(current / last_distance)
                    }
                    _ => false,
                };
                self.phase = GesturePhase::Pinching {
                    last_distance: current,
                };
                changed
            }
            [p] => self.on_pointer_move(p.0, p.1),
            [] => false,
        }
    }

    /// Fingers lifted; `remaining` is the set still on the screen. Dropping
    /// below two ends the pinch; a surviving finger re-runs the drag
    /// eligibility check against the scale the pinch left behind.
    pub fn on_touch_end(&mut self, remaining: &[(f64, f64)]) -> bool {
        match remaining {
            [] => {
                self.phase = GesturePhase::Idle;
            }
            [p] => {
                if self.zoom.scale > MIN_SCALE {
                    self.phase = GesturePhase::Dragging {
                        anchor_x: p.0 - self.zoom.translate_x,
                        anchor_y: p.1 - self.zoom.translate_y,
                    };
                } else {
                    self.phase = GesturePhase::Idle;
                }
            }
            _ => {}
        }
        false
    }

    /// Double-click/double-tap: back to identity from any phase.
    pub fn reset(&mut self) -> bool {
        self.phase = GesturePhase::Idle;
        self.zoom.reset()
    }
}

/// Detects double-taps from raw tap timestamps (touch screens do not reliably
/// deliver `dblclick`).
#[derive(Debug, Default)]
pub struct TapTracker {
    last_tap_ms: f64,
}

impl TapTracker {
    /// Record a tap at `now_ms`; returns true when it completes a double-tap.
    pub fn register(&mut self, now_ms: f64) -> bool {
        let double = self.last_tap_ms > 0.0 && now_ms - self.last_tap_ms <= DOUBLE_TAP_WINDOW_MS;
        self.last_tap_ms = if double { 0.0 } else { now_ms };
        double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_requires_zoomed_in_scale() {
        let mut c = GestureController::default();
        c.on_pointer_down(100.0, 100.0);
        assert_eq!(c.phase(), GesturePhase::Idle);
        // pointer-move at rest zoom with no session must not mutate anything
        assert!(!c.on_pointer_move(180.0, 140.0));
        assert_eq!(c.zoom, ZoomState::default());
    }

    #[test]
    fn drag_maps_pointer_position_not_deltas() {
        let mut c = GestureController::default();
        c.zoom.apply_pinch_ratio(2.0);
        c.on_pointer_down(100.0, 100.0);
        // a pile of intermediate moves must not change the end result
        c.on_pointer_move(103.0, 101.0);
        c.on_pointer_move(120.0, 90.0);
        c.on_pointer_move(150.0, 130.0);
        assert_eq!((c.zoom.translate_x, c.zoom.translate_y), (50.0, 30.0));
        c.on_pointer_up();
        assert_eq!(c.phase(), GesturePhase::Idle);
    }

    #[test]
    fn drag_resumes_from_existing_translate() {
        let mut c = GestureController::default();
        c.zoom.apply_pinch_ratio(2.0);
        c.zoom.set_translate(10.0, 20.0);
        c.on_pointer_down(100.0, 100.0);
        c.on_pointer_move(105.0, 100.0);
        assert_eq!((c.zoom.translate_x, c.zoom.translate_y), (15.0, 20.0));
    }

    #[test]
    fn wheel_works_in_any_phase_and_keeps_it() {
        let mut c = GestureController::default();
        c.zoom.apply_pinch_ratio(2.0);
        c.on_pointer_down(0.0, 0.0);
        assert!(c.is_dragging());
        assert!(c.on_wheel(-120.0));
        assert!((c.zoom.scale - 2.1).abs() < 1e-12);
        assert!(c.is_dragging());
    }

    #[test]
    fn wheel_down_to_rest_clears_translate() {
        let mut c = GestureController::default();
        assert!(c.on_wheel(-1.0));
        assert!((c.zoom.scale - 1.05).abs() < 1e-12);
        c.zoom.set_translate(5.0, 5.0);
        assert!(c.on_wheel(1.0));
        assert_eq!(c.zoom.scale, 1.0);
        assert_eq!((c.zoom.translate_x, c.zoom.translate_y), (0.0, 0.0));
    }

    #[test]
    fn pinch_ratio_from_distances() {
        let mut c = GestureController::default();
        c.zoom.apply_pinch_ratio(2.0);
        c.on_touch_start(&[(0.0, 0.0), (100.0, 0.0)]);
        assert_eq!(c.phase(), GesturePhase::Pinching { last_distance: 100.0 });
        // 150 / 100 = 1.5, so 2 * 1.5 = 3
        assert!(c.on_touch_move(&[(0.0, 0.0), (150.0, 0.0)]));
        assert_eq!(c.zoom.scale, 3.0);
        assert_eq!(c.phase(), GesturePhase::Pinching { last_distance: 150.0 });
    }

    #[test]
    fn pinch_zero_distance_skips_ratio() {
        let mut c = GestureController::default();
        c.on_touch_start(&[(50.0, 50.0), (50.0, 50.0)]);
        assert_eq!(c.phase(), GesturePhase::Pinching { last_distance: 0.0 });
        assert!(!c.on_touch_move(&[(0.0, 0.0), (100.0, 0.0)]));
        assert_eq!(c.zoom.scale, 1.0);
        // the distance is established now, so the next move scales
        assert!(c.on_touch_move(&[(0.0, 0.0), (200.0, 0.0)]));
        assert_eq!(c.zoom.scale, 2.0);
    }

    #[test]
    fn second_finger_mid_drag_enters_pinch() {
        let mut c = GestureController::default();
        c.zoom.apply_pinch_ratio(2.0);
        c.on_touch_start(&[(10.0, 10.0)]);
        assert!(c.is_dragging());
        c.on_touch_start(&[(10.0, 10.0), (110.0, 10.0)]);
        assert_eq!(c.phase(), GesturePhase::Pinching { last_distance: 100.0 });
    }

    #[test]
    fn pinch_to_single_finger_keeps_scale_and_drags() {
        let mut c = GestureController::default();
        c.on_touch_start(&[(0.0, 0.0), (100.0, 0.0)]);
        c.on_touch_move(&[(0.0, 0.0), (300.0, 0.0)]);
        assert_eq!(c.zoom.scale, 3.0);
        c.on_touch_end(&[(40.0, 60.0)]);
        assert!(c.is_dragging());
        assert_eq!(c.zoom.scale, 3.0);
        c.on_touch_move(&[(45.0, 70.0)]);
        assert_eq!((c.zoom.translate_x, c.zoom.translate_y), (5.0, 10.0));
        c.on_touch_end(&[]);
        assert_eq!(c.phase(), GesturePhase::Idle);
    }

    #[test]
    fn pinch_back_to_rest_then_single_finger_goes_idle() {
        let mut c = GestureController::default();
        c.zoom.apply_pinch_ratio(1.5);
        c.zoom.set_translate(30.0, 30.0);
        c.on_touch_start(&[(0.0, 0.0), (200.0, 0.0)]);
        c.on_touch_move(&[(0.0, 0.0), (20.0, 0.0)]);
        assert_eq!(c.zoom.scale, 1.0);
        assert_eq!((c.zoom.translate_x, c.zoom.translate_y), (0.0, 0.0));
        c.on_touch_end(&[(10.0, 0.0)]);
        assert_eq!(c.phase(), GesturePhase::Idle);
    }

    #[test]
    fn reset_from_any_state() {
        let mut c = GestureController::default();
        c.on_touch_start(&[(0.0, 0.0), (100.0, 0.0)]);
        c.on_touch_move(&[(0.0, 0.0), (400.0, 0.0)]);
        c.on_touch_end(&[(40.0, 60.0)]);
        c.on_touch_move(&[(90.0, 60.0)]);
        assert!(c.reset());
        assert_eq!(c.zoom, ZoomState::default());
        assert_eq!(c.phase(), GesturePhase::Idle);
        // already at rest: still legal, just reports no change
        assert!(!c.reset());
    }

    #[test]
    fn tap_tracker_detects_double_taps() {
        let mut t = TapTracker::default();
        assert!(!t.register(1000.0));
        assert!(t.register(1200.0));
        // the pair consumed the window; a third tap starts over
        assert!(!t.register(1350.0));
        assert!(!t.register(2000.0));
        assert!(t.register(2300.0));
    }
}
