// Batched transform writes: state mutation is synchronous, the visual update
// is deferred to the next animation frame and coalesced to one paint no
// matter how many gesture events landed in between.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, NodeList};

use super::zoom::ZoomState;

/// "At most one pending paint" flag. A paint begins with [`try_begin`]; until
/// [`finish`] runs, further begin attempts are refused, so rapid pointer-move
/// bursts collapse into a single frame callback.
///
/// [`try_begin`]: PaintScheduler::try_begin
/// [`finish`]: PaintScheduler::finish
#[derive(Debug, Default)]
pub struct PaintScheduler {
    pending: Cell<bool>,
}

impl PaintScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> bool {
        if self.pending.get() {
            false
        } else {
            self.pending.set(true);
            true
        }
    }

    pub fn finish(&self) {
        self.pending.set(false);
    }
}

/// CSS transform for the current zoom state. Translate comes before scale so
/// the pan offset lives in unscaled pixel space and a drag tracks the pointer
/// 1:1 at every zoom level.
pub fn transform_value(state: &ZoomState) -> String {
    format!(
        "translate({}px, {}px) scale({})",
        state.translate_x, state.translate_y, state.scale
    )
}

/// Write `value` as the inline transform of every element in `targets`.
/// The target list is whatever the grid currently renders; the frame
/// callback reads the state at paint time, so a stale paint is a no-op.
pub fn apply_to_targets(targets: &NodeList, value: &str) {
    for i in 0..targets.length() {
        if let Some(node) = targets.item(i) {
            if let Ok(el) = node.dyn_into::<HtmlElement>() {
                let _ = el.style().set_property("transform", value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_coalesces_until_finished() {
        let s = PaintScheduler::new();
        assert!(s.try_begin());
        assert!(!s.try_begin());
        assert!(!s.try_begin());
        s.finish();
        assert!(s.try_begin());
    }

    #[test]
    fn transform_orders_translate_before_scale() {
        let z = ZoomState {
            scale: 3.0,
            translate_x: 50.0,
            translate_y: 30.0,
        };
        assert_eq!(transform_value(&z), "translate(50px, 30px) scale(3)");
    }

    #[test]
    fn identity_transform() {
        assert_eq!(
            transform_value(&ZoomState::default()),
            "translate(0px, 0px) scale(1)"
        );
    }
}
