use crate::event::Event;
use serde::Deserialize;

pub const AXIS_MAX: i32 = 32767;
pub const POINTER_SPEED: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub speed: f32,
    pub axis_max: i32,
    pub x_axis: i32,
    pub y_axis: i32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            speed: POINTER_SPEED,
            axis_max: AXIS_MAX,
            x_axis: 2,
            y_axis: 3,
        }
    }
}

/// Scales a raw axis reading to pointer units and clamps the result to a
/// circle of radius `speed`, keeping its direction.
pub fn pointer_delta(dx: i32, dy: i32, config: &PointerConfig) -> (f32, f32) {
    let range = config.axis_max as f32;
    let mut px = dx as f32 / range * config.speed;
    let mut py = dy as f32 / range * config.speed;

    let len = (px * px + py * py).sqrt();
    if len > config.speed {
        let scale = config.speed / len;
        px *= scale;
        py *= scale;
    }
    (px, py)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisState {
    pub x: i32,
    pub y: i32,
}

impl AxisState {
    pub fn observe(&mut self, axis: i32, value: i32, config: &PointerConfig) -> bool {
        if axis == config.x_axis {
            self.x = value;
        } else if axis == config.y_axis {
            self.y = value;
        } else {
            return false;
        }
        true
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.x != 0 || self.y != 0
    }

    pub fn synthesize(&self, time: u64, config: &PointerConfig) -> Option<Event> {
        if !self.is_pending() {
            return None;
        }
        let (px, py) = pointer_delta(self.x, self.y, config);
        Some(Event::mouse_move(time, px as i32, py as i32))
    }
}
