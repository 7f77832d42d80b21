//! Slide-in for the bottom pane, with exponential ease-out.
//!
//! Opening the pane injects a downward displacement equal to its height;
//! each tick the displacement decays toward zero, so the pane rises from
//! below the viewport instead of popping in.  Only the position changes,
//! never the size.

/// Row-offset slide animator.
#[derive(Debug, Clone)]
pub struct SlideIn {
    /// Current downward displacement in rows.
    row_offset: f64,
    /// Damping: `offset *= (1 - speed)` each tick.
    speed: f64,
}

impl Default for SlideIn {
    fn default() -> Self {
        Self::new(0.45)
    }
}

impl SlideIn {
    pub fn new(speed: f64) -> Self {
        Self {
            row_offset: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Begin sliding in from `rows` below the resting position.
    pub fn start(&mut self, rows: u16) {
        self.row_offset = f64::from(rows);
    }

    /// Jump to the resting position.
    pub fn finish(&mut self) {
        self.row_offset = 0.0;
    }

    /// Decay the offset toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.row_offset *= 1.0 - self.speed;
        if self.row_offset < 0.4 {
            self.row_offset = 0.0;
        }
    }

    /// Current displacement in whole rows.
    pub fn row_offset(&self) -> u16 {
        u16::try_from(self.row_offset.round() as i64).unwrap_or_default()
    }

    pub fn is_animating(&self) -> bool {
        self.row_offset != 0.0
    }
}
