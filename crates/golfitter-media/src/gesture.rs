use serde::{Deserialize, Serialize};

use golfitter_shared::constants::SWIPE_THRESHOLD_PX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Finger moved right to left: go to the next video.
    Left,
    /// Finger moved left to right: go to the previous video.
    Right,
}

/// Classify a horizontal displacement (`end - start`, in pixels).
pub fn classify(dx: f64, threshold: f64) -> Option<SwipeDirection> {
    if !dx.is_finite() {
        return None;
    }
    if dx <= -threshold {
        Some(SwipeDirection::Left)
    } else if dx >= threshold {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

/// Tracks one touch or drag from start to end.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
    end_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
            end_x: None,
        }
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    pub fn move_to(&mut self, x: f64) {
        if self.start_x.is_some() {
            self.end_x = Some(x);
        }
    }

    /// End the gesture and report a swipe if it travelled far enough.
    /// A touch that never moved is a tap, not a swipe.
    pub fn finish(&mut self) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let end = self.end_x.take()?;
        classify(end - start, self.threshold)
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_PX)
    }
}
