//! # golfitter-media
//!
//! Playback model for the swing comparison view: a [`PlaybackSession`] that
//! drives one or two video elements, swipe gesture tracking, drift
//! correction between compared videos, progress bar math, and the
//! navigation parameters the comparison view is opened with.

pub mod gesture;
pub mod navigation;
pub mod playback;
pub mod progress;
pub mod sync;

pub use gesture::{SwipeDirection, SwipeTracker};
pub use navigation::{BackTarget, ComparisonRoute, NavigationError, ReturnTo, SlideSource};
pub use playback::{PlaybackSession, PlayerCommand, VideoClock, VideoSlot};
