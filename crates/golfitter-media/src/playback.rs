//! Dual video playback state.
//!
//! [`PlaybackSession`] is the model behind the comparison player. It never
//! touches a video element itself: every transition updates the session and
//! returns the [`PlayerCommand`]s the renderer must apply. Element events
//! (time updates, reported durations, end of media) are fed back in through
//! the `on_media_*` / `on_time_update` / `on_duration` methods.
//!
//! In dual mode play, pause and restart are mirrored to both videos and a
//! seek moves both, so the pair stays time-aligned. Switching the active
//! video never stops playback.

use serde::{Deserialize, Serialize};
use tracing::debug;

use golfitter_shared::constants::SYNC_TOLERANCE_SECS;

use crate::gesture::{classify, SwipeDirection, SwipeTracker};
use crate::progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSlot {
    /// The user's own swing.
    Primary,
    /// The reference swing it is compared against.
    Secondary,
}

impl VideoSlot {
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

/// Instruction for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerCommand {
    Play { slot: VideoSlot },
    Pause { slot: VideoSlot },
    Seek { slot: VideoSlot, time: f64 },
}

/// What the session knows about one video element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VideoClock {
    pub current_time: f64,
    /// `0` (or NaN, as reported by some elements) until metadata loads.
    pub duration: f64,
    pub playing: bool,
}

impl VideoClock {
    pub fn known_duration(&self) -> Option<f64> {
        progress::known_duration(self.duration)
    }

    fn clamp_time(&self, time: f64) -> f64 {
        match self.known_duration() {
            Some(d) => time.clamp(0.0, d),
            None => time.max(0.0),
        }
    }
}

/// State of one comparison view.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    active: VideoSlot,
    is_playing: bool,
    primary: VideoClock,
    secondary: Option<VideoClock>,
    comparison_enabled: bool,
    swipe: SwipeTracker,
}

impl PlaybackSession {
    /// A single-video player. No comparison state is ever exposed.
    pub fn single() -> Self {
        Self::build(None, false)
    }

    /// A two-video player. Swipe gestures switch videos only when
    /// `comparison_enabled` is set.
    pub fn dual(comparison_enabled: bool) -> Self {
        Self::build(Some(VideoClock::default()), comparison_enabled)
    }

    fn build(secondary: Option<VideoClock>, comparison_enabled: bool) -> Self {
        Self {
            active: VideoSlot::Primary,
            is_playing: false,
            primary: VideoClock::default(),
            secondary,
            comparison_enabled,
            swipe: SwipeTracker::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn is_dual(&self) -> bool {
        self.secondary.is_some()
    }

    /// Whether comparison UI (labels, swipe switching) should be shown.
    pub fn has_comparison(&self) -> bool {
        self.is_dual() && self.comparison_enabled
    }

    pub fn active(&self) -> VideoSlot {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn clock(&self, slot: VideoSlot) -> Option<&VideoClock> {
        match slot {
            VideoSlot::Primary => Some(&self.primary),
            VideoSlot::Secondary => self.secondary.as_ref(),
        }
    }

    pub fn is_slot_playing(&self, slot: VideoSlot) -> bool {
        self.clock(slot).is_some_and(|c| c.playing)
    }

    /// Progress of `slot` as a percentage; 0 while the duration is unknown.
    pub fn progress_percent(&self, slot: VideoSlot) -> f64 {
        self.clock(slot)
            .map(|c| progress::progress_percent(c.current_time, c.duration))
            .unwrap_or(0.0)
    }

    fn clock_mut(&mut self, slot: VideoSlot) -> Option<&mut VideoClock> {
        match slot {
            VideoSlot::Primary => Some(&mut self.primary),
            VideoSlot::Secondary => self.secondary.as_mut(),
        }
    }

    /// Slots a transport action applies to.
    fn transport_targets(&self) -> Vec<VideoSlot> {
        if self.is_dual() {
            vec![VideoSlot::Primary, VideoSlot::Secondary]
        } else {
            vec![self.active]
        }
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    pub fn on_play(&mut self) -> Vec<PlayerCommand> {
        self.is_playing = true;
        self.transport_targets()
            .into_iter()
            .filter_map(|slot| {
                let clock = self.clock_mut(slot)?;
                clock.playing = true;
                Some(PlayerCommand::Play { slot })
            })
            .collect()
    }

    pub fn on_pause(&mut self) -> Vec<PlayerCommand> {
        self.is_playing = false;
        self.transport_targets()
            .into_iter()
            .filter_map(|slot| {
                let clock = self.clock_mut(slot)?;
                clock.playing = false;
                Some(PlayerCommand::Pause { slot })
            })
            .collect()
    }

    pub fn toggle_play(&mut self) -> Vec<PlayerCommand> {
        if self.is_playing {
            self.on_pause()
        } else {
            self.on_play()
        }
    }

    /// Rewind to the start and play.
    pub fn restart(&mut self) -> Vec<PlayerCommand> {
        let mut commands = self.on_seek(0.0);
        commands.extend(self.on_play());
        commands
    }

    /// Move to `time` seconds. In dual mode both videos move together.
    pub fn on_seek(&mut self, time: f64) -> Vec<PlayerCommand> {
        if !time.is_finite() {
            return Vec::new();
        }

        self.transport_targets()
            .into_iter()
            .filter_map(|slot| {
                let clock = self.clock_mut(slot)?;
                let target = clock.clamp_time(time);
                clock.current_time = target;
                Some(PlayerCommand::Seek { slot, time: target })
            })
            .collect()
    }

    /// Progress bar click at `x` pixels into a bar `width` pixels wide.
    /// Has no effect while the active video's duration is unknown.
    pub fn seek_fraction(&mut self, x: f64, width: f64) -> Vec<PlayerCommand> {
        let duration = self.clock(self.active).map_or(0.0, |c| c.duration);
        match progress::seek_time(x, width, duration) {
            Some(time) => self.on_seek(time),
            None => Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Active video
    // -----------------------------------------------------------------------

    /// Make `target` the highlighted, controlled video. Playback continues.
    /// Returns `false` if there is no such video.
    pub fn on_switch_active(&mut self, target: VideoSlot) -> bool {
        if self.clock(target).is_none() {
            return false;
        }
        if self.active != target {
            debug!(from = ?self.active, to = ?target, "Switched active video");
            self.active = target;
        }
        true
    }

    pub fn next(&mut self) -> bool {
        self.on_switch_active(VideoSlot::Secondary)
    }

    pub fn previous(&mut self) -> bool {
        self.on_switch_active(VideoSlot::Primary)
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    pub fn on_touch_start(&mut self, x: f64) {
        self.swipe.start(x);
    }

    pub fn on_touch_move(&mut self, x: f64) {
        self.swipe.move_to(x);
    }

    /// Finish a gesture. Returns the newly active slot if it switched.
    pub fn on_touch_end(&mut self) -> Option<VideoSlot> {
        let direction = self.swipe.finish()?;
        self.apply_swipe(direction)
    }

    /// Apply a whole horizontal displacement at once (`end - start`).
    pub fn on_touch_delta(&mut self, dx: f64) -> Option<VideoSlot> {
        let direction = classify(dx, self.swipe.threshold())?;
        self.apply_swipe(direction)
    }

    fn apply_swipe(&mut self, direction: SwipeDirection) -> Option<VideoSlot> {
        if !self.has_comparison() {
            return None;
        }
        let target = match direction {
            SwipeDirection::Left => VideoSlot::Secondary,
            SwipeDirection::Right => VideoSlot::Primary,
        };
        if target == self.active {
            return None;
        }
        self.on_switch_active(target).then_some(target)
    }

    // -----------------------------------------------------------------------
    // Element feedback
    // -----------------------------------------------------------------------

    pub fn on_time_update(&mut self, slot: VideoSlot, time: f64) {
        if let Some(clock) = self.clock_mut(slot) {
            clock.current_time = time;
        }
    }

    pub fn on_duration(&mut self, slot: VideoSlot, duration: f64) {
        if let Some(clock) = self.clock_mut(slot) {
            clock.duration = duration;
        }
    }

    /// The element started playing on its own (e.g. native controls).
    pub fn on_media_play(&mut self, slot: VideoSlot) {
        if let Some(clock) = self.clock_mut(slot) {
            clock.playing = true;
            self.is_playing = true;
        }
    }

    /// The element paused on its own.
    pub fn on_media_pause(&mut self, slot: VideoSlot) {
        if let Some(clock) = self.clock_mut(slot) {
            clock.playing = false;
        }
        self.refresh_playing();
    }

    /// The element reached the end of its media.
    pub fn on_media_ended(&mut self, slot: VideoSlot) {
        if let Some(clock) = self.clock_mut(slot) {
            clock.playing = false;
            if let Some(d) = clock.known_duration() {
                clock.current_time = d;
            }
        }
        self.refresh_playing();
    }

    fn refresh_playing(&mut self) {
        self.is_playing =
            self.primary.playing || self.secondary.as_ref().is_some_and(|c| c.playing);
    }

    // -----------------------------------------------------------------------
    // Sync
    // -----------------------------------------------------------------------

    /// Pull the non-active video back in line with the active one if they
    /// drifted apart by more than the tolerance.
    pub fn sync_check(&mut self) -> Option<PlayerCommand> {
        if !self.is_playing {
            return None;
        }
        let leader = *self.clock(self.active)?;
        let follower_slot = self.active.other();
        let follower = self.clock_mut(follower_slot)?;

        let drift = (leader.current_time - follower.current_time).abs();
        if !drift.is_finite() || drift <= SYNC_TOLERANCE_SECS {
            return None;
        }

        let target = follower.clamp_time(leader.current_time);
        follower.current_time = target;
        debug!(slot = ?follower_slot, drift, target, "Corrected playback drift");
        Some(PlayerCommand::Seek {
            slot: follower_slot,
            time: target,
        })
    }
}
