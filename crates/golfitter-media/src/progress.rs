//! Progress bar and clock helpers.

/// A duration is usable once the element reports a finite, positive value.
pub fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Playback position as a percentage (0–100). Unknown duration reads as 0.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    match known_duration(duration) {
        Some(d) if current_time.is_finite() => (current_time / d * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Target time for a click at `x` pixels into a bar `width` pixels wide.
///
/// Returns `None` when the duration is not known yet or the geometry is
/// degenerate, so the click has no effect.
pub fn seek_time(x: f64, width: f64, duration: f64) -> Option<f64> {
    let duration = known_duration(duration)?;
    if !(width.is_finite() && width > 0.0 && x.is_finite()) {
        return None;
    }
    Some((x / width).clamp(0.0, 1.0) * duration)
}

/// `m:ss` clock text.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_progress_unknown_duration() {
        assert_eq!(progress_percent(3.0, 0.0), 0.0);
        assert_eq!(progress_percent(3.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(3.0, f64::INFINITY), 0.0);
        assert_eq!(progress_percent(5.0, 10.0), 50.0);
    }

    #[test]
    fn test_seek_time() {
        assert_eq!(seek_time(50.0, 200.0, 8.0), Some(2.0));
        assert_eq!(seek_time(250.0, 200.0, 8.0), Some(8.0));
        assert_eq!(seek_time(-5.0, 200.0, 8.0), Some(0.0));
        assert_eq!(seek_time(50.0, 200.0, f64::NAN), None);
        assert_eq!(seek_time(50.0, 200.0, 0.0), None);
        assert_eq!(seek_time(50.0, 0.0, 8.0), None);
    }
}
