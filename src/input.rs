// ColorQuest: Button Input
//
// `Debouncer` filters the raw pin level; `GestureRecognizer` turns the
// filtered press/release edges into short-click, double-click and long-press
// events. Both are pure functions of the level and a millisecond timestamp,
// so they can be driven from tests without real time passing.

use crate::events::GestureEvent;

// ---------------------------------------------------------------------------
// Debounce filter
// ---------------------------------------------------------------------------
pub struct Debouncer {
    debounce_ms: u64,
    stable: bool,
    last_raw: bool,
    last_change_ms: u64,
}

impl Debouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            stable: false, // released
            last_raw: false,
            last_change_ms: 0,
        }
    }

    /// Feed one raw sample; returns the debounced level.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_change_ms = now_ms;
        }

        if raw != self.stable && now_ms.saturating_sub(self.last_change_ms) >= self.debounce_ms {
            self.stable = raw;
        }

        self.stable
    }
}

// ---------------------------------------------------------------------------
// Gesture recognizer
// ---------------------------------------------------------------------------

/// Which events the recognizer produces on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Short click and double-click (click counting).
    Clicks,
    /// Short press vs. long press only; a release emits `ShortClick` iff the
    /// hold was shorter than the long-press threshold.
    PressDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTiming {
    pub long_press_ms: u64,
    pub double_click_window_ms: u64,
}

pub struct GestureRecognizer {
    timing: GestureTiming,
    vocabulary: Vocabulary,

    pressed: bool,
    last_press_ms: Option<u64>,
    last_release_ms: Option<u64>,
    click_count: u8,
    long_press_signaled: bool,
}

impl GestureRecognizer {
    pub fn new(timing: GestureTiming, vocabulary: Vocabulary) -> Self {
        Self {
            timing,
            vocabulary,
            pressed: false,
            last_press_ms: None,
            last_release_ms: None,
            click_count: 0,
            long_press_signaled: false,
        }
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) {
        self.vocabulary = vocabulary;
    }

    /// Drop click history after a gesture has been consumed by a mode change.
    ///
    /// If the button is still down, the rest of that press is swallowed: its
    /// release emits nothing and it cannot signal a second long press.
    pub fn reset(&mut self) {
        self.last_press_ms = None;
        self.last_release_ms = None;
        self.click_count = 0;
        self.long_press_signaled = self.pressed;
    }

    /// Advance with the current level (`true` = pressed). Call every tick.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<GestureEvent> {
        match (self.pressed, pressed) {
            (false, true) => {
                self.on_press(now_ms);
                None
            }
            (true, true) => self.on_hold(now_ms),
            (true, false) => self.on_release(now_ms),
            (false, false) => None,
        }
    }

    fn on_press(&mut self, now_ms: u64) {
        self.pressed = true;

        let within_window = self
            .last_release_ms
            .is_some_and(|t| now_ms.saturating_sub(t) < self.timing.double_click_window_ms);
        self.click_count = if within_window {
            self.click_count.saturating_add(1)
        } else {
            1
        };

        self.last_press_ms = Some(now_ms);
        self.long_press_signaled = false;
    }

    fn on_hold(&mut self, now_ms: u64) -> Option<GestureEvent> {
        if self.long_press_signaled {
            return None;
        }

        let held = now_ms.saturating_sub(self.last_press_ms?);
        if held > self.timing.long_press_ms {
            self.long_press_signaled = true;
            self.click_count = 0;
            return Some(GestureEvent::LongPress);
        }
        None
    }

    fn on_release(&mut self, now_ms: u64) -> Option<GestureEvent> {
        self.pressed = false;
        self.last_release_ms = Some(now_ms);

        if self.long_press_signaled {
            self.click_count = 0;
            return None;
        }

        // A press that began before a reset has no timestamp: swallow it.
        let held = now_ms.saturating_sub(self.last_press_ms?);

        match self.vocabulary {
            Vocabulary::Clicks if self.click_count >= 2 => {
                self.click_count = 0;
                Some(GestureEvent::DoubleClick)
            }
            Vocabulary::Clicks => Some(GestureEvent::ShortClick),
            Vocabulary::PressDuration if held < self.timing.long_press_ms => {
                Some(GestureEvent::ShortClick)
            }
            Vocabulary::PressDuration => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: GestureTiming = GestureTiming {
        long_press_ms: 2000,
        double_click_window_ms: 600,
    };

    /// Replay a list of `(time, level)` samples, collecting emitted events.
    fn replay(recognizer: &mut GestureRecognizer, samples: &[(u64, bool)]) -> Vec<(u64, GestureEvent)> {
        samples
            .iter()
            .filter_map(|&(t, level)| recognizer.update(level, t).map(|e| (t, e)))
            .collect()
    }

    fn clicks() -> GestureRecognizer {
        GestureRecognizer::new(TIMING, Vocabulary::Clicks)
    }

    #[test]
    fn quick_tap_is_short_click() {
        let mut r = clicks();
        let events = replay(&mut r, &[(0, true), (50, false)]);
        assert_eq!(events, vec![(50, GestureEvent::ShortClick)]);
    }

    #[test]
    fn two_taps_inside_window_make_double_click() {
        let mut r = clicks();
        let events = replay(&mut r, &[(0, true), (50, false), (300, true), (350, false)]);
        assert_eq!(
            events,
            vec![(50, GestureEvent::ShortClick), (350, GestureEvent::DoubleClick)]
        );
    }

    #[test]
    fn second_tap_on_window_boundary_is_a_new_click() {
        let mut r = clicks();
        let events = replay(&mut r, &[(0, true), (50, false), (650, true), (700, false)]);
        assert_eq!(
            events,
            vec![(50, GestureEvent::ShortClick), (700, GestureEvent::ShortClick)]
        );
    }

    #[test]
    fn third_tap_starts_over_after_double_click() {
        let mut r = clicks();
        let events = replay(
            &mut r,
            &[(0, true), (50, false), (200, true), (250, false), (400, true), (450, false)],
        );
        assert_eq!(
            events,
            vec![
                (50, GestureEvent::ShortClick),
                (250, GestureEvent::DoubleClick),
                (450, GestureEvent::ShortClick),
            ]
        );
    }

    #[test]
    fn long_hold_signals_exactly_once() {
        let mut r = clicks();
        let mut samples = vec![(0, true)];
        samples.extend((1..=50).map(|i| (i * 100, true)));
        samples.push((5100, false));

        let events = replay(&mut r, &samples);
        assert_eq!(events, vec![(2100, GestureEvent::LongPress)]);
    }

    #[test]
    fn hold_of_exactly_threshold_is_not_long() {
        let mut r = clicks();
        assert_eq!(r.update(true, 0), None);
        assert_eq!(r.update(true, 2000), None);
        assert_eq!(r.update(true, 2001), Some(GestureEvent::LongPress));
    }

    #[test]
    fn press_duration_vocabulary_never_double_clicks() {
        let mut r = GestureRecognizer::new(TIMING, Vocabulary::PressDuration);
        let events = replay(&mut r, &[(0, true), (50, false), (300, true), (350, false)]);
        assert_eq!(
            events,
            vec![(50, GestureEvent::ShortClick), (350, GestureEvent::ShortClick)]
        );
    }

    #[test]
    fn press_duration_ignores_release_at_threshold() {
        let mut r = GestureRecognizer::new(TIMING, Vocabulary::PressDuration);
        let events = replay(&mut r, &[(0, true), (2000, false)]);
        assert!(events.is_empty());
    }

    #[test]
    fn reset_while_held_swallows_the_release() {
        let mut r = clicks();
        assert_eq!(r.update(true, 0), None);
        assert_eq!(r.update(true, 2100), Some(GestureEvent::LongPress));
        r.reset();
        assert_eq!(r.update(true, 4500), None);
        assert_eq!(r.update(false, 4600), None);

        // The next press is a clean first click.
        let events = replay(&mut r, &[(4700, true), (4750, false)]);
        assert_eq!(events, vec![(4750, GestureEvent::ShortClick)]);
    }

    #[test]
    fn reset_breaks_double_click_chain() {
        let mut r = clicks();
        assert_eq!(r.update(true, 0), None);
        assert_eq!(r.update(false, 50), Some(GestureEvent::ShortClick));
        r.reset();
        let events = replay(&mut r, &[(200, true), (250, false)]);
        assert_eq!(events, vec![(250, GestureEvent::ShortClick)]);
    }

    #[test]
    fn debouncer_ignores_glitches() {
        let mut d = Debouncer::new(30);
        assert!(!d.update(true, 0));
        assert!(!d.update(false, 10));
        assert!(!d.update(true, 20));
        assert!(!d.update(true, 40));
        assert!(d.update(true, 50));
        assert!(d.update(false, 60));
        assert!(!d.update(false, 90));
    }
}
