// ColorQuest: Session Controller
//
// Top-level mode state machine. Owns the palette, the gesture recognizer,
// the target rotation and the round score, and is advanced once per tick:
//
//   button -> gesture -> mode change
//   sensor -> normalise -> classify -> score / detection update
//   screen
//
// Mode flow:
//   Menu --hold(Game)--> Countdown --> RoundActive --timeout--> RoundEnd --> Menu
//   Menu --hold(Detection)--> Detection --hold--> Menu
//   RoundActive --hold--> Menu (round abandoned)
//
// All waits are deadlines checked on each tick; nothing here sleeps.

use crate::board::{Board, RandomSource};
use crate::color::{Chromaticity, RawSample};
use crate::config::*;
use crate::events::{GestureEvent, LedPattern, MenuChoice};
use crate::input::{GestureRecognizer, GestureTiming, Vocabulary};
use crate::palette::{classify, ColorClass, ColorId, Context, Palette};
use crate::screen::{Detected, Screen};
use crate::target::TargetPicker;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Menu {
        selection: MenuChoice,
    },
    Countdown {
        remaining: u8,
        next_step_ms: u64,
    },
    RoundActive(RoundState),
    RoundEnd {
        score: u32,
        until_ms: u64,
    },
    Detection(DetectionState),
}

/// Presentation pause inside a round. Classification is suspended while a
/// hold is active; the round clock keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    /// "Find <colour> object".
    Announce { until_ms: u64 },
    /// "MATCH!" for the target that was just found.
    Celebrate { until_ms: u64, found_in_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub score: u32,
    pub started_ms: u64,
    pub target: ColorClass,
    /// When the current target became seekable.
    pub target_since_ms: u64,
    pub hold: Option<Hold>,
    pub last_sample: Option<Chromaticity>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectionState {
    pub detected: Option<Detected>,
    pub sample: Option<Chromaticity>,
    pub clear: u16,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------
pub struct Session<R: RandomSource> {
    config: GameConfig,
    palette: Palette,
    recognizer: GestureRecognizer,
    picker: TargetPicker,
    rng: R,
    mode: Mode,
    last_choice: MenuChoice,
    indicator: LedPattern,
}

impl<R: RandomSource> Session<R> {
    pub fn new(config: GameConfig, palette: Palette, rng: R) -> Self {
        let timing = GestureTiming {
            long_press_ms: config.long_press_ms,
            double_click_window_ms: config.double_click_window_ms,
        };

        Self {
            config,
            palette,
            recognizer: GestureRecognizer::new(timing, Vocabulary::PressDuration),
            picker: TargetPicker::new(),
            rng,
            mode: Mode::Menu {
                selection: MenuChoice::default(),
            },
            last_choice: MenuChoice::default(),
            indicator: LedPattern::OFF,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.recognizer.vocabulary()
    }

    /// Current round, if one is running.
    pub fn round(&self) -> Option<&RoundState> {
        match &self.mode {
            Mode::RoundActive(round) => Some(round),
            _ => None,
        }
    }

    /// Target currently sought, if a round is running.
    pub fn target(&self) -> Option<ColorId> {
        self.round().map(|r| r.target.id)
    }

    /// One full control-loop iteration: input, sensing, classification,
    /// output, strictly in that order.
    pub fn tick<B: Board>(&mut self, board: &mut B) {
        let now = board.now_ms();

        let pressed = board.button_pressed();
        if let Some(event) = self.recognizer.update(pressed, now) {
            self.handle_gesture(event, now, board);
        }

        let raw = match board.acquire() {
            Ok(raw) => Some(raw),
            Err(e) => {
                log::warn!("Colour sensor read error: {}", e);
                None
            }
        };
        self.advance(now, raw.as_ref(), board);

        if let Err(e) = board.present(&self.screen(now)) {
            log::warn!("Display error: {}", e);
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_gesture<B: Board>(&mut self, event: GestureEvent, now: u64, board: &mut B) {
        log::debug!("Gesture {:?} in {}", event, self.mode_name());

        match &mut self.mode {
            Mode::Menu { selection } => match event {
                GestureEvent::ShortClick | GestureEvent::DoubleClick => {
                    *selection = selection.toggled();
                    board.tone(TONE_CLICK);
                }
                GestureEvent::LongPress => {
                    let choice = *selection;
                    self.last_choice = choice;
                    self.recognizer.reset();
                    match choice {
                        MenuChoice::Game => self.enter_countdown(now, board),
                        MenuChoice::Detection => self.enter_detection(board),
                    }
                }
            },

            // Presentational only.
            Mode::Countdown { .. } | Mode::RoundEnd { .. } => {}

            Mode::RoundActive(round) => match event {
                GestureEvent::LongPress => {
                    log::info!("Round abandoned at score {}", round.score);
                    self.recognizer.reset();
                    self.enter_menu(board);
                }
                GestureEvent::DoubleClick => {
                    if matches!(round.hold, Some(Hold::Celebrate { .. })) {
                        return;
                    }
                    board.tone(TONE_SKIP);
                    board.tone(TONE_SKIP);
                    self.rotate_target(now, board);
                }
                GestureEvent::ShortClick => board.tone(TONE_CLICK),
            },

            Mode::Detection(_) => match event {
                GestureEvent::LongPress => {
                    self.recognizer.reset();
                    self.enter_menu(board);
                }
                GestureEvent::ShortClick | GestureEvent::DoubleClick => board.tone(TONE_CLICK),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Sensing & timers
    // -----------------------------------------------------------------------

    /// Apply one sensor poll (`None` when the read failed) and expire any
    /// deadlines that have passed.
    pub fn advance<B: Board>(&mut self, now: u64, raw: Option<&RawSample>, board: &mut B) {
        let sample = raw.and_then(Chromaticity::from_raw);
        if let Some(raw) = raw {
            log::debug!(
                "Raw - R:{} G:{} B:{} C:{} | Norm - {:?}",
                raw.red,
                raw.green,
                raw.blue,
                raw.clear,
                sample
            );
        }

        match &mut self.mode {
            Mode::Menu { .. } => {}

            Mode::Countdown {
                remaining,
                next_step_ms,
            } => {
                if now < *next_step_ms {
                    return;
                }
                if *remaining <= 1 {
                    self.start_round(now, board);
                } else {
                    *remaining -= 1;
                    *next_step_ms += self.config.countdown_step_ms;
                    board.tone(TONE_COUNTDOWN);
                }
            }

            Mode::RoundActive(_) => self.advance_round(now, sample, board),

            Mode::RoundEnd { until_ms, .. } => {
                if now >= *until_ms {
                    // A press begun on the score screen must not act in the menu.
                    self.recognizer.reset();
                    self.enter_menu(board);
                }
            }

            Mode::Detection(state) => {
                state.sample = sample;
                if let Some(raw) = raw {
                    state.clear = raw.clear;
                }

                // Degenerate reads keep the previous verdict on screen.
                if let Some(verdict) = sample.and_then(|s| classify(&s, self.palette.classes())) {
                    let confident =
                        self.palette
                            .matches(verdict.distance, &verdict.class, Context::Recognition);
                    state.detected = Some(Detected {
                        id: verdict.class.id,
                        distance: verdict.distance,
                        confident,
                    });
                    log::debug!(
                        "Detected: {} (d={:.3}{})",
                        verdict.class.name(),
                        verdict.distance,
                        if confident { "" } else { ", outside tolerance" }
                    );

                    let pattern = indicator_for(&verdict.class);
                    self.set_indicator(board, pattern);
                }
            }
        }
    }

    fn advance_round<B: Board>(&mut self, now: u64, sample: Option<Chromaticity>, board: &mut B) {
        let config = self.config;
        let Mode::RoundActive(round) = &mut self.mode else {
            return;
        };

        if now.saturating_sub(round.started_ms) >= config.round_duration_ms {
            let score = round.score;
            self.finish_round(score, now, board);
            return;
        }

        round.last_sample = sample;

        match round.hold {
            Some(Hold::Celebrate { until_ms, .. }) => {
                if now >= until_ms {
                    round.hold = Some(Hold::Announce {
                        until_ms: now + config.announce_ms,
                    });
                }
                return;
            }
            Some(Hold::Announce { until_ms }) => {
                if now < until_ms {
                    return;
                }
                round.hold = None;
                round.target_since_ms = now;
            }
            None => {}
        }

        let Some(sample) = sample else {
            return;
        };
        let Some(verdict) = classify(&sample, self.palette.targets()) else {
            return;
        };

        let hit = verdict.class.id == round.target.id
            && self
                .palette
                .matches(verdict.distance, &round.target, Context::Game);
        if !hit {
            return;
        }

        let found_in_ms = now.saturating_sub(round.target_since_ms);
        round.score += config.match_award;
        log::info!(
            "MATCH! {} in {} ms (d={:.3}), score {}",
            round.target.name(),
            found_in_ms,
            verdict.distance,
            round.score
        );

        if let Some(next) = self.picker.next(self.palette.targets(), &mut self.rng) {
            round.target = next;
        }
        round.hold = Some(Hold::Celebrate {
            until_ms: now + config.celebration_ms,
            found_in_ms,
        });
        let pattern = indicator_for(&round.target);

        board.tone(TONE_MATCH);
        self.set_indicator(board, pattern);
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn enter_menu<B: Board>(&mut self, board: &mut B) {
        log::info!("Mode: Menu");
        self.mode = Mode::Menu {
            selection: self.last_choice,
        };
        self.recognizer.set_vocabulary(Vocabulary::PressDuration);
        self.set_indicator(board, LedPattern::OFF);
        board.tone(TONE_EXIT);
    }

    fn enter_countdown<B: Board>(&mut self, now: u64, board: &mut B) {
        if self.config.countdown_steps == 0 {
            self.start_round(now, board);
            return;
        }

        log::info!("Mode: Countdown");
        self.mode = Mode::Countdown {
            remaining: self.config.countdown_steps,
            next_step_ms: now + self.config.countdown_step_ms,
        };
        self.recognizer.set_vocabulary(Vocabulary::PressDuration);
        self.set_indicator(board, LedPattern::OFF);
        board.tone(TONE_COUNTDOWN);
    }

    fn enter_detection<B: Board>(&mut self, board: &mut B) {
        log::info!("Mode: Detection");
        self.mode = Mode::Detection(DetectionState::default());
        self.recognizer.set_vocabulary(Vocabulary::PressDuration);
        board.tone(TONE_MODE_ENTER);
        board.tone(TONE_MODE_ENTER);
    }

    fn start_round<B: Board>(&mut self, now: u64, board: &mut B) {
        self.picker.reset();
        let Some(target) = self.picker.next(self.palette.targets(), &mut self.rng) else {
            log::error!("No target colours available; staying in menu");
            self.enter_menu(board);
            return;
        };

        log::info!("Mode: Round ({} ms), first target {}", self.config.round_duration_ms, target.name());
        self.mode = Mode::RoundActive(RoundState {
            score: 0,
            started_ms: now,
            target,
            target_since_ms: now,
            hold: Some(Hold::Announce {
                until_ms: now + self.config.announce_ms,
            }),
            last_sample: None,
        });
        self.recognizer.set_vocabulary(Vocabulary::Clicks);
        self.set_indicator(board, indicator_for(&target));
    }

    fn rotate_target<B: Board>(&mut self, now: u64, board: &mut B) {
        let announce_ms = self.config.announce_ms;
        let Mode::RoundActive(round) = &mut self.mode else {
            return;
        };
        let Some(next) = self.picker.next(self.palette.targets(), &mut self.rng) else {
            return;
        };

        log::info!("Target skipped: {} -> {}", round.target.name(), next.name());
        round.target = next;
        round.hold = Some(Hold::Announce {
            until_ms: now + announce_ms,
        });
        self.set_indicator(board, indicator_for(&next));
    }

    fn finish_round<B: Board>(&mut self, score: u32, now: u64, board: &mut B) {
        log::info!("Round over, final score {}", score);
        self.mode = Mode::RoundEnd {
            score,
            until_ms: now + self.config.round_end_ms,
        };
        self.recognizer.set_vocabulary(Vocabulary::PressDuration);
        self.set_indicator(board, LedPattern::OFF);
        board.tone(TONE_ROUND_END);
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// What the display should show right now.
    pub fn screen(&self, now: u64) -> Screen {
        match &self.mode {
            Mode::Menu { selection } => Screen::Menu {
                selection: *selection,
            },
            Mode::Countdown { remaining, .. } => Screen::Countdown {
                remaining: *remaining,
            },
            Mode::RoundActive(round) => match round.hold {
                Some(Hold::Celebrate { found_in_ms, .. }) => Screen::Matched {
                    score: round.score,
                    found_in_ms,
                },
                Some(Hold::Announce { .. }) => Screen::Announce {
                    target: round.target.id,
                },
                None => {
                    let elapsed = now.saturating_sub(round.started_ms);
                    let left_ms = self.config.round_duration_ms.saturating_sub(elapsed);
                    Screen::Seeking {
                        target: round.target.id,
                        score: round.score,
                        seconds_left: left_ms.div_ceil(1000),
                        sample: round.last_sample,
                    }
                }
            },
            Mode::RoundEnd { score, .. } => Screen::RoundOver { score: *score },
            Mode::Detection(state) => Screen::Detection {
                detected: state.detected,
                sample: state.sample,
                clear: state.clear,
            },
        }
    }

    fn set_indicator<B: Board>(&mut self, board: &mut B, pattern: LedPattern) {
        if pattern != self.indicator {
            self.indicator = pattern;
            board.indicate(pattern);
        }
    }

    fn mode_name(&self) -> &'static str {
        match self.mode {
            Mode::Menu { .. } => "Menu",
            Mode::Countdown { .. } => "Countdown",
            Mode::RoundActive(_) => "RoundActive",
            Mode::RoundEnd { .. } => "RoundEnd",
            Mode::Detection(_) => "Detection",
        }
    }
}

/// LED channels lit for a colour: on wherever its reference is non-zero.
fn indicator_for(class: &ColorClass) -> LedPattern {
    let c = class.reference;
    LedPattern {
        red: c.r > 0.0,
        green: c.g > 0.0,
        blue: c.b > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Tone;

    #[derive(Default)]
    struct Recorder {
        tones: Vec<Tone>,
        leds: Vec<LedPattern>,
    }

    impl Board for Recorder {
        fn now_ms(&self) -> u64 {
            0
        }
        fn button_pressed(&mut self) -> bool {
            false
        }
        fn acquire(&mut self) -> anyhow::Result<RawSample> {
            anyhow::bail!("not used")
        }
        fn tone(&mut self, tone: Tone) {
            self.tones.push(tone);
        }
        fn indicate(&mut self, pattern: LedPattern) {
            self.leds.push(pattern);
        }
        fn present(&mut self, _screen: &Screen) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Counter(u32);

    impl RandomSource for Counter {
        fn next_u32(&mut self) -> u32 {
            self.0 = self.0.wrapping_add(1);
            self.0
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            countdown_steps: 2,
            countdown_step_ms: 100,
            round_duration_ms: 10_000,
            announce_ms: 200,
            celebration_ms: 100,
            round_end_ms: 500,
            ..GameConfig::default()
        }
    }

    fn session() -> Session<Counter> {
        Session::new(config(), Palette::standard().unwrap(), Counter(0))
    }

    /// Raw counts whose normalised form is exactly `class.reference`.
    fn raw_for(class: &ColorClass) -> RawSample {
        let c = class.reference;
        RawSample::new(
            (c.r * 1000.0) as u16,
            (c.g * 1000.0) as u16,
            (c.b * 1000.0) as u16,
            2000,
        )
    }

    /// Menu -> (hold) -> Countdown -> RoundActive past the first announcement.
    fn start_round(s: &mut Session<Counter>, board: &mut Recorder) -> u64 {
        s.handle_gesture(GestureEvent::LongPress, 0, board);
        s.advance(100, None, board);
        s.advance(200, None, board);
        assert!(matches!(s.mode(), Mode::RoundActive(_)));
        s.advance(400, None, board);
        assert_eq!(s.round().unwrap().hold, None);
        400
    }

    #[test]
    fn starts_in_menu_with_press_duration_vocabulary() {
        let s = session();
        assert_eq!(
            s.mode(),
            &Mode::Menu {
                selection: MenuChoice::Game
            }
        );
        assert_eq!(s.vocabulary(), Vocabulary::PressDuration);
    }

    #[test]
    fn click_toggles_menu_selection() {
        let mut s = session();
        let mut board = Recorder::default();
        s.handle_gesture(GestureEvent::ShortClick, 0, &mut board);
        assert_eq!(
            s.mode(),
            &Mode::Menu {
                selection: MenuChoice::Detection
            }
        );
        s.handle_gesture(GestureEvent::ShortClick, 10, &mut board);
        assert_eq!(
            s.mode(),
            &Mode::Menu {
                selection: MenuChoice::Game
            }
        );
        assert_eq!(board.tones, vec![TONE_CLICK, TONE_CLICK]);
    }

    #[test]
    fn countdown_ignores_gestures_then_starts_round() {
        let mut s = session();
        let mut board = Recorder::default();
        s.handle_gesture(GestureEvent::LongPress, 0, &mut board);
        assert!(matches!(s.mode(), Mode::Countdown { remaining: 2, .. }));

        s.handle_gesture(GestureEvent::LongPress, 50, &mut board);
        s.advance(50, None, &mut board);
        assert!(matches!(s.mode(), Mode::Countdown { remaining: 2, .. }));

        s.advance(100, None, &mut board);
        assert!(matches!(s.mode(), Mode::Countdown { remaining: 1, .. }));

        s.advance(200, None, &mut board);
        let round = s.round().unwrap();
        assert_eq!(round.score, 0);
        assert_eq!(round.started_ms, 200);
        assert_eq!(s.vocabulary(), Vocabulary::Clicks);
    }

    #[test]
    fn announcement_suspends_scoring() {
        let mut s = session();
        let mut board = Recorder::default();
        s.handle_gesture(GestureEvent::LongPress, 0, &mut board);
        s.advance(100, None, &mut board);
        s.advance(200, None, &mut board);

        let target = s.round().unwrap().target;
        s.advance(300, Some(&raw_for(&target)), &mut board);
        assert_eq!(s.round().unwrap().score, 0);
        assert_eq!(s.screen(300), Screen::Announce { target: target.id });
    }

    #[test]
    fn match_scores_and_rotates_target() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);

        let t0 = s.round().unwrap().target;
        s.advance(now + 50, Some(&raw_for(&t0)), &mut board);

        let round = s.round().unwrap();
        assert_eq!(round.score, MATCH_AWARD);
        assert_ne!(round.target.id, t0.id);
        assert_eq!(
            round.hold,
            Some(Hold::Celebrate {
                until_ms: now + 150,
                found_in_ms: 50
            })
        );
        assert!(board.tones.contains(&TONE_MATCH));
        assert_eq!(board.leds.last(), Some(&indicator_for(&round.target)));
    }

    #[test]
    fn wrong_colour_does_not_score() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);

        let target = s.round().unwrap().target;
        let other = *s
            .palette()
            .targets()
            .iter()
            .find(|c| c.id != target.id)
            .unwrap();
        s.advance(now + 10, Some(&raw_for(&other)), &mut board);

        let round = s.round().unwrap();
        assert_eq!(round.score, 0);
        assert_eq!(round.target.id, target.id);
    }

    #[test]
    fn degenerate_sample_preserves_state() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);

        let before = s.round().unwrap().clone();
        s.advance(now + 10, Some(&RawSample::new(5, 5, 5, 0)), &mut board);
        let after = s.round().unwrap();
        assert_eq!(after.score, before.score);
        assert_eq!(after.target, before.target);
    }

    #[test]
    fn celebration_then_announcement_then_seeking() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);
        let t0 = s.round().unwrap().target;
        s.advance(now, Some(&raw_for(&t0)), &mut board);
        assert!(matches!(s.screen(now), Screen::Matched { score: 1, .. }));

        s.advance(now + 100, None, &mut board);
        assert!(matches!(s.round().unwrap().hold, Some(Hold::Announce { .. })));

        s.advance(now + 300, None, &mut board);
        assert_eq!(s.round().unwrap().hold, None);
        assert!(matches!(s.screen(now + 300), Screen::Seeking { score: 1, .. }));
    }

    #[test]
    fn timeout_ends_round_even_with_a_match_pending() {
        let mut s = session();
        let mut board = Recorder::default();
        start_round(&mut s, &mut board);

        let target = s.round().unwrap().target;
        s.advance(200 + 10_000, Some(&raw_for(&target)), &mut board);
        assert!(matches!(s.mode(), Mode::RoundEnd { score: 0, .. }));
        assert!(board.tones.contains(&TONE_ROUND_END));

        s.advance(200 + 10_499, None, &mut board);
        assert!(matches!(s.mode(), Mode::RoundEnd { .. }));
        s.advance(200 + 10_500, None, &mut board);
        assert!(matches!(s.mode(), Mode::Menu { .. }));
        assert_eq!(board.tones.last(), Some(&TONE_EXIT));
    }

    #[test]
    fn round_end_ignores_gestures_until_its_deadline() {
        let mut s = session();
        let mut board = Recorder::default();
        start_round(&mut s, &mut board);
        s.advance(200 + 10_000, None, &mut board);
        let Mode::RoundEnd { until_ms, .. } = *s.mode() else {
            panic!("expected round end");
        };

        let tones_before = board.tones.len();
        for event in [
            GestureEvent::ShortClick,
            GestureEvent::DoubleClick,
            GestureEvent::LongPress,
        ] {
            s.handle_gesture(event, until_ms - 100, &mut board);
            s.advance(until_ms - 100, None, &mut board);
            assert!(matches!(s.mode(), Mode::RoundEnd { score: 0, .. }));
        }
        assert_eq!(board.tones.len(), tones_before);

        s.advance(until_ms - 1, None, &mut board);
        assert!(matches!(s.mode(), Mode::RoundEnd { .. }));
        s.advance(until_ms, None, &mut board);
        assert_eq!(
            s.mode(),
            &Mode::Menu {
                selection: MenuChoice::Game
            }
        );
    }

    #[test]
    fn countdown_ticks_once_per_step() {
        let mut s = session();
        let mut board = Recorder::default();
        s.handle_gesture(GestureEvent::LongPress, 0, &mut board);
        assert_eq!(board.tones, vec![TONE_COUNTDOWN]);

        s.advance(100, None, &mut board);
        s.advance(200, None, &mut board);
        assert!(matches!(s.mode(), Mode::RoundActive(_)));
        assert_eq!(board.tones, vec![TONE_COUNTDOWN, TONE_COUNTDOWN]);
    }

    #[test]
    fn click_beeps_in_round_and_detection() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);
        let before = s.round().unwrap().clone();

        board.tones.clear();
        s.handle_gesture(GestureEvent::ShortClick, now, &mut board);
        assert_eq!(board.tones, vec![TONE_CLICK]);
        assert_eq!(s.round(), Some(&before));

        s.handle_gesture(GestureEvent::LongPress, now + 10, &mut board);
        assert_eq!(board.tones.last(), Some(&TONE_EXIT));

        s.handle_gesture(GestureEvent::ShortClick, now + 20, &mut board);
        board.tones.clear();
        s.handle_gesture(GestureEvent::LongPress, now + 30, &mut board);
        assert!(matches!(s.mode(), Mode::Detection(_)));
        assert_eq!(board.tones, vec![TONE_MODE_ENTER, TONE_MODE_ENTER]);

        board.tones.clear();
        s.handle_gesture(GestureEvent::ShortClick, now + 40, &mut board);
        assert_eq!(board.tones, vec![TONE_CLICK]);
        assert!(matches!(s.mode(), Mode::Detection(_)));
    }

    #[test]
    fn long_press_abandons_round() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);
        let t0 = s.round().unwrap().target;
        s.advance(now, Some(&raw_for(&t0)), &mut board);

        s.handle_gesture(GestureEvent::LongPress, now + 20, &mut board);
        assert!(matches!(s.mode(), Mode::Menu { .. }));
        assert_eq!(s.round(), None);
        assert_eq!(board.leds.last(), Some(&LedPattern::OFF));
    }

    #[test]
    fn double_click_skips_without_scoring() {
        let mut s = session();
        let mut board = Recorder::default();
        let now = start_round(&mut s, &mut board);
        let t0 = s.round().unwrap().target.id;

        s.handle_gesture(GestureEvent::DoubleClick, now, &mut board);
        let round = s.round().unwrap();
        assert_ne!(round.target.id, t0);
        assert_eq!(round.score, 0);
        assert!(matches!(round.hold, Some(Hold::Announce { .. })));
        assert_eq!(
            board.tones.iter().filter(|t| **t == TONE_SKIP).count(),
            2
        );
    }

    #[test]
    fn detection_reports_nearest_of_full_palette() {
        let mut s = session();
        let mut board = Recorder::default();
        s.handle_gesture(GestureEvent::ShortClick, 0, &mut board);
        s.handle_gesture(GestureEvent::LongPress, 10, &mut board);
        assert!(matches!(s.mode(), Mode::Detection(_)));

        let navy = *s.palette().get(ColorId::Navy).unwrap();
        s.advance(20, Some(&raw_for(&navy)), &mut board);
        let Mode::Detection(state) = s.mode() else {
            panic!("expected detection");
        };
        let detected = state.detected.unwrap();
        assert_eq!(detected.id, ColorId::Navy);
        assert!(detected.confident);
        assert_eq!(state.clear, 2000);

        // A dark read keeps the last verdict but drops the sample.
        s.advance(30, Some(&RawSample::new(0, 0, 0, 0)), &mut board);
        let Mode::Detection(state) = s.mode() else {
            panic!("expected detection");
        };
        assert_eq!(state.detected.unwrap().id, ColorId::Navy);
        assert_eq!(state.sample, None);

        s.handle_gesture(GestureEvent::LongPress, 40, &mut board);
        assert_eq!(
            s.mode(),
            &Mode::Menu {
                selection: MenuChoice::Detection
            }
        );
    }

    #[test]
    fn seeking_screen_counts_down_whole_seconds() {
        let mut s = session();
        let mut board = Recorder::default();
        start_round(&mut s, &mut board);
        // Round started at 200 and lasts 10 s.
        match s.screen(200 + 1) {
            Screen::Seeking { seconds_left, .. } => assert_eq!(seconds_left, 10),
            other => panic!("unexpected {other:?}"),
        }
        match s.screen(200 + 9_001) {
            Screen::Seeking { seconds_left, .. } => assert_eq!(seconds_left, 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
