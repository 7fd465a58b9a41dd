// ColorQuest: Colour Palette & Nearest-Neighbour Classifier
//
// The palette is a fixed, ordered table of reference chromaticities. Each
// entry carries optional per-context tolerance overrides; anything left
// unset falls back to the context default from `config.rs`.
//
// `classify` returns the nearest entry and its distance; `matches` decides
// whether that distance is close enough for the given context.

use anyhow::{bail, ensure};

use crate::color::Chromaticity;
use crate::config::*;

// ---------------------------------------------------------------------------
// Colour identifiers
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorId {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Navy,
    Magenta,
    Brown,
    White,
}

impl ColorId {
    pub const COUNT: usize = 10;

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Purple => "Purple",
            Self::Navy => "Navy",
            Self::Magenta => "Magenta",
            Self::Brown => "Brown",
            Self::White => "White",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which tolerance table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Game rounds: five well-separated target hues.
    Game,
    /// Free recognition: ten hues, some visually close.
    Recognition,
}

// ---------------------------------------------------------------------------
// Palette entries
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorClass {
    pub id: ColorId,
    pub reference: Chromaticity,
    pub game_tolerance: Option<f32>,
    pub recognition_tolerance: Option<f32>,
}

impl ColorClass {
    pub const fn new(id: ColorId, r: f32, g: f32, b: f32) -> Self {
        Self {
            id,
            reference: Chromaticity::new(r, g, b),
            game_tolerance: None,
            recognition_tolerance: None,
        }
    }

    pub const fn game(mut self, tolerance: f32) -> Self {
        self.game_tolerance = Some(tolerance);
        self
    }

    pub const fn recognition(mut self, tolerance: f32) -> Self {
        self.recognition_tolerance = Some(tolerance);
        self
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    fn tolerance_override(&self, context: Context) -> Option<f32> {
        match context {
            Context::Game => self.game_tolerance,
            Context::Recognition => self.recognition_tolerance,
        }
    }
}

/// Classification result: the nearest class and its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub class: ColorClass,
    pub distance: f32,
}

/// Context-level fallback tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceDefaults {
    pub game: f32,
    pub recognition: f32,
}

impl Default for ToleranceDefaults {
    fn default() -> Self {
        Self {
            game: GAME_TOLERANCE_DEFAULT,
            recognition: RECOGNITION_TOLERANCE_DEFAULT,
        }
    }
}

/// Reference table (order matters: ties resolve to the earlier entry).
const STANDARD_CLASSES: [ColorClass; ColorId::COUNT] = [
    ColorClass::new(ColorId::Red, 1.0, 0.0, 0.0).game(0.8).recognition(0.9),
    ColorClass::new(ColorId::Green, 0.0, 1.0, 0.0).game(0.8).recognition(0.7),
    ColorClass::new(ColorId::Blue, 0.0, 0.0, 1.0).game(1.0).recognition(1.0),
    ColorClass::new(ColorId::Yellow, 1.0, 1.0, 0.0).game(0.7).recognition(0.8),
    ColorClass::new(ColorId::Orange, 1.0, 0.5, 0.0).recognition(0.7),
    ColorClass::new(ColorId::Purple, 0.5, 0.0, 1.0).game(0.8).recognition(0.7),
    ColorClass::new(ColorId::Navy, 0.0, 0.5, 1.0).recognition(0.7),
    ColorClass::new(ColorId::Magenta, 1.0, 0.0, 1.0).recognition(0.7),
    ColorClass::new(ColorId::Brown, 0.3, 0.3, 0.0),
    ColorClass::new(ColorId::White, 1.0, 1.0, 1.0).recognition(0.9),
];

/// Colours usable as game objectives, in announcement order.
const STANDARD_TARGETS: [ColorId; 5] = [
    ColorId::Red,
    ColorId::Green,
    ColorId::Blue,
    ColorId::Yellow,
    ColorId::Purple,
];

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Palette {
    classes: Vec<ColorClass>,
    targets: Vec<ColorClass>,
    /// Position of each `ColorId` in `classes`.
    lookup: [Option<usize>; ColorId::COUNT],
    defaults: ToleranceDefaults,
}

impl Palette {
    /// Build a palette, validating the target subset against the full table.
    pub fn new(
        classes: Vec<ColorClass>,
        targets: &[ColorId],
        defaults: ToleranceDefaults,
    ) -> anyhow::Result<Self> {
        ensure!(!classes.is_empty(), "palette has no colours");
        ensure!(!targets.is_empty(), "palette has no target colours");
        ensure!(
            targets.len() < classes.len(),
            "target colours must be a strict subset of the palette"
        );
        ensure!(
            is_valid_tolerance(defaults.game) && is_valid_tolerance(defaults.recognition),
            "default tolerances must be finite and positive"
        );

        let mut lookup = [None; ColorId::COUNT];
        for (ix, class) in classes.iter().enumerate() {
            let slot = &mut lookup[class.id.index()];
            if slot.is_some() {
                bail!("duplicate palette entry for {}", class.name());
            }
            *slot = Some(ix);

            for tolerance in [class.game_tolerance, class.recognition_tolerance]
                .into_iter()
                .flatten()
            {
                ensure!(
                    is_valid_tolerance(tolerance),
                    "tolerance for {} must be finite and positive",
                    class.name()
                );
            }
        }

        let mut target_classes = Vec::with_capacity(targets.len());
        for id in targets {
            let Some(ix) = lookup[id.index()] else {
                bail!("target {} is not in the palette", id.name());
            };
            ensure!(
                !target_classes.iter().any(|c: &ColorClass| c.id == *id),
                "target {} listed twice",
                id.name()
            );
            target_classes.push(classes[ix]);
        }

        Ok(Self {
            classes,
            targets: target_classes,
            lookup,
            defaults,
        })
    }

    /// The ten-colour palette with the five game targets.
    pub fn standard() -> anyhow::Result<Self> {
        Self::new(
            STANDARD_CLASSES.to_vec(),
            &STANDARD_TARGETS,
            ToleranceDefaults::default(),
        )
    }

    pub fn classes(&self) -> &[ColorClass] {
        &self.classes
    }

    pub fn targets(&self) -> &[ColorClass] {
        &self.targets
    }

    pub fn get(&self, id: ColorId) -> Option<&ColorClass> {
        self.lookup[id.index()].map(|ix| &self.classes[ix])
    }

    /// Resolve the tolerance for `class` in `context`, falling back to the
    /// context default when the class has no override.
    pub fn tolerance(&self, class: &ColorClass, context: Context) -> f32 {
        class.tolerance_override(context).unwrap_or(match context {
            Context::Game => self.defaults.game,
            Context::Recognition => self.defaults.recognition,
        })
    }

    /// `true` iff `distance` is strictly below the resolved tolerance.
    pub fn matches(&self, distance: f32, class: &ColorClass, context: Context) -> bool {
        distance < self.tolerance(class, context)
    }
}

fn is_valid_tolerance(tolerance: f32) -> bool {
    tolerance.is_finite() && tolerance > 0.0
}

/// Nearest-neighbour lookup over `classes`.
///
/// Ties resolve to the first class in iteration order. Returns `None` only
/// for an empty slice, which a validated `Palette` never hands out.
pub fn classify(sample: &Chromaticity, classes: &[ColorClass]) -> Option<Verdict> {
    let mut best: Option<Verdict> = None;

    for class in classes {
        let distance = sample.distance(&class.reference);
        match best {
            Some(ref current) if distance >= current.distance => {}
            _ => {
                best = Some(Verdict {
                    class: *class,
                    distance,
                })
            }
        }
    }

    best
}
