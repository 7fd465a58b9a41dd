// ColorQuest: Target Rotation
//
// Picks the next colour the player has to find. The same target is never
// handed out twice in a row while more than one target is eligible.

use crate::board::RandomSource;
use crate::palette::{ColorClass, ColorId};

#[derive(Debug, Clone, Default)]
pub struct TargetPicker {
    last: Option<ColorId>,
}

impl TargetPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<ColorId> {
        self.last
    }

    /// Forget the previous target (a fresh round may start on any colour).
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Uniform choice among `targets`, excluding the previous pick.
    ///
    /// Returns `None` only when `targets` is empty.
    pub fn next<R: RandomSource>(
        &mut self,
        targets: &[ColorClass],
        rng: &mut R,
    ) -> Option<ColorClass> {
        let excluded = match (self.last, targets.len()) {
            (_, 0) => return None,
            (_, 1) => None,
            (Some(last), _) => targets.iter().position(|c| c.id == last),
            (None, _) => None,
        };

        let candidates = targets.len() - usize::from(excluded.is_some());
        let mut ix = rng.next_u32() as usize % candidates;
        if let Some(skip) = excluded {
            if ix >= skip {
                ix += 1;
            }
        }

        let picked = targets[ix];
        self.last = Some(picked.id);
        Some(picked)
    }
}
