// ColorQuest: Chromaticity Normaliser
//
// Turns one raw TCS34725 reading into a brightness-independent 3-vector:
// each channel is divided by the clear channel, then the result is scaled so
// the strongest channel reads exactly 1.0.

/// One poll of the colour sensor (16-bit counts per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub clear: u16,
}

impl RawSample {
    pub const fn new(red: u16, green: u16, blue: u16, clear: u16) -> Self {
        Self {
            red,
            green,
            blue,
            clear,
        }
    }
}

/// Normalised colour, every component in `[0, 1]` with the maximum at 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Chromaticity {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Chromaticity {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Normalise a raw reading.
    ///
    /// Returns `None` for a degenerate sample (no light on the clear channel,
    /// or no light on any colour channel); the caller skips classification
    /// for that tick.
    pub fn from_raw(raw: &RawSample) -> Option<Self> {
        if raw.clear == 0 {
            return None;
        }

        let clear = f32::from(raw.clear);
        let r = f32::from(raw.red) / clear;
        let g = f32::from(raw.green) / clear;
        let b = f32::from(raw.blue) / clear;

        let max = r.max(g).max(b);
        if max <= 0.0 {
            return None;
        }

        Some(Self::new(r / max, g / max, b / max))
    }

    /// Euclidean distance in normalised RGB space.
    pub fn distance(&self, other: &Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn max_component(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn zero_clear_is_degenerate() {
        assert_eq!(Chromaticity::from_raw(&RawSample::new(10, 20, 30, 0)), None);
    }

    #[test]
    fn dark_colour_channels_are_degenerate() {
        assert_eq!(Chromaticity::from_raw(&RawSample::new(0, 0, 0, 120)), None);
    }

    #[test]
    fn strongest_channel_becomes_one() {
        let c = Chromaticity::from_raw(&RawSample::new(400, 100, 200, 800)).unwrap();
        assert!((c.r - 1.0).abs() < EPS);
        assert!((c.g - 0.25).abs() < EPS);
        assert!((c.b - 0.5).abs() < EPS);
    }

    #[test]
    fn normalisation_holds_across_count_ranges() {
        let samples = [
            RawSample::new(1, 0, 0, 1),
            RawSample::new(0, 65535, 1, 1),
            RawSample::new(1234, 4321, 999, 65535),
            RawSample::new(65535, 65535, 65535, 3),
            RawSample::new(7, 7, 8, 300),
        ];
        for raw in samples {
            let c = Chromaticity::from_raw(&raw).unwrap();
            assert!((c.max_component() - 1.0).abs() < EPS, "{raw:?} -> {c:?}");
            for v in [c.r, c.g, c.b] {
                assert!((0.0..=1.0 + EPS).contains(&v), "{raw:?} -> {c:?}");
            }
        }
    }

    #[test]
    fn brightness_does_not_change_chromaticity() {
        let dim = Chromaticity::from_raw(&RawSample::new(30, 60, 15, 100)).unwrap();
        let bright = Chromaticity::from_raw(&RawSample::new(300, 600, 150, 1000)).unwrap();
        assert!(dim.distance(&bright) < EPS);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Chromaticity::new(1.0, 0.0, 0.0);
        let b = Chromaticity::new(0.0, 1.0, 0.0);
        assert!((a.distance(&b) - 2f32.sqrt()).abs() < EPS);
        assert_eq!(a.distance(&a), 0.0);
    }
}
