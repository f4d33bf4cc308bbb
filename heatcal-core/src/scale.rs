use heatcal_types::{Fill, Rgb};

/// Round half towards positive infinity, matching how browsers round.
#[must_use]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Maps a continuous domain onto a continuous range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Scale mapping `domain` onto `range`.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Position of `v`. A degenerate domain maps everything to the range start.
    #[must_use]
    pub fn at(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }
}

/// Evenly spaced, integer-aligned bands over a range.
///
/// `step = floor(len / (n - padding + 2*outer))`, the leftover pixels are
/// split around the bands, and each band is `round(step * (1 - padding))`
/// wide.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    starts: Vec<f64>,
    bandwidth: f64,
}

impl BandScale {
    /// `n` bands over `[start, stop]`.
    #[must_use]
    pub fn round_bands(n: usize, start: f64, stop: f64, padding: f64, outer_padding: f64) -> Self {
        if n == 0 {
            return Self {
                starts: Vec::new(),
                bandwidth: 0.0,
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let count = n as f64;
        let denom = count - padding + 2.0 * outer_padding;
        let step = if denom > 0.0 {
            ((stop - start) / denom).floor()
        } else {
            0.0
        };
        let error = stop - start - (count - padding) * step;
        let origin = start + round_half_up(error / 2.0);
        #[allow(clippy::cast_precision_loss)]
        let starts = (0..n).map(|i| origin + step * i as f64).collect();
        Self {
            starts,
            bandwidth: round_half_up(step * (1.0 - padding)).max(0.0),
        }
    }

    /// Start of band `i`, if it exists.
    #[must_use]
    pub fn at(&self, i: usize) -> Option<f64> {
        self.starts.get(i).copied()
    }

    /// Width of every band.
    #[must_use]
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Number of bands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// True when there are no bands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// White-to-colour ramp over `[-0.15*max, max]`.
///
/// The negative lower bound keeps small non-zero values visibly tinted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    max: f64,
    high: Rgb,
}

impl ColorScale {
    /// Fraction of `max` the ramp extends below zero.
    pub const LOW_EXTENT: f64 = 0.15;

    /// Ramp topping out at `high` for `max`. `None` when `max` is not positive.
    #[must_use]
    pub fn new(max: f64, high: Rgb) -> Option<Self> {
        (max > 0.0 && max.is_finite()).then_some(Self { max, high })
    }

    /// Colour of `v`.
    #[must_use]
    pub fn at(&self, v: f64) -> Rgb {
        let low = -Self::LOW_EXTENT * self.max;
        let t = (v - low) / (self.max - low);
        Rgb::WHITE.mix(self.high, t)
    }

    /// Solid fill of `v`.
    #[must_use]
    pub fn fill(&self, v: f64) -> Fill {
        Fill::Solid(self.at(v))
    }
}
