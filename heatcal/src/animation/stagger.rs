use std::f64::consts::PI;
use std::time::Duration;

use rand::Rng;

/// Random entrance delay in `(0, 2 * base]`.
///
/// Drawn as `(cos(pi * u) + 1) * base` with `u` uniform in `[0, 1)`, which
/// bunches delays near both ends of the range.
pub fn stagger_delay<R: Rng + ?Sized>(rng: &mut R, base: Duration) -> Duration {
    let u: f64 = rng.random();
    delay_at(u, base)
}

pub(crate) fn delay_at(u: f64, base: Duration) -> Duration {
    let factor = (PI * u).cos() + 1.0;
    if factor.is_finite() && factor > 0.0 {
        base.mul_f64(factor)
    } else {
        Duration::ZERO
    }
}
