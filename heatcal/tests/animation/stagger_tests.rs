use std::time::Duration;

use heatcal::animation::{schedule, stagger_delay};
use heatcal::{CellGeometry, CellId, Fill, Overflow, Point, Rect};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Generator that always yields the same word, so `random::<f64>()` is fixed.
struct Fixed(u64);

impl RngCore for Fixed {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for (i, b) in dst.iter_mut().enumerate() {
            *b = self.0.to_le_bytes()[i % 8];
        }
    }
}

fn cell(day: u32) -> CellGeometry {
    CellGeometry {
        id: CellId::Day {
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        },
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        corner_radius: 10.0,
        fill: Fill::Transparent,
        opacity: 1.0,
        name: String::new(),
        value: 0,
        tooltip_anchor: Point::new(10.0, 10.0),
        overflow: Overflow::Flip,
    }
}

#[test]
fn fixed_draws_give_exact_delays() {
    let base = Duration::from_millis(500);
    // u = 0 -> cos(0) + 1 = 2
    assert_eq!(stagger_delay(&mut Fixed(0), base), Duration::from_secs(1));
    // u = 0.5 -> cos(pi/2) + 1 = 1
    assert_eq!(stagger_delay(&mut Fixed(1 << 63), base), base);
    // u -> 1 -> close to zero
    assert!(stagger_delay(&mut Fixed(u64::MAX), base) < Duration::from_micros(1));
}

#[test]
fn delays_stay_within_twice_the_base() {
    let base = Duration::from_millis(500);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let delay = stagger_delay(&mut rng, base);
        assert!(delay <= base * 2);
    }
}

#[test]
fn schedule_shares_duration_and_keeps_order() {
    let base = Duration::from_millis(500);
    let mut rng = Fixed(1 << 63);
    let cells = vec![cell(1), cell(2), cell(3)];
    let entrances = schedule(cells.clone(), base, &mut rng);
    assert_eq!(entrances.len(), 3);
    for (e, c) in entrances.iter().zip(&cells) {
        assert_eq!(&e.cell, c);
        assert_eq!(e.timing.delay, base);
        assert_eq!(e.timing.duration, base);
    }
}

#[test]
fn same_seed_same_schedule() {
    let base = Duration::from_millis(500);
    let cells: Vec<_> = (1..=20).map(cell).collect();
    let a = schedule(cells.clone(), base, &mut StdRng::seed_from_u64(9));
    let b = schedule(cells, base, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}
