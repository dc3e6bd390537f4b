//! Random anchor generators.
//!
//! All generators take the RNG as a parameter, so a seeded
//! [`StdRng`](rand::rngs::StdRng) reproduces a palette exactly.

use hue_space::Hsl;
use rand::Rng;

use crate::engine::ColorPath;

/// Two anchors: a light one at `start_hue` and a darker one 60–240° away.
#[must_use]
pub fn random_hsl_pair<R: Rng + ?Sized>(start_hue: f64, rng: &mut R) -> [Hsl; 2] {
    let s0: f64 = rng.random();
    let s1: f64 = rng.random();
    let l0 = rng.random::<f64>().mul_add(0.2, 0.75);
    let l1 = rng.random::<f64>().mul_add(0.2, 0.3);
    let h1 = start_hue + rng.random::<f64>().mul_add(180.0, 60.0);
    [
        Hsl::new(start_hue, s0, l0).normalized(),
        Hsl::new(h1, s1, l1).normalized(),
    ]
}

/// Light, dark, light: three anchors sharing a hue jump from the first.
#[must_use]
pub fn random_hsl_triple<R: Rng + ?Sized>(start_hue: f64, rng: &mut R) -> [Hsl; 3] {
    let s: [f64; 3] = [rng.random(), rng.random(), rng.random()];
    let l = [
        rng.random::<f64>().mul_add(0.2, 0.75),
        rng.random::<f64>() * 0.2,
        rng.random::<f64>().mul_add(0.2, 0.75),
    ];
    let h1 = start_hue + rng.random::<f64>().mul_add(180.0, 60.0);
    [
        Hsl::new(start_hue, s[0], l[0]).normalized(),
        Hsl::new(h1, s[1], l[1]).normalized(),
        Hsl::new(h1, s[2], l[2]).normalized(),
    ]
}

/// `count` anchors with hues evenly spread from a random base, each nudged
/// by up to `jitter` degrees either way. Saturation falls in `[0.5, 1)`,
/// lightness in `[0.3, 0.8)`.
#[must_use]
pub fn spaced_anchor_colors<R: Rng + ?Sized>(count: usize, jitter: f64, rng: &mut R) -> Vec<Hsl> {
    if count == 0 {
        return Vec::new();
    }
    let base = rng.random::<f64>() * 360.0;
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| {
            let offset = (rng.random::<f64>() - 0.5) * jitter * 2.0;
            let hue = (i as f64).mul_add(step, base) + offset;
            let s = rng.random::<f64>().mul_add(0.5, 0.5);
            let l = rng.random::<f64>().mul_add(0.5, 0.3);
            Hsl::new(hue, s, l).normalized()
        })
        .collect()
}

/// Scramble a path in place: each hue moves back by up to 90°, saturation
/// is re-rolled, lightness moves by up to ±0.05.
pub fn randomize<R: Rng + ?Sized>(path: &mut ColorPath, rng: &mut R) {
    path.recolor_all(|c| {
        let h = c.h + rng.random::<f64>().mul_add(90.0, -90.0);
        let s = rng.random::<f64>();
        let l = c.l + rng.random::<f64>().mul_add(0.1, -0.05);
        Hsl::new(h, s, l)
    });
    tracing::debug!(anchors = path.anchors().len(), "path randomized");
}
