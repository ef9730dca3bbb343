//! Deterministic decorative dot pattern. The same seed always yields the same dots.

use crate::theme::Mode;

/// 32-bit string hash: `h = h * 31 + unit` over UTF-16 code units, wrapping.
pub fn seed_hash(seed: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in seed.encode_utf16() {
        h = (h << 5).wrapping_sub(h).wrapping_add(unit as i32);
    }
    h as u32
}

/// Seed string for a CV: `"<name>:<mode>"`.
pub fn seed_for(name: &str, mode: Mode) -> String {
    format!("{}:{}", name, mode.as_str())
}

/// Mulberry32: small, fast, and identical across platforms.
#[derive(Debug, Clone)]
pub struct PatternRng {
    state: u32,
}

impl PatternRng {
    pub fn new(seed: u32) -> Self {
        PatternRng { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    /// 0..1, how strongly the dot is tinted toward the accent color.
    pub strength: f32,
}

/// `count` dots inside a `width` x `height` box, derived from `seed`.
pub fn dot_pattern(seed: &str, count: usize, width: f32, height: f32) -> Vec<Dot> {
    let mut rng = PatternRng::new(seed_hash(seed));
    (0..count)
        .map(|_| Dot {
            x: rng.next_f32() * width,
            y: rng.next_f32() * height,
            r: 1.5 + rng.next_f32() * 4.5,
            strength: 0.15 + rng.next_f32() * 0.45,
        })
        .collect()
}
