//! Canvas spark simulation.

use rand::Rng;

pub const MAX_SPARKS: usize = 50;
pub const SPAWN_CHANCE: f64 = 0.1;
const LIFT: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub alpha: f64,
    pub life: f64,
    pub decay: f64,
}

impl Spark {
    /// A spark just below the bottom edge, drifting upward.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: height + 10.0,
            vx: (rng.gen::<f64>() - 0.5) * 2.0,
            vy: -rng.gen::<f64>() * 3.0 - 1.0,
            size: rng.gen::<f64>() * 3.0 + 1.0,
            alpha: rng.gen::<f64>() * 0.5 + 0.2,
            life: 1.0,
            decay: rng.gen::<f64>() * 0.01 + 0.005,
        }
    }

    /// Integrates one frame. Returns `false` once the spark is spent.
    pub fn advance(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= self.decay;
        self.vy -= LIFT;
        self.life > 0.0 && self.y > -10.0
    }

    pub fn fill_style(&self) -> String {
        format!("rgba(0, 102, 204, {:.3})", self.alpha)
    }
}

#[derive(Debug, Default)]
pub struct GravityField {
    sparks: Vec<Spark>,
}

impl GravityField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    /// One animation frame: maybe spawn, then advance and cull.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f64, height: f64) {
        if self.sparks.len() < MAX_SPARKS && rng.gen_bool(SPAWN_CHANCE) {
            self.sparks.push(Spark::spawn(rng, width, height));
        }
        self.sparks.retain_mut(Spark::advance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_exceeds_cap() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = GravityField::new();
        for _ in 0..5_000 {
            field.step(&mut rng, 800.0, 600.0);
            assert!(field.len() <= MAX_SPARKS);
        }
    }

    #[test]
    fn sparks_rise_and_expire() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = Spark::spawn(&mut rng, 100.0, 100.0);
        let y0 = s.y;
        assert!(s.advance());
        assert!(s.y < y0);
        let mut frames = 1;
        while s.advance() {
            frames += 1;
        }
        // decay >= 0.005 bounds the lifetime
        assert!(frames <= 200);
    }
}
