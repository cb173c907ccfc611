//! Deterministic randomness for reproducible tests

/// Xorshift PRNG; the same seed always yields the same sequence
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        // Xorshift never leaves the all-zero state
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / 16_777_216.0
    }

    pub fn gen_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Standard normal sample (Box-Muller)
    pub fn gaussian(&mut self) -> f64 {
        // Shift into (0, 1] so ln never sees zero
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    pub fn gaussian_vec(&mut self, len: usize, std_dev: f64) -> Vec<f64> {
        (0..len).map(|_| std_dev * self.gaussian()).collect()
    }
}
