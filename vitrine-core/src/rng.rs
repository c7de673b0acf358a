/// Deterministic random stream for procedural placement
///
/// Each call hashes an incrementing counter with the seed, so a view built
/// twice from the same seed comes out identical.
#[derive(Debug, Clone)]
pub struct SceneRng {
    seed: u64,
    counter: u32,
}

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Independent stream for one consumer of a shared seed
    pub fn fork(&self, stream: u64) -> Self {
        Self::new(self.seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }

    /// Uniform value in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        let h = hash(self.counter, self.seed);
        self.counter = self.counter.wrapping_add(1);
        (h >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform value in [-half_width, half_width)
    pub fn centered(&mut self, half_width: f32) -> f32 {
        (self.next_f32() - 0.5) * 2.0 * half_width
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }
}

fn hash(counter: u32, seed: u64) -> u32 {
    let mut h = (seed as u32) ^ ((seed >> 32) as u32).rotate_left(16);
    h = h.wrapping_mul(374761393);
    h = h.wrapping_add(counter.wrapping_mul(668265263));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    h = h.wrapping_mul(2246822519);
    h ^= h >> 15;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SceneRng::new(7);
        let mut b = SceneRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_values_in_unit_range() {
        let mut rng = SceneRng::new(0xdead_beef);
        let values: Vec<f32> = (0..1000).map(|_| rng.next_f32()).collect();
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        assert!((mean - 0.5).abs() < 0.1);
    }

    #[test]
    fn test_forks_diverge() {
        let root = SceneRng::new(42);
        let mut a = root.fork(1);
        let mut b = root.fork(2);
        let same = (0..16).filter(|_| a.next_f32() == b.next_f32()).count();
        assert!(same < 16);
    }
}
