use rand::{seq::index, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::ident::PortId;

/// The single source of randomness for a simulation run.
///
/// Every draw goes through this type so that a run is fully determined by
/// its seed.
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Xoshiro256PlusPlus,
}

impl SimRng {
    #[must_use]
    pub fn from_seed(seed: u64) -> SimRng {
        SimRng {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Draws `u` uniformly from `[0, 1)` and reports whether `u < p`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// A port drawn uniformly from `[0, nr_ports)`.
    pub fn port(&mut self, nr_ports: usize) -> PortId {
        PortId::new(self.index(nr_ports))
    }

    /// An index drawn uniformly from `[0, len)`. `len` must be nonzero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.rng.gen_range(0..len)
    }

    /// `k` distinct indices from `[0, len)`, sampled without replacement and
    /// returned in ascending order.
    pub fn choose_k(&mut self, len: usize, k: usize) -> Vec<usize> {
        let k = k.min(len);
        let mut picked = index::sample(&mut self.rng, len, k).into_vec();
        picked.sort_unstable();
        picked
    }
}
