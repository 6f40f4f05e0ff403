/// Keyed counter generator for trait and reward draws.
///
/// The seed is folded from the realm's key hash at initialization and the
/// counter advances on every draw, so a caller replaying the same request
/// cannot steer an outcome. A production substrate would stand a VRF
/// behind this same surface.
#[derive(Debug, Clone)]
pub struct EntropyPool {
    seed: u64,
    counter: u64,
}

impl EntropyPool {
    pub fn from_key_hash(key_hash: &str) -> Self {
        Self {
            seed: fold_key(key_hash),
            counter: 0,
        }
    }

    pub fn next(&mut self, salt: u64) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        mix(self.seed, self.counter, salt)
    }

    /// Uniform draw from `0..=max_inclusive`.
    pub fn next_in_range(&mut self, salt: u64, max_inclusive: u64) -> u64 {
        if max_inclusive == u64::MAX {
            return self.next(salt);
        }
        self.next(salt) % (max_inclusive + 1)
    }

    /// Uniform draw from `0..=max_inclusive` over the full u128 range,
    /// built from two 64-bit draws.
    pub fn next_amount(&mut self, salt: u64, max_inclusive: u128) -> u128 {
        if max_inclusive == u128::MAX {
            let high = u128::from(self.next(salt));
            let low = u128::from(self.next(salt.wrapping_add(1)));
            return (high << 64) | low;
        }
        let high = u128::from(self.next(salt));
        let low = u128::from(self.next(salt.wrapping_add(1)));
        ((high << 64) | low) % (max_inclusive + 1)
    }
}

fn fold_key(key_hash: &str) -> u64 {
    let mut hash = 0_u64;
    for byte in key_hash.as_bytes() {
        hash = hash.rotate_left(5) ^ u64::from(*byte);
        hash = hash.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    }
    hash
}

fn mix(seed: u64, counter: u64, salt: u64) -> u64 {
    let mut value = seed ^ counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    value ^= salt.wrapping_mul(0x517C_C1B7_2722_0A95);
    value ^= value.rotate_left(29);
    value = value.wrapping_mul(0x517C_C1B7_2722_0A95);
    value ^ (value >> 31)
}
