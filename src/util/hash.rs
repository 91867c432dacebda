use std::hash::{BuildHasher, Hash, Hasher};

#[derive(Debug, Clone)]
#[allow(unused)]
pub struct FixedHash<T: Eq> {
    hash: u64,
    value: T,
}

impl<T: Eq> FixedHash<T> {
    #[allow(unused)]
    pub const fn new(hash: u64, value: T) -> FixedHash<T> {
        FixedHash {
            hash,
            value,
        }
    }

    #[allow(unused)]
    pub fn value(self) -> T {
        self.value
    }
}

impl<T: Eq> Hash for FixedHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

// Equality deliberately ignores the hash, so two values can be forced to collide while
// remaining distinct keys.
impl<T: Eq> PartialEq for FixedHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for FixedHash<T> {}

#[derive(Debug)]
pub struct PassthroughHasher {
    state: u64,
}

impl Hasher for PassthroughHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut offset = 0_u64;
        for byte in bytes {
            self.state ^= (*byte as u64) << (offset * 8);
            offset = (offset + 1) % 8;
        }
    }

    // Hashing a u64 routes through here, making the final hash exactly the written value on
    // every platform.
    fn write_u64(&mut self, i: u64) {
        self.state = i;
    }
}

#[derive(Debug, Default, Clone)]
pub struct PassthroughHasherBuilder;

impl BuildHasher for PassthroughHasherBuilder {
    type Hasher = PassthroughHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PassthroughHasher {
            state: 0
        }
    }
}
