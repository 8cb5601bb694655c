use crc32fast::Hasher;
use uuid::Uuid;

/// Prefix shared by every component id
pub const ID_PREFIX: &str = "comp_";

/// Derive a short document seed from arbitrary bytes using CRC32
pub fn get_seed(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    format!("{:08x}", hasher.finalize())
}

/// Sequential id generator for component instances within a document.
///
/// Ids look like `comp_1a2b3c4d-7`: a per-generator seed plus a counter.
/// A generator never hands out the same id twice.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    /// Generator with a random seed
    pub fn new() -> Self {
        Self::from_seed(get_seed(Uuid::new_v4().as_bytes()))
    }

    /// Generator with a fixed seed (deterministic ids, for tests)
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}{}-{}", ID_PREFIX, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable() {
        let seed1 = get_seed(b"document");
        let seed2 = get_seed(b"document");
        assert_eq!(seed1, seed2);
        assert_eq!(seed1.len(), 8);

        assert_ne!(seed1, get_seed(b"other"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert_eq!(id1, "comp_abc-1");
        assert_eq!(id2, "comp_abc-2");
    }

    #[test]
    fn test_random_seeds_differ() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();
        assert_ne!(a.seed(), b.seed());
    }
}
