// ============================================================
// Layer 4 — Feature Encoder
// ============================================================
// Turns an item name into a fixed-length numeric vector the
// network can consume.
//
// The scheme is character-bucket hashing:
//   1. Lowercase the name (so "Teh" and "teh" encode equally)
//   2. Hash every character into one of FEATURE_LEN buckets
//      with a fixed multiplicative hash
//   3. Divide each bucket count by the total character count
//      so every component lies in [0, 1]
//
// Properties we rely on downstream:
//   - Pure and deterministic: same text in, same vector out,
//     across runs and machines
//   - Total: ANY character sequence is representable — there
//     is no rejection path and no failure mode
//   - The empty string encodes to the zero vector
//
// This is intentionally not a learned embedding: the encoder
// has no parameters, so a persisted model snapshot plus this
// function fully determines every prediction.
//
// Reference: Rust Book §8 (Strings in Rust)

/// Length of every feature vector. The network's input size
/// must match this exactly — snapshot loading checks it.
pub const FEATURE_LEN: usize = 32;

pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// The fixed output length of `encode`.
    pub fn len(&self) -> usize {
        FEATURE_LEN
    }

    /// Encode a name into a FEATURE_LEN vector with every
    /// component in [0, 1].
    pub fn encode(&self, name: &str) -> Vec<f64> {
        let mut features = vec![0.0; FEATURE_LEN];

        // Case normalisation happens before anything else so the
        // encoding is insensitive to how the catalog spells things
        let lowered = name.to_lowercase();

        let mut count = 0usize;
        for c in lowered.chars() {
            features[bucket(c)] += 1.0;
            count += 1;
        }

        // Empty input → zero vector, by construction
        if count > 0 {
            let total = count as f64;
            for value in features.iter_mut() {
                *value /= total;
            }
        }

        features
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed multiplicative hash into the bucket range. The exact
/// constant is arbitrary but frozen: changing it invalidates
/// every persisted snapshot.
fn bucket(c: char) -> usize {
    (c as usize).wrapping_mul(31) % FEATURE_LEN
}
