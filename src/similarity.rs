use std::collections::HashMap;

/// Text-to-text similarity in [0, 1]. `None` means the pair cannot be scored
/// (no usable features on either side); callers treat that as "no match for
/// this pair" and move on, never as a failure.
pub trait SimilarityModel {
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;
}

/// Deterministic bag-of-features cosine over lower-cased word tokens plus
/// boundary-padded character trigrams. No model files, no randomness, so
/// classification stays idempotent.
///
/// The trigram features let near-misses ("helllo" vs "hello") score high
/// while unrelated words stay near zero; the word features pull shared
/// vocabulary ("add ... to cart" vs "add to cart") over the threshold.
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    fn features(text: &str) -> HashMap<String, f32> {
        let mut counts: HashMap<String, f32> = HashMap::new();
        let lowered = text.to_lowercase();

        for token in lowered.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }

            *counts.entry(format!("w:{}", token)).or_insert(0.0) += 1.0;

            // '^' and '$' padding keeps word boundaries significant.
            let padded: Vec<char> = std::iter::once('^')
                .chain(token.chars())
                .chain(std::iter::once('$'))
                .collect();
            for gram in padded.windows(3) {
                let key: String = gram.iter().collect();
                *counts.entry(format!("g:{}", key)).or_insert(0.0) += 1.0;
            }
        }

        counts
    }
}

impl SimilarityModel for LexicalSimilarity {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let left = Self::features(a);
        let right = Self::features(b);

        if left.is_empty() || right.is_empty() {
            return None;
        }

        let mut dot = 0.0f32;
        for (key, weight) in &left {
            if let Some(other) = right.get(key) {
                dot += weight * other;
            }
        }

        let left_norm = left.values().map(|w| w * w).sum::<f32>().sqrt();
        let right_norm = right.values().map(|w| w * w).sum::<f32>().sqrt();
        if left_norm == 0.0 || right_norm == 0.0 {
            return None;
        }

        Some(dot / (left_norm * right_norm))
    }
}
