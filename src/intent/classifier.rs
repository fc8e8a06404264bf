use crate::lexicon;
use crate::similarity::{LexicalSimilarity, SimilarityModel};

use super::types::Intent;

/// Minimum similarity for the fallback pass to accept an (intent, trigger)
/// pair. Strictly-greater comparison.
pub const SIMILARITY_THRESHOLD: f32 = 0.7;

/// Rule-based intent detection: keyword scoring first, similarity fallback
/// when no keyword lands, then the short-command overrides.
pub struct IntentClassifier {
    model: Box<dyn SimilarityModel + Send + Sync>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            model: Box::new(LexicalSimilarity),
        }
    }

    /// Swap the similarity backend. The keyword pass is unaffected.
    pub fn with_model(model: Box<dyn SimilarityModel + Send + Sync>) -> Self {
        Self { model }
    }

    pub fn detect_intent(&self, message: &str) -> Intent {
        let lowered = message.to_lowercase();

        // Bare "track"/"cancel" and cancel-plus-number outrank every scoring
        // rule, so they short-circuit here.
        if lowered.trim() == "track" {
            return Intent::OrderTracking;
        }
        if lowered.trim() == "cancel" {
            return Intent::OrderCancellation;
        }
        if lowered.contains("cancel") && Self::has_numeric_token(message) {
            return Intent::OrderCancellation;
        }

        // 1. Keyword pass: count trigger phrases contained in the text.
        // Strictly-greater comparison keeps the earlier intent on ties.
        let mut best_score = 0usize;
        let mut detected = Intent::Unknown;
        for intent in Intent::ORDERED {
            let mut score = 0usize;
            for phrase in lexicon::triggers(intent) {
                if lowered.contains(*phrase) {
                    score += 1;
                }
            }
            if score > best_score {
                best_score = score;
                detected = intent;
            }
        }

        // 2. Similarity fallback, only when no keyword landed anywhere.
        // Accept the running-best pair above the threshold; a pair that
        // cannot be scored is skipped.
        if detected == Intent::Unknown {
            let mut best_similarity = 0.0f32;
            for intent in Intent::ORDERED {
                for phrase in lexicon::triggers(intent) {
                    if let Some(similarity) = self.model.similarity(&lowered, phrase) {
                        // Running max across every pair, not per intent.
                        if similarity > SIMILARITY_THRESHOLD && similarity > best_similarity {
                            best_similarity = similarity;
                            detected = intent;
                        }
                    }
                }
            }
            if detected != Intent::Unknown {
                tracing::debug!(
                    "Similarity fallback chose '{}' ({:.2})",
                    detected,
                    best_similarity
                );
            }
        }

        detected
    }

    fn has_numeric_token(message: &str) -> bool {
        message
            .split_whitespace()
            .any(|token| token.chars().all(|c| c.is_ascii_digit()))
    }
}
