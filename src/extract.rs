use crate::lexicon;

/// Pattern-driven entity extraction over free text. Prefers structured
/// phrasing and falls back to the weakest reasonable signal rather than
/// failing; conversational input is unpredictable.
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// First known product stem in the text, with the "mix" qualifier
    /// capitalized for store lookups ("dosa mix" -> "dosa Mix").
    ///
    /// The replacement targets the lower-case spelling only, so "DOSA MIX"
    /// passes through unchanged. Known asymmetry, kept as-is.
    pub fn extract_product_name(&self, message: &str) -> Option<String> {
        let matched = lexicon::PRODUCT_RE.find(message)?;
        let mut product = matched.as_str().trim().to_string();
        if product.to_lowercase().contains("mix") && !product.ends_with("Mix") {
            product = product.replace("mix", "Mix");
        }
        Some(product)
    }

    /// Explicit "order ... 123" phrasing first, then the first digit run
    /// anywhere in the message. The fallback is deliberately permissive;
    /// callers gate it on an order-related intent.
    pub fn extract_order_id(&self, message: &str) -> Option<String> {
        if let Some(found) = lexicon::ORDER_ID_RE.captures(message).and_then(|c| c.get(1)) {
            return Some(found.as_str().to_string());
        }

        lexicon::NUMBER_RE
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|found| found.as_str().to_string())
    }
}
