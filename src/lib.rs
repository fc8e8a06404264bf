pub mod engine;
pub mod extract;
pub mod gateway;
pub mod intent;
pub mod lexicon;
pub mod session;
pub mod similarity;
pub mod store;

// Re-export the surface most callers wire together.
pub use engine::{DialogueContext, DialogueEngine, DialogueResult, RedirectHint};
pub use gateway::{ChatGateway, ChatResponse};
pub use intent::{Intent, IntentClassifier};
pub use session::{Cart, Session};
pub use store::{CommerceStore, MemoryStore};
