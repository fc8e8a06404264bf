use serde::{Deserialize, Serialize};

use crate::engine::{DialogueContext, DialogueEngine, RedirectHint};
use crate::extract::EntityExtractor;
use crate::session::Session;
use crate::store::{CancelOutcome, CommerceStore};

/// Payload for one chat turn: the reply text plus an optional redirect
/// target. Serializes without the redirect key when there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectHint>,
}

/// Caller-side wrapper around the engine: runs the turn, then applies a
/// first-match-wins chain of phrase rules that add redirects, rewrite the
/// reply for checkout and cart navigation, perform explicit cancellations
/// against the store, and answer "track order" requests with live status.
pub struct ChatGateway<S: CommerceStore> {
    engine: DialogueEngine<S>,
    extractor: EntityExtractor,
}

impl<S: CommerceStore> ChatGateway<S> {
    pub fn new(engine: DialogueEngine<S>) -> Self {
        Self {
            engine,
            extractor: EntityExtractor::new(),
        }
    }

    pub fn engine(&self) -> &DialogueEngine<S> {
        &self.engine
    }

    pub fn handle(&self, session: &mut Session, raw: &str) -> ChatResponse {
        // Lower-cased once here so the phrase rules below and the engine's
        // classification share one casing.
        let message = raw.to_lowercase();

        let result = self.engine.process_message(DialogueContext {
            message: &message,
            user: session.user,
            cart: Some(&mut session.cart),
        });

        let mut response = ChatResponse {
            response: result.reply,
            redirect: result.redirect_hint,
        };

        if message.contains("add to cart") || response.response.contains("added to your cart") {
            // Successful additions stop here so the checkout rewrite below
            // cannot clobber the confirmation. Hint only when checkout was
            // asked for in the same breath.
            if message.contains("proceed to checkout") {
                response.redirect = Some(RedirectHint::Checkout);
            }
        } else if message.contains("place order") || message.contains("checkout") {
            if session.user.is_some() && !session.cart.is_empty() {
                response.redirect = Some(RedirectHint::Checkout);
                response.response =
                    "Taking you to checkout to complete your order.".to_string();
            } else {
                response.response =
                    "Your cart is empty. Add products before checking out.".to_string();
            }
        } else if message.contains("cancel order") {
            self.explicit_cancel(session, &message, &mut response);
        } else if message.contains("view cart") {
            if session.user.is_some() {
                response.redirect = Some(RedirectHint::Cart);
                response.response = "Taking you to your cart.".to_string();
            }
        } else if message.contains("track order") {
            // Keyword scoring ties this phrasing toward placement; the
            // literal phrase still gets the order status.
            self.track_status(session, &message, &mut response);
        }

        response
    }

    /// Answers with the order's current status when the message names an
    /// order and a user is signed in; otherwise asks for the order id.
    fn track_status(&self, session: &Session, message: &str, response: &mut ChatResponse) {
        match (self.extractor.extract_order_id(message), session.user) {
            (Some(order_id), Some(user)) => {
                response.response = self.engine.order_status_reply(&order_id, user);
            }
            _ => {
                response.response =
                    "Please provide your order ID so I can track it for you.".to_string();
            }
        }
    }

    /// Performs the cancellation write when the message names an order and a
    /// user is signed in; otherwise the engine's advisory reply stands.
    fn explicit_cancel(&self, session: &Session, message: &str, response: &mut ChatResponse) {
        let cleaned = message.replace('#', "");
        let order_id = cleaned
            .split_whitespace()
            .find(|w| w.chars().all(|c| c.is_ascii_digit()));

        let (order_id, user) = match (order_id, session.user) {
            (Some(id), Some(user)) => (id, user),
            _ => return,
        };

        let id = match order_id.parse() {
            Ok(id) => id,
            Err(_) => return,
        };

        match self.engine.store().cancel_order(id, user) {
            Ok(CancelOutcome::Cancelled) => {
                tracing::info!("Order #{} cancelled via chat", id);
                response.response = format!("Order #{} has been cancelled.", id);
            }
            Ok(CancelOutcome::NotFound) | Ok(CancelOutcome::AlreadyCancelled) => {
                response.response = format!("Order #{} not found or already cancelled.", id);
            }
            Ok(CancelOutcome::Expired) => {
                response.response = "Product has been shipped, cannot cancel.".to_string();
            }
            Err(e) => {
                // Nothing was written, so the engine's advisory confirmation
                // must not stand.
                tracing::warn!("Cancellation write failed for #{}: {}", id, e);
                response.response = format!("Order #{} not found or already cancelled.", id);
            }
        }
    }
}
