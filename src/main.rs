use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;

use patter::intent::ProductId;
use patter::store::OrderStatus;
use patter::{ChatGateway, DialogueEngine, MemoryStore, RedirectHint, Session};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let json_mode = std::env::args().any(|a| a == "--json");

    // Seed a store so tracking and recommendations have something to show.
    let store = MemoryStore::with_catalog();
    store.add_order(
        1,
        OrderStatus::Pending,
        Utc::now() - Duration::hours(2),
        &[(1, 2), (3, 1)],
    )?;
    store.add_order(
        1,
        OrderStatus::Delivered,
        Utc::now() - Duration::days(3),
        &[(2, 1)],
    )?;

    let gateway = ChatGateway::new(DialogueEngine::new(store));
    let mut session = Session::anonymous();

    println!("Chat demo. Commands: :login <id>, :logout, :quit");
    tracing::info!("Dialogue engine ready");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // 1. Session commands, handled before the chat turn.
        if line == ":quit" {
            break;
        }
        if line == ":logout" {
            session = Session::anonymous();
            println!("Logged out.");
            continue;
        }
        if let Some(rest) = line.strip_prefix(":login ") {
            match rest.trim().parse() {
                Ok(user) => {
                    session = Session::for_user(user);
                    println!("Logged in as user {}.", user);
                }
                Err(_) => println!("Usage: :login <numeric id>"),
            }
            continue;
        }

        // 2. The chat turn itself.
        let turn = gateway.handle(&mut session, line);
        if json_mode {
            println!("{}", serde_json::to_string(&turn)?);
        } else {
            println!("{}", turn.response);
            if let Some(hint) = turn.redirect {
                println!("[redirect -> {}]", hint.as_str());
            }
        }

        // 3. A checkout redirect completes the order in this demo.
        if turn.redirect == Some(RedirectHint::Checkout) {
            if let Some(user) = session.user {
                let lines: Vec<(ProductId, u32)> = session
                    .cart
                    .items()
                    .filter_map(|(id, qty)| id.parse().ok().map(|id| (id, qty)))
                    .collect();
                if !lines.is_empty() {
                    let order_id = gateway.engine().store().add_order(
                        user,
                        OrderStatus::Pending,
                        Utc::now(),
                        &lines,
                    )?;
                    session.cart.clear();
                    println!("Order #{} placed.", order_id);
                }
            }
        }
    }

    Ok(())
}
