//! Browse the inventory from the terminal
//!
//! Walks a taxonomy path, optionally searches, and prints the pieces found.
//!
//! Run (with `brecho-api-mock` listening on the default port):
//!   BRECHO_API_URL=http://localhost:3333 \
//!     cargo run --example browse -- admin admin cat-001 subcat-001 subsubcat-001
//!   cargo run --example browse -- admin admin cat-004 --search jaqueta

use anyhow::Context;
use brecho_client::logger::init_logger;
use brecho_client::{ClientConfig, InventoryBrowser, TapOutcome};
use shared::models::Taxonomy;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("info", false)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        println!("Usage: browse <username> <password> [node-id ...] [--search <text>]");
        return Ok(());
    }
    let (username, password) = (&args[0], &args[1]);
    let mut path = Vec::new();
    let mut search = None;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--search" {
            search = rest.next().cloned();
        } else {
            path.push(arg.clone());
        }
    }

    let config =
        ClientConfig::from_env().unwrap_or_else(|_| ClientConfig::new("http://localhost:3333"));
    let client = config.build_api_client()?;
    let user = client
        .login(username, password)
        .await
        .context("login failed")?;
    println!("Signed in as {}", user.name.as_deref().unwrap_or(&user.username));

    let session = Arc::new(client.session().clone());
    let mut browser =
        InventoryBrowser::new(Arc::new(Taxonomy::brecho_default()), Arc::new(client), session)
            .with_debounce(config.search_debounce());

    for id in &path {
        match browser.tap_id(id).await? {
            TapOutcome::Drilled => println!("› {}", browser.path().breadcrumb()),
            TapOutcome::Qualified => println!("› {} (filter)", browser.path().breadcrumb()),
        }
    }

    if let Some(text) = search {
        browser.set_search(&text);
        let mut rx = browser.subscribe();
        // wait for the debounced search to land
        tokio::time::sleep(config.search_debounce() + Duration::from_millis(50)).await;
        rx.wait_for(|state| !state.loading).await?;
    }

    let state = browser.state();
    if let Some(error) = &state.last_error {
        println!("Error: {error}");
    }
    if state.pieces.is_empty() {
        println!("No pieces. Pick a terminal category or search by name.");
    }
    for piece in &state.pieces {
        let price = piece
            .price
            .map(|p| format!("R$ {p:.2}"))
            .unwrap_or_else(|| "sem preço".to_string());
        println!("{:<10} {:<28} x{:<3} {}", piece.id, piece.name, piece.quantity, price);
    }

    browser.close();
    Ok(())
}
