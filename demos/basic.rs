//! Basic example demonstrating the Gumroad API client.
//!
//! Run with:
//! ```
//! GUMROAD_EMAIL=you@example.com GUMROAD_PASSWORD=secret cargo run --example basic
//! ```

use gumroad::{GumroadClient, Link};

fn main() -> gumroad::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let email = std::env::var("GUMROAD_EMAIL").unwrap_or_default();
    let password = std::env::var("GUMROAD_PASSWORD").unwrap_or_default();

    // Create client from environment variables
    println!("Creating Gumroad client...");
    let mut client = GumroadClient::from_env()?;
    println!("Connected to: {} (timeout {} ms)", client.endpoint(), client.timeout());

    println!("\n--- Opening Session ---");
    client.authenticate(&email, &password)?;
    println!("Authenticated: {}", client.is_authenticated());

    // List existing links
    println!("\n--- Listing Links ---");
    let links = client.get_links()?;
    println!("Found {} links", links.len());
    for link in &links {
        println!(
            "  - {} ({}) {} {} / {} purchases, balance {}",
            link.name,
            link.id_or_empty(),
            link.price,
            link.currency,
            link.purchases,
            link.balance
        );
    }

    // Create, edit and remove a throwaway link
    println!("\n--- Link Round Trip ---");
    let mut link = Link::new("Example link", "https://example.com/download", 100);
    client.create_link(&mut link)?;
    println!("Created {} at {}", link.id_or_empty(), link.short_url);

    link.description = "Updated from the basic example".to_string();
    client.update_link(&link)?;
    let fetched = client.get_link(link.id_or_empty())?;
    println!("Description is now: {}", fetched.description);

    client.delete_link(&link)?;
    println!("Deleted {}", link.id_or_empty());

    client.deauthenticate()?;
    println!("\nDone!");
    Ok(())
}
