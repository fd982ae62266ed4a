//! Basic example reading the collection and creating an item.
//!
//! This example shows how to:
//! - Build requests from the process-wide defaults
//! - Inspect and change a request before sending it
//! - Tell validation failures apart from transport failures
//!
//! Point it at a running API (or an echo server) with `PIZZA_API_AUTHORITY`.
//!
//! Run with: `cargo run --example basic_call`

use pizza_request::{create_item, read_collection, Error, RequestConfig, Transport};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct NewPizza {
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("pizza_request=debug,basic_call=info")
        .init();

    let transport = Transport::new()?;

    println!("=== Read Collection ===");
    let request = read_collection(RequestConfig::default());
    println!("{} {}", request.method(), request.url());

    let response = request.execute(&transport).await?;
    println!("Status code: {}", response.status);
    println!("Request latency: {:?}", response.latency);
    println!("{}", response.text());
    println!();

    println!("=== Create Item ===");
    let mut request = create_item(RequestConfig::new().with_name("margherita"))?;
    request.send(&NewPizza {
        name: "capricciosa".to_string(),
    })?;
    println!("Body to send: {:?}", request.encoded_body()?);

    let response = request.execute(&transport).await?;
    println!("{}", response.text());
    println!();

    println!("=== Validation ===");
    match create_item(RequestConfig::default()) {
        Err(e) if e.is_validation() => println!("Rejected before sending: {}", e),
        Err(e) => return Err(e),
        Ok(_) => println!("Unexpectedly built a request without a name"),
    }

    Ok(())
}
