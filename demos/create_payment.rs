//! Create, check and cancel a payment.
//!
//! Reads `FIB_CLIENT_ID` and `FIB_CLIENT_SECRET`, and optionally
//! `FIB_ENVIRONMENT` ("staging" by default).
//!
//! Run with: cargo run --example create_payment

use chrono::Duration;
use fib_rs::models::PaymentOptions;
use fib_rs::{Environment, FibClient};

#[tokio::main]
async fn main() -> fib_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let env: Environment = std::env::var("FIB_ENVIRONMENT")
        .unwrap_or_else(|_| "staging".to_string())
        .parse()?;

    println!("Connecting to FIB {env}...");
    let client = FibClient::from_env(env).await?;
    println!("Authenticated, token valid until {}", client.session().expires_at().await);

    let options = PaymentOptions::new()
        .with_description("fib-rs demo payment")
        .with_expires_in(Duration::minutes(30));

    let created = client
        .payments()
        .create(1000, "IQD", "http://localhost:1337/", options)
        .await?;

    println!("\nPayment {}", created.payment_id);
    println!("  Readable code: {}", created.readable_code);
    println!("  Valid until:   {}", created.valid_until);
    if let Some(link) = &created.personal_app_link {
        println!("  App link:      {}", link);
    }

    let status = client.payments().check(&created.payment_id).await?;
    println!("  Status:        {:?}", status.status);

    if client.payments().cancel(&created.payment_id).await? {
        println!("\nCancelled.");
    }

    Ok(())
}
