use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use beem::{AirtimeAmount, CallContext, Client, Credentials, Msisdn, ReferenceId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::builder(Credentials::from_env()?)
        .timeout(Duration::from_secs(30))
        .build()?;
    let ctx = CallContext::new();

    let balance = client.airtime_balance(&ctx).await?;
    println!("airtime credit balance: {}", balance.credit_balance);

    let Ok(phone_raw) = std::env::var("BEEM_PHONE") else {
        return Ok(());
    };
    let amount = std::env::var("BEEM_AMOUNT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_AMOUNT environment variable is required when BEEM_PHONE is set",
        )
    })?;
    let reference = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let transfer = client
        .transfer_airtime(
            &ctx,
            &Msisdn::new(phone_raw)?,
            AirtimeAmount::new(amount.trim().parse()?)?,
            ReferenceId::new(reference),
        )
        .await?;
    println!(
        "code: {:?}, transaction_id: {:?}, message: {:?}",
        transfer.code, transfer.transaction_id, transfer.message
    );

    Ok(())
}
