use std::io;

use beem::{AppId, CallContext, Client, Credentials, Msisdn, Pin, PinId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::new(Credentials::from_env()?)?;
    let ctx = CallContext::new();

    // Second step: verify a pin received from an earlier run.
    if let (Ok(pin_id), Ok(pin)) = (std::env::var("BEEM_PIN_ID"), std::env::var("BEEM_PIN")) {
        let verification = client
            .verify_otp(&ctx, &PinId::new(pin_id)?, &Pin::new(pin)?)
            .await?;
        println!(
            "valid: {}, code: {:?}, message: {:?}",
            verification.is_valid(),
            verification.code,
            verification.message
        );
        return Ok(());
    }

    let app_id = std::env::var("BEEM_APP_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_APP_ID environment variable is required when BEEM_PIN_ID is not set",
        )
    })?;
    let phone_raw = std::env::var("BEEM_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_PHONE environment variable is required when BEEM_PIN_ID is not set",
        )
    })?;

    let challenge = client
        .request_otp(&ctx, AppId::new(app_id.trim().parse()?)?, &Msisdn::new(phone_raw)?)
        .await?;
    println!(
        "pin_id: {}, code: {:?}, message: {:?}",
        challenge.pin_id.as_str(),
        challenge.code,
        challenge.message
    );

    Ok(())
}
