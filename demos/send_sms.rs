use std::io;

use beem::{CallContext, Client, Credentials, MessageText, Msisdn, PhoneNumber, SendSms, SenderId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let phone_raw = std::env::var("BEEM_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_PHONE environment variable is required",
        )
    })?;
    let sender_raw = std::env::var("BEEM_SENDER_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEM_SENDER_ID environment variable is required",
        )
    })?;
    let message =
        std::env::var("BEEM_MESSAGE").unwrap_or_else(|_| "Hello from the beem demo.".to_owned());

    let client = Client::new(Credentials::from_env()?)?;
    let recipients = phone_raw
        .split(',')
        .map(|raw| PhoneNumber::parse(None, raw).map(Msisdn::from))
        .collect::<Result<Vec<_>, _>>()?;
    let request = SendSms::new(
        SenderId::new(sender_raw)?,
        MessageText::new(message)?,
        recipients,
    )?;
    let ctx = CallContext::new().with_label("demo-send-sms");

    if std::env::var_os("BEEM_SEND_EACH").is_some() {
        let receipts = client.send_sms_each(&ctx, &request).await?;
        for receipt in receipts {
            println!(
                "successful: {}, request_id: {:?}, code: {:?}",
                receipt.successful, receipt.request_id, receipt.code
            );
        }
        return Ok(());
    }

    let receipt = client.send_sms(&ctx, &request).await?;
    println!(
        "successful: {}, request_id: {:?}, valid: {}, invalid: {}, duplicates: {}",
        receipt.successful, receipt.request_id, receipt.valid, receipt.invalid, receipt.duplicates
    );

    Ok(())
}
