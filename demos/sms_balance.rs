use beem::{CallContext, Client, Credentials, SenderNameQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::new(Credentials::from_env()?)?;
    let ctx = CallContext::new();

    let balance = client.sms_balance(&ctx).await?;
    println!("sms credit balance: {}", balance.credit_balance);

    let page = client
        .sender_names(&ctx, &SenderNameQuery::default())
        .await?;
    for sender in &page.data {
        println!("sender name: {} ({:?})", sender.sender_id, sender.status);
    }
    println!(
        "page {} of {}",
        page.pagination.current_page, page.pagination.total_pages
    );

    Ok(())
}
