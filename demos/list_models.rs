use dotenv::dotenv;
use openai_bindings::{Client, ClientConfig, List, Retrieve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::new(ClientConfig::from_env()?)?;

    let models = client.models().list().await?;
    println!("{} models available", models.len());
    for model in models.iter().take(10) {
        println!("  {} (owned by {})", model.id, model.owned_by);
    }

    if let Some(first) = models.first() {
        let model = client.models().retrieve(&first.id).await?;
        println!("\nFirst model in detail:\n{model:#?}");
    }

    Ok(())
}
