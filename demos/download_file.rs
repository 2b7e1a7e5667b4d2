use dotenv::dotenv;
use openai_bindings::{Client, ClientConfig, Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let file_id = std::env::args()
        .nth(1)
        .ok_or("usage: download-file <file-id> [output]")?;
    let output = std::env::args()
        .nth(2)
        .unwrap_or_else(|| format!("{file_id}.out"));

    let client = Client::new(ClientConfig::from_env()?)?;
    let mut sink = tokio::fs::File::create(&output).await?;

    match client.files().download(&file_id, &mut sink).await {
        Ok(bytes) => println!("Wrote {bytes} bytes to {output}"),
        Err(Error::Timeout) => println!("Download timed out"),
        Err(e) => println!("Download failed: {e}"),
    }

    Ok(())
}
