use std::time::Duration;

use dotenv::dotenv;
use openai_bindings::api::{ImageSize, ImageVariationParams};
use openai_bindings::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let image = std::env::args()
        .nth(1)
        .ok_or("usage: image-variations <square-png>")?;

    // Image endpoints are slow; give them more room than the default.
    let config = ClientConfig::from_env()?.with_timeout(Duration::from_secs(120));
    let client = Client::new(config)?;

    let mut params = ImageVariationParams::new(image);
    params.n = Some(2);
    params.size = Some(ImageSize::Size256);

    match client.images().create_variations(&params).await {
        Ok(images) => {
            for image in images {
                println!("{}", image.url.unwrap_or_default());
            }
        }
        Err(e) => {
            if let Some(api_error) = e.api_error() {
                println!("API rejected the request (param: {})", api_error.param_text());
            }
            println!("Error: {e}");
        }
    }

    Ok(())
}
