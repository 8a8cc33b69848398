//! Basic usage example: authenticate, search, and page through results.

use mira_sdk::{MediaType, MiraClient, Result, SearchOptions};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("mira_sdk=info")
        .init();

    // Build client - the API key falls back to the MIRA_API_KEY env var
    let client = MiraClient::builder().build()?;

    // Surface auth errors before the first fetch
    client.authenticate().await?;

    let mut options = SearchOptions {
        media_types: vec![MediaType::ThreeD],
        size: Some(10),
        ..Default::default()
    };

    // First two pages of 3D results
    for _ in 0..2 {
        let page = client.search("sunglasses", &options).await?;
        for item in &page.media {
            println!(
                "{}  {}  {}",
                item.id,
                item.media_type,
                item.title.as_deref().unwrap_or("(untitled)")
            );
        }

        match page.next_page_num {
            Some(next) => options.page_num = Some(next),
            None => break,
        }
    }

    Ok(())
}
