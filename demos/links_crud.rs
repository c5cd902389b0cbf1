//! Links CRUD example
//!
//! This example walks a short link through its whole life:
//! - Create with targeting and UTM tags
//! - Update, list, and read analytics
//! - Archive
//! - Handle API and transport errors
//!
//! Run with: GO2GG_API_KEY=go2_live_... cargo run --example links_crud
//!
//! Set `RUST_LOG=go2gg_client=debug` to see each request.

use std::time::Duration;

use go2gg::client::{ClientConfig, ErrorKind, RetryConfig};
use go2gg::links::{CreateLink, Link, LinkSort, LinksClient, ListLinks, UpdateLink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== go2.gg Links Examples ===\n");

    let links = LinksClient::with_config(
        ClientConfig::builder()
            .with_retry(
                RetryConfig::default()
                    .with_max_retries(3)
                    .with_base_delay(Duration::from_millis(500))
                    .with_backoff(true),
            )
            .build(),
    )?;

    let link = example_create(&links).await?;
    example_update(&links, &link).await?;
    example_list(&links).await?;
    example_stats(&links, &link).await?;
    example_error_handling(&links).await;

    links.delete(&link.id).await?;
    println!("✓ Archived link {}", link.id);

    links.close();
    println!("\n✓ All links examples completed!");

    Ok(())
}

/// Example 1: Create a link
async fn example_create(links: &LinksClient) -> Result<Link, go2gg::client::Error> {
    println!("Example 1: Create");
    println!("-----------------");

    let link = links
        .create(
            CreateLink::new("https://example.com/landing")
                .with_title("Summer Sale Campaign")
                .with_tags(["marketing", "summer"])
                .with_utm("email", "newsletter", "summer-sale")
                .with_geo_target("DE", "https://example.com/de/landing"),
        )
        .await?;

    println!("✓ Created {} -> {:?}", link.id, link.short_url);
    println!();
    Ok(link)
}

/// Example 2: Update a link
async fn example_update(links: &LinksClient, link: &Link) -> Result<(), go2gg::client::Error> {
    println!("Example 2: Update");
    println!("-----------------");

    let updated = links
        .update(
            &link.id,
            UpdateLink::new().with_description("Updated from the links example"),
        )
        .await?;

    println!("✓ Description is now {:?}", updated.description);
    println!();
    Ok(())
}

/// Example 3: List the most clicked links
async fn example_list(links: &LinksClient) -> Result<(), go2gg::client::Error> {
    println!("Example 3: List");
    println!("---------------");

    let page = links
        .list(ListLinks::new().with_per_page(5).with_sort(LinkSort::Clicks))
        .await?;

    for item in &page.data {
        println!("  {} ({} clicks)", item.id, item.click_count.unwrap_or(0));
    }
    if let Some(meta) = page.meta {
        println!("✓ {:?} links in total, more: {:?}", meta.total, meta.has_more);
    }
    println!();
    Ok(())
}

/// Example 4: Analytics
async fn example_stats(links: &LinksClient, link: &Link) -> Result<(), go2gg::client::Error> {
    println!("Example 4: Stats");
    println!("----------------");

    let stats = links.stats(&link.id).await?;
    println!("✓ Total clicks: {}", stats.total_clicks.unwrap_or(0));
    for country in stats.by_country.unwrap_or_default() {
        println!("  {}: {}", country.country, country.count);
    }
    println!();
    Ok(())
}

/// Example 5: Error handling
async fn example_error_handling(links: &LinksClient) {
    println!("Example 5: Error Handling");
    println!("-------------------------");

    match links.get("lnk_does_not_exist").await {
        Ok(link) => println!("✓ Unexpectedly found {}", link.id),
        Err(e) => {
            println!("✗ Error occurred: {}", e);
            match &e.kind {
                ErrorKind::Api(api) => {
                    println!("  HTTP status: {}", api.status);
                    println!("  Error code: {:?}", api.code);
                }
                ErrorKind::Request(message) => println!("  Transport failure: {}", message),
                other => println!("  Other error: {:?}", other),
            }
        }
    }

    println!();
}
