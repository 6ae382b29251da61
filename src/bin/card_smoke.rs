use anyhow::{bail, Context};
use card_service::{Card, Envelope};
use clap::Parser;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

#[derive(Debug, Parser)]
#[command(name = "card-smoke")]
#[command(about = "Drive every card endpoint against a running card-service")]
struct SmokeArgs {
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, default_value = "smoke-card")]
    name: String,
}

async fn call(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
    expected: StatusCode,
) -> anyhow::Result<Envelope> {
    let mut request = client.request(method.clone(), url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request
        .send()
        .await
        .with_context(|| format!("{} {} failed", method, url))?;
    let status = response.status();
    let envelope: Envelope = response
        .json()
        .await
        .with_context(|| format!("{} {} returned a non-envelope body", method, url))?;

    if status != expected || envelope.status != expected.as_u16() {
        bail!(
            "{} {}: expected {}, got {} ({})",
            method,
            url,
            expected,
            status,
            envelope.data
        );
    }
    println!("  ✅ {} {} -> {}", method, url, status);
    Ok(envelope)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = SmokeArgs::parse();
    let client = Client::new();
    let cards_url = format!("{}/card", args.base_url.trim_end_matches('/'));

    println!("🚀 Exercising card API at {}", cards_url);

    let created = call(
        &client,
        Method::POST,
        &cards_url,
        Some(json!({"name": args.name, "number": 1})),
        StatusCode::CREATED,
    )
    .await?;
    let card: Card = serde_json::from_value(created.data).context("created card payload")?;
    let id = card.id.context("created card has no id")?;
    let card_url = format!("{}/{}", cards_url, id);

    call(&client, Method::GET, &card_url, None, StatusCode::OK).await?;

    let listed = call(&client, Method::GET, &cards_url, None, StatusCode::OK).await?;
    let count = listed.data.as_array().map(Vec::len).unwrap_or_default();
    println!("  📋 {} card(s) stored", count);

    let updated = call(
        &client,
        Method::PUT,
        &card_url,
        Some(json!({"number": 2})),
        StatusCode::OK,
    )
    .await?;
    let updated: Card = serde_json::from_value(updated.data).context("updated card payload")?;
    if updated.number != 2 || updated.name != args.name {
        bail!("update returned unexpected card: {:?}", updated);
    }

    call(&client, Method::DELETE, &card_url, None, StatusCode::OK).await?;
    call(&client, Method::GET, &card_url, None, StatusCode::NOT_FOUND).await?;

    println!("🎉 Smoke run complete");
    Ok(())
}
