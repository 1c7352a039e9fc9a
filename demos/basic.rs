use anyhow::Context;
use stardust_http::{CreatePlayer, MintToken, StardustClient, StardustConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StardustConfig::from_env()?;
    config.api_key.as_deref().context("STARDUST_APIKEY is required")?;
    let template_id = config.template_id.context("TEMPLATE_ID is required")?;
    let client = StardustClient::from_config(&config);

    let status = client.health().check().await?;
    println!("backend status: {}", status.status);

    let game = client.game().get().await?;
    println!("game {}: {}", game.id, game.name);

    let player = client
        .players()
        .create(&CreatePlayer::new("demo-player"))
        .await?;

    let token_ids = client
        .tokens()
        .mint(&player.player_id, MintToken::new(template_id, "10"))
        .await?;

    for item in client.players().get_inventory(&player.player_id).await? {
        println!("{item:?}");
    }
    println!("minted {token_ids:?}");

    Ok(())
}
