use stardust_http::{RetryPolicy, StardustClient, TokenAmount};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = StardustClient::from_env()?;

    let player_id = std::env::var("PLAYER_ID")?;
    let address = std::env::var("WITHDRAW_ADDRESS")?;
    let token_id: u64 = std::env::var("TOKEN_ID")?.parse()?;

    let withdrawals = client
        .players()
        .withdraw_until_accepted(
            &player_id,
            &address,
            TokenAmount::new(token_id, "1"),
            &RetryPolicy::default(),
        )
        .await?;

    for withdrawal in withdrawals {
        println!("token {} -> {}", withdrawal.token_id, withdrawal.hash);
    }

    Ok(())
}
