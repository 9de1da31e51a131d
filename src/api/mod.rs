use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub mod coingecko;
pub mod dexscreener;
pub mod jupiter;
pub mod rpc;
pub mod rugcheck;
pub mod telegram;

pub use coingecko::CoinGeckoClient;
pub use dexscreener::DexScreenerClient;
pub use jupiter::JupiterClient;
pub use rpc::RpcClient;
pub use rugcheck::RugCheckClient;
pub use telegram::TelegramClient;

/// Shared HTTP client settings: every upstream call is bounded by `timeout`.
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Test server that accepts connections and never answers them.
#[cfg(test)]
pub(crate) async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}
