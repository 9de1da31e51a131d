//! Reachability check for every third-party API the bot depends on.

use anyhow::Result;
use dotenv::dotenv;

use chassis_ops::health::HealthChecker;
use chassis_ops::{display, logging, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init()?;

    let config = Config::load()?;
    let checker = HealthChecker::from_config(&config)?;

    let report = checker.run().await;
    print!("{}", display::render_health(&report));

    if report.any_down() {
        std::process::exit(1);
    }
    Ok(())
}
