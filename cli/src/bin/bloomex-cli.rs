//! Bloomex CLI - Query vesting and supply data

use bloomex_cli::config::DEFAULT_TGE;
use bloomex_cli::display::{display_schedule, format_timestamp, format_tokens};
use bloomex_economics::GenesisConfig;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "bloomex-cli")]
#[command(about = "Bloomex vesting ledger query tool", version)]
struct Cli {
    /// API endpoint
    #[arg(short, long, default_value = "http://localhost:24200")]
    api: String,

    /// Evaluate at this unix timestamp instead of now
    #[arg(long, global = true)]
    as_of: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every allocation bucket
    Buckets,

    /// Show one bucket
    Bucket {
        /// Bucket id (team, seed, public_sale, ...)
        kind: String,
    },

    /// Show a grant by id
    Grant { id: u64 },

    /// Supply, burn and circulating totals
    Supply,

    /// Staking APY for an amount and lock period
    Apy {
        amount: u64,
        #[arg(short, long, default_value = "0")]
        lock_days: u64,
    },

    /// Anti-dump fee quote and today's sell window
    Fee {
        amount: u64,
        /// Hours since the tokens unlocked
        #[arg(long, default_value = "0")]
        hours: u64,
    },

    /// Print the built-in unlock table without contacting a node
    Schedule {
        #[arg(short, long, default_value = "48")]
        months: u64,
        #[arg(short, long, default_value = "3")]
        step: u64,
        #[arg(long)]
        tge: Option<u64>,
    },
}

fn as_of_query(as_of: Option<u64>) -> String {
    as_of.map(|t| format!("?as_of={}", t)).unwrap_or_default()
}

async fn fetch(client: &reqwest::Client, url: String) -> Result<Value, Box<dyn std::error::Error>> {
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    if !status.is_success() {
        let message = body["message"].as_str().unwrap_or("request failed");
        return Err(format!("{} ({})", message, status).into());
    }
    Ok(body)
}

fn amount(value: &Value) -> String {
    value.as_u64().map(format_tokens).unwrap_or_else(|| "-".to_string())
}

fn print_bucket(bucket: &Value) {
    println!(
        "  {:<24} {:>16} / {:>16} unlocked  ({}% initial, {})",
        bucket["label"].as_str().unwrap_or_default().bright_white(),
        amount(&bucket["unlocked"]).green(),
        amount(&bucket["total_amount"]),
        bucket["initial_unlock_pct"],
        bucket["vesting_kind"].as_str().unwrap_or_default()
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let at = as_of_query(cli.as_of);

    match cli.command {
        Commands::Buckets => {
            let response = fetch(&client, format!("{}/vesting/buckets{}", cli.api, at)).await?;

            println!("\n🌱 Bloomex Allocation Buckets");
            println!("═══════════════════════════════════");
            if let Some(buckets) = response["buckets"].as_array() {
                for bucket in buckets {
                    print_bucket(bucket);
                }
            }
            println!("\nTotal Allocated: {} BLX", amount(&response["total_allocated"]));
            println!("Total Unlocked:  {} BLX\n", amount(&response["total_unlocked"]).green());
        }

        Commands::Bucket { kind } => {
            let bucket = fetch(&client, format!("{}/vesting/buckets/{}{}", cli.api, kind, at)).await?;

            println!("\n🌱 {}", bucket["label"].as_str().unwrap_or_default().bold());
            println!("═══════════════════════════════════");
            println!("Total:        {} BLX", amount(&bucket["total_amount"]));
            println!("Unlocked:     {} BLX", amount(&bucket["unlocked"]).green());
            println!("Locked:       {} BLX", amount(&bucket["locked"]));
            if let Some(ts) = bucket["cliff_end"].as_u64() {
                println!("Cliff Ends:   {}", format_timestamp(ts));
            }
            if let Some(ts) = bucket["vesting_end"].as_u64() {
                println!("Vesting Ends: {}", format_timestamp(ts));
            }
            println!();
        }

        Commands::Grant { id } => {
            let grant = fetch(&client, format!("{}/vesting/grants/{}{}", cli.api, id, at)).await?;

            println!("\n📜 Grant #{}", id);
            println!("═══════════════════════════════════");
            println!("Beneficiary:  {}", grant["beneficiary"].as_str().unwrap_or_default());
            println!("Bucket:       {}", grant["bucket"].as_str().unwrap_or_default());
            println!("Amount:       {} BLX", amount(&grant["amount"]));
            println!("Unlocked:     {} BLX", amount(&grant["unlocked"]).green());
            println!("Locked:       {} BLX\n", amount(&grant["locked"]));
        }

        Commands::Supply => {
            let supply = fetch(&client, format!("{}/supply{}", cli.api, at)).await?;

            println!("\n📊 Bloomex Supply");
            println!("═══════════════════════════════════");
            println!("Original Supply:    {} BLX", amount(&supply["original_supply"]));
            println!("Total Supply:       {} BLX", amount(&supply["total_supply"]));
            println!("Total Burned:       {} BLX", amount(&supply["total_burned"]).red());
            println!("Total Unlocked:     {} BLX", amount(&supply["total_unlocked"]));
            println!("Circulating:        {} BLX", amount(&supply["circulating_supply"]).green());
            println!("Fees Since Burn:    {} BLX", amount(&supply["fees_since_last_burn"]));
            if let Some(ts) = supply["next_burn_at"].as_u64() {
                println!("Next Burn:          {}", format_timestamp(ts));
            }
            println!();
        }

        Commands::Apy { amount: stake, lock_days } => {
            let apy = fetch(
                &client,
                format!("{}/staking/apy?amount={}&lock_days={}", cli.api, stake, lock_days),
            )
            .await?;

            let bps = |v: &Value| v.as_u64().map(|b| b as f64 / 100.0).unwrap_or(0.0);
            println!("\n💧 Staking {} BLX for {} days", format_tokens(stake), lock_days);
            println!("═══════════════════════════════════");
            println!("Tier:       {}", apy["tier"].as_str().unwrap_or_default());
            println!("Base APY:   {:.2}%", bps(&apy["base_bps"]));
            println!("Lock Bonus: {:.2}%", bps(&apy["bonus_bps"]));
            println!("Total APY:  {}\n", format!("{:.2}%", bps(&apy["total_bps"])).green());
        }

        Commands::Fee { amount: sell, hours } => {
            let quote = fetch(
                &client,
                format!("{}/fees/quote?amount={}&since_unlock_secs={}", cli.api, sell, hours.saturating_mul(3_600)),
            )
            .await?;
            let window = fetch(&client, format!("{}/fees/window{}", cli.api, at)).await?;

            println!("\n💸 Selling {} BLX {}h after unlock", format_tokens(sell), hours);
            println!("═══════════════════════════════════");
            println!("Fee Rate:        {} bps", quote["fee_rate_bps"]);
            println!("Fee:             {} BLX", amount(&quote["fee"]).red());
            println!("Net:             {} BLX", amount(&quote["net"]).green());
            println!("Daily Limit:     {} BLX", amount(&window["limit"]));
            println!("Remaining Today: {} BLX\n", amount(&window["remaining"]));
        }

        Commands::Schedule { months, step, tge } => {
            let genesis = GenesisConfig::bloomex(tge.unwrap_or(DEFAULT_TGE));
            let engine = genesis.build()?;
            println!("\n📅 Unlock schedule from {}\n", format_timestamp(engine.tge()));
            display_schedule(&engine, months, step);
            println!();
        }
    }

    Ok(())
}
