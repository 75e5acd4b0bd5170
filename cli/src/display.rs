//! Terminal rendering for genesis and unlock tables

use bloomex_economics::{GenesisConfig, VestingEngine, VestingKind};
use owo_colors::OwoColorize;

/// 1234567 -> "1,234,567"
pub fn format_tokens(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_timestamp(ts: u64) -> String {
    chrono::DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

pub fn display_genesis(genesis: &GenesisConfig) {
    println!("\n{}", "╔═══════════════════════════════════════════════════╗".cyan());
    println!("{}", "║         BLOOMEX GENESIS LOADED                    ║".cyan().bold());
    println!("{}", "╚═══════════════════════════════════════════════════╝".cyan());

    println!("\n{}: {}", "TGE".yellow().bold(), format_timestamp(genesis.tge));
    println!(
        "{}: {} BLX",
        "Total Allocated".yellow().bold(),
        format_tokens(genesis.total_allocated()).green()
    );

    println!("\n{} ({})", "Buckets".yellow().bold(), genesis.buckets.len());
    for (i, spec) in genesis.buckets.iter().enumerate() {
        let schedule = &spec.schedule;
        let kind = match schedule.vesting_kind {
            VestingKind::Linear => "linear",
            VestingKind::TgeUnlockPlusLinear => "tge+linear",
        };
        println!(
            "  {:>2}. {:<24} {:>16} BLX  cliff {:>2}m  vest {:>2}m  initial {:>3}%  {}",
            i + 1,
            spec.kind.label().bright_white(),
            format_tokens(spec.total_amount).green(),
            schedule.cliff_months,
            schedule.vesting_months,
            schedule.initial_unlock_pct,
            kind.bright_black()
        );
    }

    if !genesis.grants.is_empty() {
        println!("\n{} ({})", "Grants".yellow().bold(), genesis.grants.len());
        for spec in &genesis.grants {
            println!(
                "  {} {} BLX from {}",
                spec.beneficiary.bright_white(),
                format_tokens(spec.amount).green(),
                spec.bucket
            );
        }
    }
    println!();
}

/// Month-by-month unlock table for every bucket
pub fn display_schedule(engine: &VestingEngine, months: u64, step: u64) {
    let step = step.max(1);
    let buckets = engine.buckets();

    print!("{:>6}", "month".bold());
    for bucket in &buckets {
        print!(" {:>14}", bucket.kind.as_str().bold());
    }
    println!(" {:>16}", "total".bold());

    let mut month = 0;
    while month <= months {
        let as_of = engine.tge() + month * bloomex_economics::constants::MONTH;
        print!("{:>6}", month);
        for bucket in &buckets {
            print!(" {:>14}", format_tokens(bucket.unlocked_at(as_of)));
        }
        println!(" {:>16}", format_tokens(engine.total_unlocked(as_of)).green());
        month += step;
    }
}
