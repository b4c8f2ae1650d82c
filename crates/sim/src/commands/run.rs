//! Resolve a battle scenario and print the record.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use battle_content::{BattleContent, ContentFactory};
use battle_core::{BattleRecord, Env, Location, PcgRng, PlayerId, PlayerTable};

/// Resolve one battle scenario
#[derive(Parser)]
pub struct Run {
    /// Data directory holding designs.ron, rules.toml and scenarios/
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data: PathBuf,

    /// Scenario name under scenarios/ (e.g., skirmish) or a path to a RON file
    #[arg(short, long, value_name = "SCENARIO")]
    scenario: String,

    /// Battle seed. Falls back to the scenario's seed, then 0
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Fail unless the record's replay digest matches this hex string
    #[arg(long, value_name = "HEX")]
    expect_digest: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Casualties, surviving stacks, viewers and the replay digest
    Summary,
    /// Full battle record as JSON
    Json,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        if !self.data.is_dir() {
            anyhow::bail!("Data directory not found: {}", self.data.display());
        }

        let factory = ContentFactory::new(&self.data);
        let BattleContent {
            designs,
            players,
            rules,
            scenario,
        } = factory
            .load_battle(&self.scenario)
            .with_context(|| format!("Failed to load scenario '{}'", self.scenario))?;

        let seed = self.seed.or(scenario.seed).unwrap_or_default();
        let mut location = scenario.location;

        let env = Env::with_all(&designs, &players, &PcgRng).into_battle_env();
        let record = battle_core::resolve(&mut location, &rules, env, seed)
            .with_context(|| format!("Battle #{} could not be resolved", location.num))?;

        let digest = hex::encode(
            record
                .digest()
                .context("Failed to encode battle record for the replay digest")?,
        );
        if let Some(expected) = &self.expect_digest
            && !expected.eq_ignore_ascii_case(&digest)
        {
            anyhow::bail!("Replay digest mismatch: expected {}, got {}", expected, digest);
        }

        match self.format {
            OutputFormat::Summary => {
                print_summary(&scenario.name, &record, &location, &players, &digest)
            }
            OutputFormat::Json => print_json(&record)?,
        }

        Ok(())
    }
}

fn print_summary(
    name: &str,
    record: &BattleRecord,
    location: &Location,
    players: &PlayerTable,
    digest: &str,
) {
    println!(
        "{} {} (battle #{}, seed {})",
        style("Scenario:").bold().cyan(),
        name,
        record.num,
        record.seed
    );
    println!();

    if record.is_empty() {
        println!("{}", style("No engagement: nobody had a legal target.").yellow());
        return;
    }

    println!("{}", style("Rounds:").bold().yellow());
    println!("  Fought: {}", record.rounds().len());
    println!("  Actions: {}", record.actions().count());
    println!();

    println!("{}", style("Losses:").bold().yellow());
    for (player, lost) in record.losses() {
        println!("  {}: {} ship(s)", player_name(players, player), lost);
    }
    println!();

    println!("{}", style("Fleets After Battle:").bold().yellow());
    for fleet in &location.fleets {
        let remaining: u32 = fleet.stacks.iter().map(|stack| stack.quantity).sum();
        println!(
            "  {} {} ({}) - {} ship(s) left",
            fleet.id,
            fleet.name,
            player_name(players, fleet.player),
            remaining
        );
        for stack in &fleet.stacks {
            println!(
                "    {}: {} ship(s), {} damaged ({:.1} each)",
                stack.design, stack.quantity, stack.quantity_damaged, stack.damage
            );
        }
    }
    println!();

    let viewers: Vec<String> = record
        .viewers(players)
        .into_iter()
        .map(|player| player_name(players, player))
        .collect();
    println!("{} {}", style("Viewers:").bold().cyan(), viewers.join(", "));
    println!("{} {}", style("Replay Digest:").bold().cyan(), digest);
}

fn print_json(record: &BattleRecord) -> Result<()> {
    let json =
        serde_json::to_string_pretty(record).context("Failed to serialize record to JSON")?;
    println!("{}", json);
    Ok(())
}

fn player_name(players: &PlayerTable, player: PlayerId) -> String {
    players
        .player(player)
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| player.to_string())
}
