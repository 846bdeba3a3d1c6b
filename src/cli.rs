//! CLI commands for turf-api.
//!
//! Supports API server mode plus one-shot evaluation and analysis of JSON
//! race files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::evaluator::evaluate_race;
use crate::insight::generate_expert_insight;
use crate::performance::compute_performance_score;
use crate::smart_money::detect_smart_money_alerts;
use crate::types::{AnalyzeRequest, AnalyzeResponse, EvaluateRequest, EvaluateResponse};

#[derive(Parser)]
#[command(name = "turf-api")]
#[command(version, about = "Race evaluation API and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Evaluate a race JSON file (win/top-3/finish probabilities)
    Evaluate {
        /// Path to race data JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Analyze a race JSON file (performance scores, insight, alerts)
    Analyze {
        /// Path to race data JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

/// Run CLI evaluation from file.
pub fn run_evaluate(input: PathBuf, format: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let input_json = std::fs::read_to_string(&input)?;
    let req: EvaluateRequest = serde_json::from_str(&input_json)?;

    let evaluations = evaluate_race(&req.race, &req.horses, &config.weights)?;
    let response = EvaluateResponse {
        race_id: req.race_id,
        evaluations,
    };

    match format.as_str() {
        "table" => print_evaluation_table(&response),
        _ => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

fn print_evaluation_table(response: &EvaluateResponse) {
    println!(
        "{:<5} {:<4} {:<20} {:>8} {:>8} {:>9} {:>7}  {}",
        "Rank", "No.", "Name", "Win%", "Top3%", "Finish%", "Score", "Explanation"
    );
    for eval in &response.evaluations {
        println!(
            "{:<5} {:<4} {:<20} {:>7.1}% {:>7.1}% {:>8.1}% {:>7.2}  {}",
            eval.rank,
            eval.number,
            eval.name,
            eval.prob_win * 100.0,
            eval.prob_top3 * 100.0,
            eval.prob_finish * 100.0,
            eval.score,
            eval.explanation
        );
    }
}

/// Run CLI analysis from file.
pub fn run_analyze(input: PathBuf, format: String) -> anyhow::Result<()> {
    let input_json = std::fs::read_to_string(&input)?;
    let req: AnalyzeRequest = serde_json::from_str(&input_json)?;

    if req.horses.is_empty() {
        anyhow::bail!("no runner records in {}", input.display());
    }

    let mut horses = req.horses;
    for horse in &mut horses {
        horse.performance_score = compute_performance_score(horse, req.race.surface);
    }
    horses.sort_by(|a, b| b.performance_score.partial_cmp(&a.performance_score).unwrap());

    let expert_insight = generate_expert_insight(&req.race, &horses);
    let smart_money_alerts = detect_smart_money_alerts(&horses);
    let top3: Vec<_> = horses.iter().take(3).cloned().collect();

    let response = AnalyzeResponse {
        race: req.race,
        horses,
        top3,
        expert_insight,
        smart_money_alerts,
    };

    match format.as_str() {
        "table" => print_analysis_table(&response),
        _ => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

fn print_analysis_table(response: &AnalyzeResponse) {
    println!(
        "{:<4} {:<20} {:>7} {:>7} {:>8}  {}",
        "No.", "Name", "Score", "Odds", "Opening", "Musique"
    );
    for horse in &response.horses {
        println!(
            "{:<4} {:<20} {:>7.2} {:>7} {:>8}  {}",
            horse.number,
            horse.name,
            horse.performance_score,
            horse
                .odds
                .map(|o| format!("{:.1}", o))
                .unwrap_or_else(|| "-".to_string()),
            horse
                .initial_odds
                .map(|o| format!("{:.1}", o))
                .unwrap_or_else(|| "-".to_string()),
            horse.musique.as_deref().unwrap_or("-")
        );
    }

    println!("\n{}", response.expert_insight);

    if !response.smart_money_alerts.is_empty() {
        println!("\nSmart money alerts:");
        for group in &response.smart_money_alerts {
            for alert in &group.alerts {
                println!(
                    "  [{:?}] {} (#{}) - {}",
                    alert.severity, group.horse.name, group.horse.number, alert.message
                );
            }
        }
    }
}
