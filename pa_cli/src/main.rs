//! A one-shot poker decision advisor.
//!
//! Assembles a single situation from flags, runs the decision engine, and
//! prints the analysis as a report or as JSON. Feeding the engine a live
//! table (capture, HUD, persistence) is a collaborator's job; this binary
//! only exercises the engine boundary.

use anyhow::{Context, Result, bail};
use pico_args::Arguments;
use poker_advisor::{
    AdvisedAction, CachedOracle, Card, DecisionEngine, DecisionRecord, EngineConfig,
    MonteCarloOracle, OpponentTracker, Position, Situation, cards::parse_cards,
};
use std::sync::Arc;
use std::time::Duration;

const HELP: &str = "\
Analyze one poker decision

USAGE:
  pa_cli --hand CARDS [OPTIONS]

OPTIONS:
  --hand CARDS          Hero hole cards, e.g. AsKs (required)
  --board CARDS         Community cards, e.g. 2c7d9h  [default: none]
  --pot AMOUNT          Current pot size  [default: 100]
  --call AMOUNT         Amount to call  [default: 0]
  --stack AMOUNT        Hero's remaining stack  [default: 1000]
  --position POS        UTG, MP, CO, BTN, SB or BB  [default: BTN]
  --opponents N         Number of live opponents  [default: 1]
  --opponent-id ID      Tracked opponent identifier
  --exploit-level X     Exploitation level 0.0-1.0  [default: 0.7]
  --iterations N        Equity sample size  [default: 100000]
  --timeout-ms MS       Equity oracle budget  [default: 1500]
  --seed N              Fix the oracle seed for reproducible output
  --json                Emit the decision record as JSON

FLAGS:
  -h, --help            Print help information
";

struct Args {
    hand: String,
    board: Option<String>,
    pot: f64,
    call: f64,
    stack: f64,
    position: String,
    opponents: usize,
    opponent_id: Option<String>,
    exploit_level: f64,
    iterations: u32,
    timeout_ms: u64,
    seed: Option<u64>,
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let args = Args {
        hand: pargs
            .value_from_str("--hand")
            .context("--hand is required (e.g. --hand AsKs)")?,
        board: pargs.opt_value_from_str("--board")?,
        pot: pargs.value_from_str("--pot").unwrap_or(100.0),
        call: pargs.value_from_str("--call").unwrap_or(0.0),
        stack: pargs.value_from_str("--stack").unwrap_or(1000.0),
        position: pargs
            .value_from_str("--position")
            .unwrap_or_else(|_| "BTN".to_string()),
        opponents: pargs.value_from_str("--opponents").unwrap_or(1),
        opponent_id: pargs.opt_value_from_str("--opponent-id")?,
        exploit_level: pargs.value_from_str("--exploit-level").unwrap_or(0.7),
        iterations: pargs.value_from_str("--iterations").unwrap_or(100_000),
        timeout_ms: pargs.value_from_str("--timeout-ms").unwrap_or(1_500),
        seed: pargs.opt_value_from_str("--seed")?,
        json: pargs.contains("--json"),
    };

    let leftover = pargs.finish();
    if !leftover.is_empty() {
        bail!("unrecognized arguments: {leftover:?}");
    }

    run(args)
}

fn run(args: Args) -> Result<()> {
    let hero = parse_hand(&args.hand)?;
    let board = match &args.board {
        Some(board) => parse_cards(board).context("malformed --board")?,
        None => Vec::new(),
    };
    let position: Position = args
        .position
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let situation = Situation::new(
        hero,
        board,
        args.pot,
        args.call,
        args.stack,
        position,
        args.opponent_id.clone(),
        args.opponents,
    )
    .context("invalid situation")?;

    let oracle = match args.seed {
        Some(seed) => MonteCarloOracle::seeded(seed),
        None => MonteCarloOracle::new(),
    };
    let config = EngineConfig::default()
        .with_exploitation_level(args.exploit_level)
        .with_iterations(args.iterations)
        .with_oracle_timeout(Some(Duration::from_millis(args.timeout_ms)));

    let engine = DecisionEngine::new(
        Arc::new(CachedOracle::new(oracle, config.equity_cache_capacity)),
        Arc::new(OpponentTracker::new(config.min_classify_hands)),
        config,
    );

    let record = engine.decide(&situation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", format_report(&situation, &record));
    }

    Ok(())
}

fn parse_hand(s: &str) -> Result<[Card; 2]> {
    let cards = parse_cards(s).context("malformed --hand")?;
    match cards.as_slice() {
        [a, b] => Ok([*a, *b]),
        _ => bail!("--hand needs exactly two cards, got {}", cards.len()),
    }
}

fn format_report(situation: &Situation, record: &DecisionRecord) -> String {
    let mut out = String::new();
    let divider = "=".repeat(62);

    out.push_str(&format!("{divider}\n"));
    out.push_str(&format!(
        "Hand {}{}  board [{}]  pot {:.0}  to call {:.0}  stack {:.0}\n",
        situation.hero()[0],
        situation.hero()[1],
        situation
            .board()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        situation.pot(),
        situation.call_amount(),
        situation.stack(),
    ));
    out.push_str(&format!("{divider}\n\n"));

    out.push_str("EQUITY\n");
    out.push_str(&format!(
        "  raw {:.1}%  realized {:.1}%  ({} iterations{}{})\n",
        record.raw_equity * 100.0,
        record.realized_equity * 100.0,
        record.equity_iterations,
        if record.equity_degraded { ", degraded" } else { "" },
        if record.oracle_fallback { ", heuristic fallback" } else { "" },
    ));
    out.push_str(&format!(
        "  pot odds {}  required equity {:.1}%\n",
        record.pot_odds.format_ratio(),
        record.pot_odds.required_equity * 100.0,
    ));
    out.push_str(&format!(
        "  SPR {:.2} ({}) - {}\n\n",
        record.spr.spr, record.spr.category, record.spr.strategy_hint,
    ));

    out.push_str("BOARD\n");
    out.push_str(&format!(
        "  {} texture, connectivity {:.2}, c-bet prior {:.0}% @ {:.0}% pot\n\n",
        record.board.texture,
        record.board.connectivity,
        record.board.cbet_frequency * 100.0,
        record.board.cbet_size * 100.0,
    ));

    out.push_str("EXPECTED VALUE\n");
    let mark = |action| if record.action == action { ">" } else { " " };
    out.push_str(&format!(
        "{} fold  {:+.2}\n",
        mark(AdvisedAction::Fold),
        record.ev.fold
    ));
    out.push_str(&format!(
        "{} call  {:+.2}\n",
        mark(AdvisedAction::Call),
        record.ev.call
    ));
    match record.ev.raise {
        Some(ev) => out.push_str(&format!("{} raise {ev:+.2}\n", mark(AdvisedAction::Raise))),
        None => out.push_str("  raise unavailable (stack covers at most the call)\n"),
    }

    out.push_str(&format!(
        "\nRECOMMENDATION: {} {:.0} (confidence {:.0}%)\n",
        record.action,
        record.size,
        record.confidence * 100.0,
    ));
    out.push_str(&format!(
        "  mix: fold {:.0}% / call {:.0}% / raise {:.0}%\n",
        record.action_distribution.fold * 100.0,
        record.action_distribution.call * 100.0,
        record.action_distribution.raise * 100.0,
    ));

    if !record.exploits.is_empty() {
        out.push_str("\nEXPLOITS\n");
        for signal in &record.exploits {
            out.push_str(&format!(
                "  {} (+{:.1} bb): {}\n",
                signal.kind, signal.ev_gain_bb, signal.adjustment
            ));
        }
    }

    out.push_str(&format!("{divider}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hand() {
        let hand = parse_hand("AsKs").unwrap();
        assert_eq!(hand[0].to_string(), "A♠");
        assert!(parse_hand("As").is_err());
        assert!(parse_hand("AsKsQs").is_err());
    }

    #[test]
    fn test_report_contains_recommendation() {
        let situation = Situation::new(
            parse_hand("AsKs").unwrap(),
            vec![],
            100.0,
            0.0,
            1000.0,
            Position::Btn,
            None,
            1,
        )
        .unwrap();
        let engine = DecisionEngine::new(
            Arc::new(MonteCarloOracle::seeded(3)),
            Arc::new(OpponentTracker::new(30)),
            EngineConfig::default().with_iterations(5_000),
        );
        let record = engine.decide(&situation);
        let report = format_report(&situation, &record);
        assert!(report.contains("RECOMMENDATION"));
        assert!(report.contains("EXPECTED VALUE"));
    }
}
