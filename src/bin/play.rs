use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use memodeck::{
    build_deck, format_elapsed, rng_for_game, CatalogClient, FlipOutcome, GameSession, ScoreRecord,
    ScoreStore, MISMATCH_DELAY_MS, PAIR_COUNT,
};

#[derive(Debug, Parser)]
#[command(name = "play", about = "Memodeck memory-matching game, terminal driver")]
struct Args {
    /// Catalog base URL; entity ids are appended as path segments
    #[arg(long, default_value = "https://pokeapi.co/api/v2/pokemon")]
    base_url: String,

    /// Leaderboard log file
    #[arg(long, default_value = "scores.json")]
    scores: PathBuf,

    /// Name recorded on the leaderboard
    #[arg(long, default_value = "Player")]
    player: String,

    /// Deterministic seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound of the catalog id range to draw from
    #[arg(long, default_value_t = 150)]
    max_id: u32,

    /// Number of pairs per game
    #[arg(long, default_value_t = PAIR_COUNT)]
    pairs: usize,
}

fn render(session: &GameSession) {
    for card in session.deck() {
        if card.matched {
            println!("  [{:2}] == {}", card.position, card.record.name);
        } else if card.face_up {
            println!("  [{:2}] ?? {}", card.position, card.record.name);
        } else {
            println!("  [{:2}] ##", card.position);
        }
    }
}

fn print_leaderboard(store: &ScoreStore) {
    let log = store.load_all();
    if log.is_empty() {
        return;
    }
    println!("[play] Leaderboard (most recent first):");
    for rec in log.iter().rev() {
        println!("  {} {}: {}", rec.date, rec.player, rec.score);
    }
}

/// Prompt and read one line; None at EOF.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    if line.is_empty() {
        return None;
    }
    Some(line.trim().to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let store = ScoreStore::new(&args.scores);
    print_leaderboard(&store);

    let client = CatalogClient::new(&args.base_url);
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session = GameSession::new();
    let mut game_id: u64 = 0;

    loop {
        // Timer starts with the load, before any card is visible.
        session.begin_loading()?;
        let mut rng = rng_for_game(seed, game_id);
        println!("[play] Fetching {} records from {} ...", args.pairs, args.base_url);
        let records = match client
            .fetch_random_records(args.pairs, args.max_id, &mut rng)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                session.fail_loading();
                return Err(format!("Catalog fetch error: {e}").into());
            }
        };
        let deck = build_deck(&records, &mut rng)?;
        session.deal(deck)?;

        while !session.is_won() {
            render(&session);
            let Some(input) = read_line("flip> ") else {
                println!("[play] Bye.");
                return Ok(());
            };
            let Ok(pos) = input.parse::<usize>() else {
                println!("[play] Enter a card position.");
                continue;
            };
            match session.flip(pos) {
                FlipOutcome::Ignored => println!("[play] No flip."),
                FlipOutcome::FirstUp { position } => {
                    println!("[play] {} revealed.", session.deck()[position].record.name);
                }
                FlipOutcome::Matched { positions, .. } => {
                    println!(
                        "[play] Match! {} ({} of {}).",
                        session.deck()[positions.0].record.name,
                        session.match_count(),
                        session.deck().len() / 2
                    );
                }
                FlipOutcome::Mismatched { .. } => {
                    render(&session);
                    println!("[play] No match, flipping back...");
                    tokio::time::sleep(std::time::Duration::from_millis(MISMATCH_DELAY_MS)).await;
                    session.resolve_mismatch();
                }
            }
        }

        let elapsed = format_elapsed(session.elapsed_ms());
        println!("[play] Won in {elapsed}.");
        store.append(ScoreRecord {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            player: args.player.clone(),
            score: elapsed,
        })?;
        print_leaderboard(&store);

        game_id += 1;
        match read_line("play again? (y/n)> ") {
            Some(ans) if ans.eq_ignore_ascii_case("y") => {}
            _ => return Ok(()),
        }
    }
}
