use blackjack_session::prelude::*;
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Play a resumable game of blackjack in the terminal. State is appended to a
/// snapshot log after every action, so quitting and relaunching picks the session
/// back up where it left off.
#[derive(Parser)]
struct Args {
    /// Path of the append-only snapshot log.
    #[arg(long, default_value = "blackjack.jsonl")]
    store: String,
    /// Clear the snapshot log and start a brand new session.
    #[arg(long)]
    fresh: bool,
    /// Reject stored history holding malformed card tokens instead of skipping them.
    #[arg(long)]
    strict: bool,
}

fn render_hand(hand: &Hand) -> String {
    let cards = hand
        .cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(" ");
    format!("{} ({})", cards, hand.score())
}

fn render<S: SnapshotStore>(game: &BlackjackGame<S>) {
    println!();
    if game.bets_locked() {
        println!("dealer: {}", render_hand(&game.dealer().hands[0]));
    } else {
        // The dealer's card stays face down until betting closes.
        println!("dealer: [??]");
    }
    for (i, hand) in game.player().hands.iter().enumerate() {
        let marker = if game.player().hands.len() > 1 && i == game.active_hand() {
            " <- active"
        } else {
            ""
        };
        println!(
            "hand {}: {}  bet ${}{}",
            i + 1,
            render_hand(hand),
            hand.bet,
            marker
        );
    }
    println!("money: ${}", game.player().money);
    if !game.message().is_empty() {
        println!("{}", game.message());
    }
    if game.round_over() {
        println!("round over, type `again` to play another");
    } else if !game.bets_locked() {
        println!("place a bet with `bet AMOUNT`");
    }
}

/// Maps a line of terminal input to an engine action and optional bet amount.
fn parse_command(line: &str) -> Result<Option<(Action, Option<u32>)>, String> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(w) => w,
        None => return Ok(None),
    };
    match command {
        "bet" => {
            let amount = words
                .next()
                .ok_or_else(|| "usage: bet AMOUNT".to_string())?
                .parse::<u32>()
                .map_err(|e| format!("bad bet amount: {}", e))?;
            Ok(Some((Action::Bet, Some(amount))))
        }
        "hit" => Ok(Some((Action::Hit, None))),
        "stand" => Ok(Some((Action::Stand, None))),
        "double" => Ok(Some((Action::Double, None))),
        "split" => Ok(Some((Action::Split, None))),
        "again" => Ok(Some((Action::PlayAgain, None))),
        _ => Err(format!(
            "unknown command {:?} (try bet/hit/stand/double/split/again/quit)",
            command
        )),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut store = FileStore::new(&args.store);
    if args.fresh {
        if let Err(e) = store.reset() {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
    let policy = if args.strict {
        DecodePolicy::Strict
    } else {
        DecodePolicy::Lenient
    };

    let mut game = match BlackjackGame::resume_with_policy(store, policy) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    render(&game);
    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        }
        let line = line.trim();
        if line == "quit" {
            break;
        }
        match parse_command(line) {
            Ok(Some((action, bet))) => {
                if !game.validate_action(action) {
                    println!("{} is not available right now", action);
                    continue;
                }
                if let Err(e) = game.apply_action(action, bet) {
                    // The in-memory game is fine, only the durability step failed.
                    eprintln!("could not save the game, try again: {}", e);
                    continue;
                }
                render(&game);
            }
            Ok(None) => {}
            Err(msg) => println!("{}", msg),
        }
    }
}
