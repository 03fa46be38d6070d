//! Play command - run one self-play game and print it

use anyhow::{Context, Result};
use clap::Args;

use hexgen_core::{GameStatus, HexGame, TacticalPlayer};

#[derive(Args)]
pub struct PlayArgs {
    /// Board dimension
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Output the game record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let seed = crate::resolve_seed(seed);
    tracing::info!("Playing {}x{} game with seed {}", args.size, args.size, seed);

    let game = play_single_game(args.size, seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.record())?);
    } else {
        print_game(&game);
    }

    Ok(())
}

fn play_single_game(size: usize, seed: u64) -> Result<HexGame> {
    let mut game = HexGame::new(size).context("Failed to create game")?;
    let mut strategy = TacticalPlayer::with_seed(seed);
    game.play(&mut strategy).context("Game aborted")?;
    Ok(game)
}

fn print_game(game: &HexGame) {
    println!("{}", game.board());

    for (ply, mv) in game.moves().iter().enumerate() {
        println!(
            "{:>4}. {} ({}, {}) {:?}",
            ply + 1,
            mv.player.symbol(),
            mv.row,
            mv.col,
            mv.kind
        );
    }

    match game.status() {
        GameStatus::Won(player) => {
            println!("\n{} wins after {} moves", player.symbol(), game.ply());
        }
        GameStatus::Drawn => println!("\nBoard full, no winner"),
        GameStatus::InProgress => println!("\nGame unfinished"),
    }
}
