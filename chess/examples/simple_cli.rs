// Simple command-line application to play chess

use lynxchess::{Color, Game, GameStatus, Move, MoveOutcome, PrettyStyle, Promotion};
use std::io::{self, BufRead, Write};

fn main() {
    let mut stdin = io::stdin().lock();
    let mut game = Game::new();

    loop {
        let status = game.status();
        if status != GameStatus::Ongoing {
            println!("{}", game.board().pretty(PrettyStyle::Ascii));
            println!("Game finished: {}", status);
            break;
        }

        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        let side = match game.side_to_move() {
            Color::White => "White",
            Color::Black => "Black",
        };
        if game.king_in_check(game.side_to_move()) {
            println!("{} is in check", side);
        }
        print!("{} move: ", side);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        let mv = match s.parse::<Move>() {
            Ok(mv) => mv,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };

        match game.try_move(mv.from, mv.to) {
            Ok(MoveOutcome::Completed) => {}
            Ok(MoveOutcome::PromotionPending) => loop {
                print!("Promote to [q/r/b/n, empty line cancels]: ");
                io::stdout().flush().unwrap();
                let mut choice = String::new();
                stdin.read_line(&mut choice).unwrap();
                let choice = choice.trim();
                if choice.is_empty() {
                    game.cancel_promotion().unwrap();
                    break;
                }
                match choice.parse::<Promotion>() {
                    Ok(p) => {
                        game.resolve_promotion(p).unwrap();
                        break;
                    }
                    Err(e) => println!("Bad choice: {}", e),
                }
            },
            Err(e) => println!("Bad move: {}", e),
        }

        println!();
    }
}
