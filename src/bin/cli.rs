// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Line-oriented terminal adapter: two players at one keyboard.
//!
//! Renders the raw grid after every accepted action and reads one command
//! per line: `draw` to claim an earned draw, `undo` to take a half-move
//! back, anything else is coordinate notation (`e2e4`, `a7a8=Q`).

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};

use tandem_chess::game::Game;
use tandem_chess::{Color, Pair};

#[derive(Parser)]
#[command(name = "tandem-cli", about = "Play chess on the terminal")]
struct Args {
    /// How cell values are rendered on the board.
    #[arg(long, value_enum, default_value_t = IconStyle::Symbol)]
    icon: IconStyle,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IconStyle {
    /// Unicode chess glyphs.
    Symbol,
    /// Raw signed cell values.
    Number,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let stdin = io::stdin();
    let mut adapter = Adapter {
        game: Game::default(),
        players: Pair::new(String::new(), String::new()),
        input: stdin.lock(),
        output: io::stdout(),
        icon: args.icon,
    };
    adapter.run();
}

struct Adapter<R, W> {
    game: Game,
    players: Pair<String>,
    input: R,
    output: W,
    icon: IconStyle,
}

impl<R: BufRead, W: Write> Adapter<R, W> {
    fn run(&mut self) {
        self.write_line("Welcome to tandem chess");
        for color in [Color::White, Color::Black] {
            self.players[color] = self.prompt(&format!("Please enter {color} player's name:"));
        }
        self.write_line("");

        loop {
            let board = self.render();
            self.write_line(&board);
            let player = self.players[self.game.active_color()].clone();
            let input = self.prompt(&format!("Player {player} please enter input:"));
            if let Err(err) = self.process_input(&input) {
                self.write_line(&err.to_string());
            }
            if self.game.state().is_game_over() {
                break;
            }
        }

        let board = self.render();
        self.write_line(&board);
        self.write_game_over();
    }

    fn process_input(&mut self, input: &str) -> anyhow::Result<()> {
        match input {
            "draw" => self.game.force_draw(),
            "undo" => {
                if self.game.undo_last_move() {
                    self.write_line("undo successful");
                } else {
                    self.write_line("no moves to undo");
                }
                Ok(())
            }
            _ => self.game.apply_move_coord(input).map(|_| ()),
        }
    }

    fn write_game_over(&mut self) {
        match self.game.winner() {
            Some(winner) => {
                let name = self.players[winner].clone();
                self.write_line(&format!("Winner: {name}"));
            }
            None => {
                let state = self.game.state();
                self.write_line(&format!("Game ended in a {state}"));
            }
        }
    }

    fn prompt(&mut self, message: &str) -> String {
        self.write_line(message);
        let mut line = String::new();
        if self.input.read_line(&mut line).unwrap_or(0) == 0 {
            // input closed; resign the game for the side to move
            let _ = self.game.resign(self.game.active_color());
        }
        line.trim().to_string()
    }

    fn write_line(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }

    /// Render the external grid, rank 8 at the top.
    fn render(&self) -> String {
        const RULE: &str = "---------------------------";
        let grid = self.game.grid_raw();
        let mut out = String::with_capacity(600);
        let _ = writeln!(out, "{RULE}");
        for rank in (0..8).rev() {
            let _ = write!(out, "{} |", rank + 1);
            for file in 0..8 {
                let _ = write!(out, "{}|", icon(self.icon, grid[rank * 8 + file]));
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{RULE}");
        }
        let _ = write!(out, "    a  b  c  d  e  f  g  h ");
        out
    }
}

fn icon(style: IconStyle, value: i32) -> String {
    match style {
        IconStyle::Number => format!("{value:2}"),
        IconStyle::Symbol => {
            let glyph = match value {
                -6 => "-♔",
                -5 => "-♕",
                -4 => "-♖",
                -3 => "-♗",
                -2 => "-♘",
                -1 => "-♙",
                0 => " ·",
                1 => " ♟",
                2 => " ♞",
                3 => " ♝",
                4 => " ♜",
                5 => " ♛",
                6 => " ♚",
                _ => " ?",
            };
            glyph.to_string()
        }
    }
}
