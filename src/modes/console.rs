//! Human play in the text console, one command per line

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::game::GameConfig;
use crate::input::{parse_console_command, ConsoleCommand};
use crate::rl::SnakeEnvironment;

const PROMPT: &str = "Action (w=UP, s=DOWN, a=LEFT, d=RIGHT, q=quit): ";

pub struct ConsoleMode {
    env: SnakeEnvironment,
}

impl ConsoleMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let env = SnakeEnvironment::new(config).context("Failed to create environment")?;
        Ok(Self { env })
    }

    /// Play until the snake crashes, the player quits or input ends
    ///
    /// Returns the number of foods eaten.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<u32> {
        self.env.reset();
        let mut lines = input.lines();

        loop {
            writeln!(out, "{}", self.env.render())?;
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line.context("Failed to read command")?;

            let action = match parse_console_command(&line) {
                ConsoleCommand::Move(action) => action,
                ConsoleCommand::Quit => break,
                ConsoleCommand::Invalid(_) => {
                    writeln!(out, "Invalid key!")?;
                    continue;
                }
            };

            let (_, reward, done) = self.env.step(action)?;
            writeln!(out, "Reward: {}", reward)?;

            if done {
                writeln!(out, "Game over!")?;
                writeln!(out, "{}", self.env.render())?;
                break;
            }
        }

        Ok(self.env.score())
    }
}
