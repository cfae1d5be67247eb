use crate::domain::ports::Console;
use crate::utils::error::{ArcadeError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Interactive terminal: prompts go to stdout, answers come from stdin.
pub struct StdConsole {
    // `next_line` is cancel-safe, so a timed prompt can be abandoned without losing input
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim_end_matches('\r').to_string()),
            None => Err(ArcadeError::InputClosed),
        }
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Console fed from a fixed list of answers. Everything shown is kept as a transcript.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    echo: bool,
}

impl ScriptedConsole {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            input: answers.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            echo: false,
        }
    }

    /// One answer per line of `text`.
    pub fn from_script(text: &str) -> Self {
        Self::new(text.lines().map(|l| l.trim_end_matches('\r').to_string()))
    }

    /// Also print the transcript to stdout as it is produced.
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        self.output.iter().filter(|line| line.contains(needle)).count()
    }

    fn record(&mut self, line: String) {
        if self.echo {
            println!("{}", line);
        }
        self.output.push(line);
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&mut self, prompt: &str) -> Result<String> {
        let answer = self.input.pop_front().ok_or(ArcadeError::InputClosed)?;
        self.record(format!("{}{}", prompt, answer));
        Ok(answer)
    }

    fn say(&mut self, text: &str) {
        for line in text.split('\n') {
            self.record(line.to_string());
        }
    }
}
