//! Terminal implementation of the learner I/O seam.

use anyhow::Result;
use async_trait::async_trait;
use edubridge_core::tutor::LearnerIo;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Prints to stdout and reads one line per prompt from stdin.
pub struct ConsoleIo {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleIo {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for ConsoleIo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LearnerIo for ConsoleIo {
    fn say(&mut self, text: &str) {
        println!("{text}");
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}
