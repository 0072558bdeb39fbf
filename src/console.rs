use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Line-oriented operator I/O. Everything interactive goes through this so the
/// quiz and session logic can run against scripted input.
#[async_trait]
pub trait Console: Send + Sync {
    /// Shows `prompt` and waits for one line. `None` means input is exhausted.
    async fn read_line(&self, prompt: &str) -> Result<Option<String>>;

    fn write_line(&self, line: &str);
}

pub struct StdConsole {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdConsole {
    pub fn new() -> StdConsole {
        StdConsole {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
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
    async fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{prompt}").context("failed to write prompt")?;
            stdout.flush().context("failed to flush stdout")?;
        }
        let mut lines = self.lines.lock().await;
        lines.next_line().await.context("failed to read from stdin")
    }

    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

/// Replays a fixed list of answers and records everything shown to the operator.
#[derive(Default)]
pub struct ScriptedConsole {
    inputs: std::sync::Mutex<VecDeque<String>>,
    prompts: std::sync::Mutex<Vec<String>>,
    output: std::sync::Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> ScriptedConsole
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            inputs: std::sync::Mutex::new(inputs.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Lines written so far, in order.
    pub fn output(&self) -> Vec<String> {
        self.output.lock().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn transcript(&self) -> String {
        self.output().join("\n")
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.lock().map(|i| i.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let mut inputs = self
            .inputs
            .lock()
            .map_err(|_| anyhow::anyhow!("scripted input lock poisoned"))?;
        Ok(inputs.pop_front())
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            output.push(line.to_string());
        }
    }
}
