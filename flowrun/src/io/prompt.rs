//! Interactive collection of values not supplied as CLI flags.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};

/// Source of user-provided field values.
///
/// Operations validate what comes back and re-ask; implementations only
/// move strings around. Tests substitute a scripted implementation.
pub trait Prompter {
    /// Ask for one line of input. An empty answer takes `default` when one
    /// is offered.
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<String>;

    /// Ask the user to pick one of `options`; returns the chosen index.
    /// An empty answer takes `default`.
    fn choose(&mut self, label: &str, options: &[&str], default: usize) -> Result<usize>;
}

/// Prompter reading answers from stdin. Prompts go to stderr so product
/// output on stdout stays clean.
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read stdin")?;
        if read == 0 {
            return Err(anyhow!("stdin closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl Prompter for StdinPrompter {
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        loop {
            match default {
                Some(default) => eprint!("{label} [{default}]: "),
                None => eprint!("{label}: "),
            }
            io::stderr().flush().ok();
            let answer = self.read_line()?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        }
    }

    fn choose(&mut self, label: &str, options: &[&str], default: usize) -> Result<usize> {
        loop {
            eprintln!("{label}:");
            for (index, option) in options.iter().enumerate() {
                let marker = if index == default { "*" } else { " " };
                eprintln!("  {marker} {}) {option}", index + 1);
            }
            eprint!("choice [{}]: ", default + 1);
            io::stderr().flush().ok();
            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(default);
            }
            if let Some(index) = options.iter().position(|option| *option == answer) {
                return Ok(index);
            }
            if let Ok(number) = answer.parse::<usize>()
                && (1..=options.len()).contains(&number)
            {
                return Ok(number - 1);
            }
            eprintln!("pick one of the listed options");
        }
    }
}
