use crate::core::catalog::{Catalog, JOIN_CATEGORY_NAMES, NUMBERS_A, NUMBERS_B};
use crate::core::report::Render;
use crate::utils::error::{QueryError, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const ARGUMENT_PROMPT: &str = "Input: $";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Basics,
    EntitiesBasics,
    SelectMany,
    Aggregates,
    Collections,
    Join,
    Grouping,
    Set,
    LoadTiming,
    Help,
    Quit,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Basics,
        Command::EntitiesBasics,
        Command::SelectMany,
        Command::Aggregates,
        Command::Collections,
        Command::Join,
        Command::Grouping,
        Command::Set,
        Command::LoadTiming,
        Command::Help,
        Command::Quit,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(Command::Basics),
            'e' => Some(Command::EntitiesBasics),
            's' => Some(Command::SelectMany),
            'a' => Some(Command::Aggregates),
            'c' => Some(Command::Collections),
            'j' => Some(Command::Join),
            'g' => Some(Command::Grouping),
            't' => Some(Command::Set),
            'r' => Some(Command::LoadTiming),
            'h' | '?' => Some(Command::Help),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }

    /// First character of the line, lowercased. Empty lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        line.trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase())
            .and_then(Self::from_code)
    }

    pub fn code(self) -> char {
        match self {
            Command::Basics => 'b',
            Command::EntitiesBasics => 'e',
            Command::SelectMany => 's',
            Command::Aggregates => 'a',
            Command::Collections => 'c',
            Command::Join => 'j',
            Command::Grouping => 'g',
            Command::Set => 't',
            Command::LoadTiming => 'r',
            Command::Help => 'h',
            Command::Quit => 'q',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Basics => "filtering, ordering and projection on employees",
            Command::EntitiesBasics => "filtered and ordered customers from the store",
            Command::SelectMany => "cross products",
            Command::Aggregates => "any / all / count / sum / max below a price",
            Command::Collections => "first, first-or-default and single",
            Command::Join => "inner, group and left outer joins",
            Command::Grouping => "grouping and nested grouping",
            Command::Set => "union, intersect and except",
            Command::LoadTiming => "lazy versus eager loading",
            Command::Help => "show this menu",
            Command::Quit => "quit",
        }
    }

    pub fn requires_argument(self) -> bool {
        matches!(self, Command::Aggregates)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Running,
    Terminated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
    pub ignored: usize,
}

/// Reads single-character commands and runs the matching catalog operation
/// until `q` or end of input.
pub struct Dispatcher<'c, 's> {
    catalog: &'c Catalog<'s>,
    prompt: String,
    state: DispatcherState,
    summary: RunSummary,
}

impl<'c, 's> Dispatcher<'c, 's> {
    pub fn new(catalog: &'c Catalog<'s>) -> Self {
        Self {
            catalog,
            prompt: crate::config::toml_config::DEFAULT_PROMPT.to_string(),
            state: DispatcherState::Running,
            summary: RunSummary::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Only failures writing to `output` end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<RunSummary> {
        while self.state == DispatcherState::Running {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            match read_line(&mut input)? {
                Some(line) => self.step(&line, &mut input, &mut output)?,
                None => {
                    tracing::debug!("End of input, terminating");
                    self.state = DispatcherState::Terminated;
                }
            }
        }

        tracing::info!(
            "✅ Session finished: {} executed, {} failed, {} ignored",
            self.summary.executed,
            self.summary.failed,
            self.summary.ignored
        );
        Ok(self.summary.clone())
    }

    pub fn step<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        if self.state == DispatcherState::Terminated {
            return Ok(());
        }

        let command = match Command::parse(line) {
            Some(Command::Quit) => {
                tracing::debug!("Quit requested");
                self.state = DispatcherState::Terminated;
                return Ok(());
            }
            Some(command) => command,
            None => {
                tracing::warn!("Ignoring unrecognized command {:?}", line);
                self.summary.ignored += 1;
                writeln!(output)?;
                return Ok(());
            }
        };

        if command == Command::Help {
            for c in Command::ALL {
                writeln!(output, "  {}  {}", c.code(), c.description())?;
            }
        } else {
            tracing::info!("▶️  Running '{}' ({})", command.code(), command.description());
            match self.execute(command, input, output) {
                Ok(lines) => {
                    for line in lines {
                        writeln!(output, "{}", line)?;
                    }
                    self.summary.executed += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "❌ Command '{}' failed: {} (Category: {:?})",
                        command.code(),
                        e,
                        e.category()
                    );
                    writeln!(output, "Error: {}", e)?;
                    self.summary.failed += 1;
                }
            }
        }

        writeln!(output)?;
        Ok(())
    }

    fn execute<R: BufRead, W: Write>(
        &self,
        command: Command,
        input: &mut R,
        output: &mut W,
    ) -> Result<Vec<String>> {
        let lines = match command {
            Command::Basics => self.catalog.basics().render(),
            Command::EntitiesBasics => self.catalog.entities_basics()?.render(),
            Command::SelectMany => self.catalog.select_many(&NUMBERS_A, &NUMBERS_B)?.render(),
            Command::Aggregates => {
                let threshold = read_threshold(input, output)?;
                self.catalog.aggregates(threshold)?.render()
            }
            Command::Collections => self.catalog.collections()?.render(),
            Command::Join => self.catalog.join(&JOIN_CATEGORY_NAMES)?.render(),
            Command::Grouping => self.catalog.grouping()?.render(),
            Command::Set => self.catalog.set_letters()?.render(),
            Command::LoadTiming => self.catalog.load_timing()?.render(),
            Command::Help | Command::Quit => Vec::new(),
        };
        Ok(lines)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_threshold<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Decimal> {
    write!(output, "{}", ARGUMENT_PROMPT)?;
    output.flush()?;

    let raw = read_line(input)?.ok_or_else(|| QueryError::InputParse {
        input: String::new(),
        reason: "end of input before a price was entered".to_string(),
    })?;
    parse_threshold(&raw)
}

pub fn parse_threshold(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|e| QueryError::InputParse {
        input: raw.to_string(),
        reason: e.to_string(),
    })
}
