//! Section/record driver.
//!
//! Walks the index line by line. After the preamble, sections are entered
//! in configured order as their header lines are seen; each data row under
//! the active section starts a [`Command`], and continuation lines extend
//! the record in progress.
//!
//! A line that matches no row shape abandons the record in progress, so a
//! record is only emitted once the next data row starts or the input ends.

use std::io::{self, BufRead};

use keyref_core::{Command, ConfigError, IndexConfig, ModeLayout, validate_config};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::columns::{Row, normalize_line, split_columns};
use crate::error::ParseError;

/// Description text meaning "same as the row above".
const DITTO: &str = "\"";

/// Counters from the last parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines read after the preamble.
    pub lines_read: usize,
    /// Rows that started a record.
    pub data_rows: usize,
    /// Rows appended to a record's description.
    pub continuation_rows: usize,
    /// Lines under an active section that matched no row shape.
    pub rejected_rows: usize,
    /// Records dropped because a rejected row interrupted them.
    pub abandoned_commands: usize,
    /// Names of the sections entered, in order.
    pub sections_entered: Vec<String>,
}

/// Parser for the editor help index.
pub struct IndexParser {
    modes: Vec<ModeLayout>,
    tab_width: usize,
    preamble: Regex,
    stats: ParseStats,
}

impl IndexParser {
    /// Creates a parser for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the tables fail validation and
    /// [`ConfigError::InvalidPattern`] if the preamble pattern does not
    /// compile.
    pub fn new(config: &IndexConfig) -> Result<Self, ConfigError> {
        let errors = validate_config(config);
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        let preamble =
            Regex::new(&config.preamble_pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: config.preamble_pattern.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            modes: config.modes.clone(),
            tab_width: config.tab_width,
            preamble,
            stats: ParseStats::default(),
        })
    }

    /// Counters from the most recent parse.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Parses a whole document held in memory.
    pub fn parse(&mut self, text: &str) -> Result<Vec<Command>, ParseError> {
        self.run(text.lines().map(|line| Ok::<_, io::Error>(line.to_string())))
    }

    /// Parses a document from a reader.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<Vec<Command>, ParseError> {
        self.run(reader.lines())
    }

    fn run<I>(&mut self, lines: I) -> Result<Vec<Command>, ParseError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut state = SectionState::new(&self.modes, self.tab_width);
        let mut in_preamble = true;

        for (idx, line) in lines.enumerate() {
            let line = line?;
            if in_preamble {
                in_preamble = !self.preamble.is_match(&line);
                continue;
            }
            state.feed(idx + 1, &line)?;
        }

        if in_preamble {
            warn!(pattern = %self.preamble, "No preamble separator found; nothing parsed");
        }

        let (commands, stats) = state.finish();
        debug!(commands = commands.len(), ?stats, "Parsed index");
        self.stats = stats;
        Ok(commands)
    }
}

struct SectionState<'a> {
    modes: &'a [ModeLayout],
    tab_width: usize,
    current: Option<usize>,
    next: usize,
    pending: Option<Command>,
    skip: usize,
    commands: Vec<Command>,
    stats: ParseStats,
}

impl<'a> SectionState<'a> {
    fn new(modes: &'a [ModeLayout], tab_width: usize) -> Self {
        Self {
            modes,
            tab_width,
            current: None,
            next: 0,
            pending: None,
            skip: 0,
            commands: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        self.stats.lines_read += 1;
        if self.skip > 0 {
            self.skip -= 1;
            return Ok(());
        }

        let line = normalize_line(raw, self.tab_width);
        let modes = self.modes;

        if let Some(current) = self.current {
            let layout = &modes[current];
            match split_columns(layout, &line) {
                Some(row) => self.apply_row(layout, row, line_no)?,
                None => {
                    debug!(line = line_no, mode = %layout.name, text = %line, "Rejected row");
                    self.stats.rejected_rows += 1;
                    if let Some(dropped) = self.pending.take() {
                        debug!(line = line_no, command = %dropped, "Abandoned command");
                        self.stats.abandoned_commands += 1;
                    }
                }
            }
        }

        if let Some(next) = modes.get(self.next) {
            if line.starts_with(&next.header) {
                debug!(line = line_no, mode = %next.name, "Entered section");
                self.current = Some(self.next);
                self.next += 1;
                self.skip = next.skip_lines;
                self.stats.sections_entered.push(next.name.clone());
            }
        }

        Ok(())
    }

    fn apply_row(&mut self, layout: &ModeLayout, row: Row, line_no: usize) -> Result<(), ParseError> {
        let Row {
            tag,
            chars,
            flags,
            mut description,
        } = row;

        let Some(chars) = chars else {
            return self.extend(layout, tag, &description, line_no);
        };

        if let Some(previous) = self.pending.take() {
            if description == DITTO {
                description = previous.description.clone();
            }
            self.commands.push(previous);
        }

        let command = Command::new(
            layout,
            tag.as_deref(),
            &chars,
            flags.as_deref(),
            &description,
            line_no,
        )
        .map_err(|source| ParseError::Command {
            line: line_no,
            source,
        })?;
        debug!(line = line_no, %command, "Created command");
        self.stats.data_rows += 1;
        self.pending = Some(command);
        Ok(())
    }

    fn extend(
        &mut self,
        layout: &ModeLayout,
        tag: Option<String>,
        description: &str,
        line_no: usize,
    ) -> Result<(), ParseError> {
        let mode = || layout.name.clone();
        let Some(command) = self.pending.as_mut() else {
            return Err(ParseError::OrphanContinuation {
                line: line_no,
                mode: mode(),
            });
        };
        if let Some(tag) = tag {
            return Err(ParseError::TaggedContinuation {
                line: line_no,
                mode: mode(),
                tag,
            });
        }
        if description.is_empty() {
            return Err(ParseError::EmptyContinuation {
                line: line_no,
                mode: mode(),
            });
        }

        command.append_description(description);
        debug!(line = line_no, chars = %command.chars, "Extended description");
        self.stats.continuation_rows += 1;
        Ok(())
    }

    fn finish(mut self) -> (Vec<Command>, ParseStats) {
        if let Some(command) = self.pending.take() {
            self.commands.push(command);
        }
        (self.commands, self.stats)
    }
}
