//! Reading motion commands from files and buffered readers
//!
//! Any read failure aborts the whole read; there is no partial-file recovery.
//! Bytes that are not valid UTF-8 are replaced rather than rejected, since
//! only ASCII fields are ever recognised.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, error};

use super::{GcodeParser, MotionCommand, ParserOptions};
use depositkit_core::{GcodeError, Result};

/// Buffer size for reading command files (64 KB)
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Streaming command reader over any [`BufRead`]
///
/// Yields one command per input line. After the first error the iterator is
/// exhausted.
pub struct CommandReader<R> {
    reader: R,
    parser: GcodeParser,
    buffer: Vec<u8>,
    line_number: u32,
    failed: bool,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R, options: ParserOptions) -> Self {
        Self {
            reader,
            parser: GcodeParser::with_options(options),
            buffer: Vec::new(),
            line_number: 0,
            failed: false,
        }
    }

    /// Lines consumed so far
    pub fn line_number(&self) -> u32 {
        self.line_number
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<MotionCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line = String::from_utf8_lossy(&self.buffer);
                let line = line.trim_end_matches(['\n', '\r']);
                Some(Ok(self.parser.parse_line(line)))
            }
            Err(e) => {
                self.failed = true;
                let line_number = self.line_number + 1;
                error!("Command source failed at line {}: {}", line_number, e);
                Some(Err(GcodeError::ReadFailed {
                    line_number,
                    reason: e.to_string(),
                }
                .into()))
            }
        }
    }
}

/// Read every command from a buffered reader
pub fn read_commands<R: BufRead>(reader: R, options: ParserOptions) -> Result<Vec<MotionCommand>> {
    let commands = CommandReader::new(reader, options).collect::<Result<Vec<_>>>()?;
    debug!("Read {} motion commands", commands.len());
    Ok(commands)
}

/// Read every command from a file
pub fn read_commands_from_file(
    path: impl AsRef<Path>,
    options: ParserOptions,
) -> Result<Vec<MotionCommand>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GcodeError::OpenFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    debug!("Reading motion commands from {}", path.display());
    read_commands(BufReader::with_capacity(READ_BUFFER_SIZE, file), options)
}
