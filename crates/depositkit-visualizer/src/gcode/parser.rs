//! Motion command parser
//!
//! Each input line becomes exactly one [`MotionCommand`]. Lines are split on
//! whitespace; a field starting with `G` selects the motion mode and fields
//! starting with `X`, `Y` or `Z` set the matching coordinate. Everything else
//! is ignored, and a malformed number never fails the parse.

use regex::Regex;
use tracing::trace;

use super::{MotionCommand, MotionMode};
use depositkit_core::modes::AxisFill;
use depositkit_settings::ParserSettings;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How axes missing from a line are filled
    pub axis_fill: AxisFill,
    /// Drop `;` and `(` comments before tokenizing
    pub strip_comments: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            axis_fill: AxisFill::ZeroFill,
            strip_comments: true,
        }
    }
}

impl From<&ParserSettings> for ParserOptions {
    fn from(settings: &ParserSettings) -> Self {
        Self {
            axis_fill: settings.axis_fill,
            strip_comments: settings.strip_comments,
        }
    }
}

/// Line-oriented motion command parser
///
/// Keeps the previously parsed command so that [`AxisFill::CarryForward`]
/// can inherit unmentioned fields.
#[derive(Debug, Clone, Default)]
pub struct GcodeParser {
    options: ParserOptions,
    previous: MotionCommand,
    lines_parsed: u32,
}

impl GcodeParser {
    /// Create a parser with default options (zero-fill, comments stripped)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit options
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Number of lines parsed so far
    pub fn lines_parsed(&self) -> u32 {
        self.lines_parsed
    }

    /// Forget the previous command, as if no line had been parsed yet
    pub fn reset(&mut self) {
        self.previous = MotionCommand::default();
        self.lines_parsed = 0;
    }

    /// Parse one line into a command
    pub fn parse_line(&mut self, line: &str) -> MotionCommand {
        self.lines_parsed += 1;

        let cleaned = if self.options.strip_comments {
            remove_comments(line)
        } else {
            line
        };

        let mut command = match self.options.axis_fill {
            AxisFill::ZeroFill => MotionCommand::default(),
            AxisFill::CarryForward => self.previous,
        };

        for field in cleaned.split_whitespace() {
            let mut chars = field.chars();
            let Some(letter) = chars.next() else {
                continue;
            };
            let target = match letter {
                'G' | 'X' | 'Y' | 'Z' => letter,
                _ => continue,
            };

            let Some(value) = parse_leading_number(chars.as_str()) else {
                trace!(
                    "Ignoring malformed field '{}' on line {}",
                    field,
                    self.lines_parsed
                );
                continue;
            };

            match target {
                'G' => command.mode = MotionMode::from_code(value),
                'X' => command.x = value,
                'Y' => command.y = value,
                _ => command.z = value,
            }
        }

        self.previous = command;
        command
    }

    /// Parse every line of a string
    pub fn parse_str(&mut self, source: &str) -> Vec<MotionCommand> {
        source.lines().map(|line| self.parse_line(line)).collect()
    }
}

/// Remove `;` and `(` comments from a line
fn remove_comments(line: &str) -> &str {
    static COMMENT_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let regex =
        COMMENT_REGEX.get_or_init(|| Regex::new(r"[;(].*").expect("invalid regex pattern"));
    match regex.find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    }
}

/// Longest prefix tried as a number; anything past it cannot be a finite f32
const MAX_NUMBER_LEN: usize = 64;

/// Parse the longest numeric prefix of `text` (`"1.5mm"` yields 1.5)
///
/// Returns `None` when no prefix is a finite number.
fn parse_leading_number(text: &str) -> Option<f32> {
    let candidate_len = text
        .bytes()
        .take(MAX_NUMBER_LEN)
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count();

    (1..=candidate_len)
        .rev()
        .find_map(|len| text[..len].parse::<f32>().ok())
        .filter(|value| value.is_finite())
}
