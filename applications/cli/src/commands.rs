//! Interactive transport commands

use std::fmt;

/// One line typed at the `play` prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplCommand {
    /// `p`: play/pause
    TogglePlay,
    /// `n`: next track
    Next,
    /// `b`: previous track
    Previous,
    /// `s <percent>`: seek
    Seek(f64),
    /// `v <level>`: volume, 0.0 - 1.0
    Volume(f32),
    /// `stop`
    Stop,
    /// `i`: show what is playing
    Status,
    /// `ls`: show the queue
    Queue,
    /// `h`
    Help,
    /// `q`
    Quit,
}

/// Why a line was not understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
commands:
  p          play / pause
  n          next track
  b          previous track
  s <pct>    seek to percent (0-100)
  v <level>  volume (0.0-1.0)
  stop       stop and rewind
  i          current track
  ls         queue
  h          this help
  q          quit";

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    if words.next().is_some() {
        return Err(ParseError(format!("too many arguments to `{word}`")));
    }

    let command = match (word, argument) {
        ("p", None) => ReplCommand::TogglePlay,
        ("n", None) => ReplCommand::Next,
        ("b", None) => ReplCommand::Previous,
        ("stop", None) => ReplCommand::Stop,
        ("i", None) => ReplCommand::Status,
        ("ls", None) => ReplCommand::Queue,
        ("h" | "help" | "?", None) => ReplCommand::Help,
        ("q" | "quit", None) => ReplCommand::Quit,
        ("s", Some(value)) => ReplCommand::Seek(parse_number(word, value)?),
        ("v", Some(value)) => ReplCommand::Volume(parse_number(word, value)?),
        ("s" | "v", None) => {
            return Err(ParseError(format!("`{word}` needs a value")));
        }
        (_, Some(_)) if matches!(
            word,
            "p" | "n" | "b" | "stop" | "i" | "ls" | "h" | "help" | "q" | "quit"
        ) => {
            return Err(ParseError(format!("`{word}` takes no value")));
        }
        _ => return Err(ParseError(format!("unknown command `{word}` (h for help)"))),
    };

    Ok(Some(command))
}

fn parse_number<T: std::str::FromStr>(word: &str, value: &str) -> Result<T, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError(format!("`{word}` needs a number, got `{value}`")))
}

/// `m:ss` for a number of seconds
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transport_words() {
        assert_eq!(parse_command("p").unwrap(), Some(ReplCommand::TogglePlay));
        assert_eq!(parse_command(" n ").unwrap(), Some(ReplCommand::Next));
        assert_eq!(parse_command("b").unwrap(), Some(ReplCommand::Previous));
        assert_eq!(parse_command("stop").unwrap(), Some(ReplCommand::Stop));
        assert_eq!(parse_command("q").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(parse_command("").unwrap(), None);
    }

    #[test]
    fn parses_values() {
        assert_eq!(parse_command("s 50").unwrap(), Some(ReplCommand::Seek(50.0)));
        assert_eq!(parse_command("s -3").unwrap(), Some(ReplCommand::Seek(-3.0)));
        assert_eq!(parse_command("v 0.25").unwrap(), Some(ReplCommand::Volume(0.25)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("s").is_err());
        assert!(parse_command("v loud").is_err());
        assert!(parse_command("p now").is_err());
        assert!(parse_command("s 1 2").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn formats_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(61.9), "1:01");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
