//! Line-oriented session scripts, shared by `simulate` and `play`.
//!
//! ```text
//! # comments and blank lines are ignored
//! start
//! tap 1 2 portrait        # touches, taps, optional orientation
//! swipe 3 left            # touches, direction, optional orientation
//! pause
//! combo-tick 5            # deliver N combo-reset ticks
//! unpause
//! countdown-tick 100      # deliver N countdown ticks
//! advance 2500            # simulated time; delivers whatever ticks fall due
//! end
//! ```

use std::str::FromStr;

use tappyswipey_core::{Gesture, Orientation, SwipeDirection, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLine {
    Start,
    Pause,
    Unpause,
    End,
    Gesture {
        gesture: Gesture,
        orientation: Orientation,
    },
    ComboTick(u32),
    CountdownTick(u32),
    Advance(u64),
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn parse_num<T: FromStr>(field: &str, raw: Option<&str>) -> Result<T, ValidationError> {
    let raw = raw.ok_or_else(|| invalid(field, "missing value"))?;
    raw.parse()
        .map_err(|_| invalid(field, format!("'{raw}' is not a valid number")))
}

fn parse_count(raw: Option<&str>) -> Result<u32, ValidationError> {
    raw.map_or(Ok(1), |n| parse_num("count", Some(n)))
}

fn parse_orientation(raw: Option<&str>) -> Result<Orientation, ValidationError> {
    raw.map_or(Ok(Orientation::Unknown), |s| {
        s.parse().map_err(|e: String| invalid("orientation", e))
    })
}

impl FromStr for ScriptLine {
    type Err = ValidationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or_else(|| invalid("command", "empty line"))?;
        let parsed = match command.to_ascii_lowercase().as_str() {
            "start" => ScriptLine::Start,
            "pause" => ScriptLine::Pause,
            "unpause" | "resume" => ScriptLine::Unpause,
            "end" | "quit" => ScriptLine::End,
            "tap" => {
                let touches = parse_num("touches", words.next())?;
                let taps = parse_num("taps", words.next())?;
                ScriptLine::Gesture {
                    gesture: Gesture::Tap { touches, taps },
                    orientation: parse_orientation(words.next())?,
                }
            }
            "swipe" => {
                let touches = parse_num("touches", words.next())?;
                let direction: SwipeDirection = words
                    .next()
                    .ok_or_else(|| invalid("direction", "missing value"))?
                    .parse()
                    .map_err(|e: String| invalid("direction", e))?;
                ScriptLine::Gesture {
                    gesture: Gesture::Swipe { touches, direction },
                    orientation: parse_orientation(words.next())?,
                }
            }
            "combo-tick" => ScriptLine::ComboTick(parse_count(words.next())?),
            "countdown-tick" => ScriptLine::CountdownTick(parse_count(words.next())?),
            "advance" => ScriptLine::Advance(parse_num("ms", words.next())?),
            other => return Err(invalid("command", format!("unknown command '{other}'"))),
        };
        if let Some(extra) = words.next() {
            return Err(invalid("command", format!("unexpected argument '{extra}'")));
        }
        Ok(parsed)
    }
}

/// Parse a whole script. Errors name the offending line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ValidationError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((i + 1, line))
        })
        .map(|(number, line)| {
            line.parse().map_err(|e| match e {
                ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
                    field: format!("line {number}: {field}"),
                    message,
                },
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gestures_with_and_without_orientation() {
        assert_eq!(
            "tap 2 3".parse::<ScriptLine>().unwrap(),
            ScriptLine::Gesture {
                gesture: Gesture::Tap { touches: 2, taps: 3 },
                orientation: Orientation::Unknown,
            }
        );
        assert_eq!(
            "swipe 1 up landscape-left".parse::<ScriptLine>().unwrap(),
            ScriptLine::Gesture {
                gesture: Gesture::Swipe {
                    touches: 1,
                    direction: SwipeDirection::Up
                },
                orientation: Orientation::LandscapeLeft,
            }
        );
    }

    #[test]
    fn tick_counts_default_to_one() {
        assert_eq!("combo-tick".parse::<ScriptLine>().unwrap(), ScriptLine::ComboTick(1));
        assert_eq!(
            "countdown-tick 40".parse::<ScriptLine>().unwrap(),
            ScriptLine::CountdownTick(40)
        );
        assert_eq!("advance 250".parse::<ScriptLine>().unwrap(), ScriptLine::Advance(250));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("tap one 1".parse::<ScriptLine>().is_err());
        assert!("swipe 1 sideways".parse::<ScriptLine>().is_err());
        assert!("jump".parse::<ScriptLine>().is_err());
        assert!("start now".parse::<ScriptLine>().is_err());
        assert!("advance".parse::<ScriptLine>().is_err());
    }

    #[test]
    fn script_skips_comments_and_reports_line_numbers() {
        let script = "# warm up\nstart\n\ntap 1 1 # first\nbogus\n";
        let err = parse_script(script).unwrap_err();
        assert!(err.to_string().contains("line 5"));

        let lines = parse_script("start\ntap 1 1 # first\nend\n").unwrap();
        assert_eq!(lines.len(), 3);
    }
}
