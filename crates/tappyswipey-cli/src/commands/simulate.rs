use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tappyswipey_core::{Config, Event, GameMode, Session};

use crate::script::{parse_script, ScriptLine};

#[derive(Args)]
pub struct SimulateArgs {
    /// Game mode
    #[arg(long, default_value = "free")]
    mode: GameMode,
    /// Script file, or "-" for stdin
    #[arg(long, default_value = "-")]
    script: PathBuf,
    /// Pretty-print events
    #[arg(long)]
    pretty: bool,
}

/// Simulated time. Tracks when each periodic source fires next so `advance`
/// can deliver ticks in time order.
struct SimClock {
    now_ms: u64,
    next_countdown_ms: u64,
    next_combo_ms: u64,
}

impl SimClock {
    fn new(session: &Session) -> Self {
        let settings = session.settings();
        Self {
            now_ms: 0,
            next_countdown_ms: settings.countdown_tick_ms,
            next_combo_ms: settings.combo_reset_ms,
        }
    }

    fn advance(&mut self, session: &mut Session, by_ms: u64, out: &mut Vec<Event>) {
        let target = self.now_ms.saturating_add(by_ms);
        let countdown_period = session.settings().countdown_tick_ms;
        let combo_period = session.settings().combo_reset_ms;
        let timed = session.settings().is_timed();

        while !session.is_ended() {
            let countdown_due = timed && self.next_countdown_ms <= target;
            let combo_due = self.next_combo_ms <= target;
            if countdown_due && (!combo_due || self.next_countdown_ms <= self.next_combo_ms) {
                self.now_ms = self.next_countdown_ms;
                self.next_countdown_ms += countdown_period;
                out.extend(session.countdown_tick());
            } else if combo_due {
                self.now_ms = self.next_combo_ms;
                self.next_combo_ms += combo_period;
                out.extend(session.combo_tick());
            } else {
                break;
            }
        }
        if !session.is_ended() {
            self.now_ms = target;
        }
    }
}

fn read_script(path: &PathBuf) -> Result<String, Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Replay `lines` against `session`, collecting every event produced.
pub fn replay(
    session: &mut Session,
    lines: &[ScriptLine],
) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    let mut clock = SimClock::new(session);
    let mut events = Vec::new();

    for line in lines {
        match *line {
            ScriptLine::Start => events.extend(session.start()),
            ScriptLine::Pause => events.extend(session.pause()),
            ScriptLine::Unpause => events.extend(session.unpause()),
            ScriptLine::End => events.extend(session.end()),
            ScriptLine::Gesture {
                gesture,
                orientation,
            } => {
                let outcome = session.perform(gesture, orientation)?;
                events.extend(outcome.into_event());
            }
            ScriptLine::ComboTick(n) => {
                for _ in 0..n {
                    events.extend(session.combo_tick());
                }
            }
            ScriptLine::CountdownTick(n) => {
                for _ in 0..n {
                    events.extend(session.countdown_tick());
                }
            }
            ScriptLine::Advance(ms) => clock.advance(session, ms, &mut events),
        }
    }
    Ok(events)
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut session = config.new_session(args.mode)?;
    let lines = parse_script(&read_script(&args.script)?)?;
    tracing::debug!(lines = lines.len(), mode = ?args.mode, "replaying script");

    let events = replay(&mut session, &lines)?;
    let snapshot = session.snapshot();
    for event in events.iter().chain(std::iter::once(&snapshot)) {
        let json = if args.pretty {
            serde_json::to_string_pretty(event)?
        } else {
            serde_json::to_string(event)?
        };
        println!("{json}");
    }
    Ok(())
}
