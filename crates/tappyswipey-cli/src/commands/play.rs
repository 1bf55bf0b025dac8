use clap::Args;
use tappyswipey_core::{Command, Config, GameMode, SessionDriver, SessionHandle};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::script::ScriptLine;

#[derive(Args)]
pub struct PlayArgs {
    /// Game mode
    #[arg(long, default_value = "timed")]
    mode: GameMode,
    /// Start immediately instead of waiting for a `start` line
    #[arg(long)]
    autostart: bool,
}

fn dispatch(handle: &SessionHandle, line: &str) {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return;
    }
    let command = match line.parse::<ScriptLine>() {
        Ok(ScriptLine::Start) => Command::Start,
        Ok(ScriptLine::Pause) => Command::Pause,
        Ok(ScriptLine::Unpause) => Command::Unpause,
        Ok(ScriptLine::End) => Command::End,
        Ok(ScriptLine::Gesture {
            gesture,
            orientation,
        }) => Command::Gesture {
            gesture,
            orientation,
        },
        Ok(tick) => {
            eprintln!("{tick:?} is driven by the real clock in play mode");
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    handle.send(command);
}

async fn play(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let session = config.new_session(args.mode)?;
    let (handle, mut events, mut join) = SessionDriver::spawn(session);

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!("failed to encode event: {e}"),
            }
        }
    });

    if args.autostart {
        handle.start();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let session = loop {
        tokio::select! {
            finished = &mut join => break finished?,
            line = lines.next_line() => match line? {
                Some(line) => dispatch(&handle, &line),
                None => {
                    handle.end();
                    break (&mut join).await?;
                }
            },
        }
    };
    drop(handle);
    printer.await?;

    println!("{}", serde_json::to_string(&session.snapshot())?);
    Ok(())
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(play(args));
    // A pending stdin read would otherwise hold up runtime drop after the
    // countdown ends the session.
    runtime.shutdown_background();
    result
}
