use clap::Args;
use tappyswipey_core::{ActionDefinition, ActionKind, Catalog};

#[derive(Args)]
pub struct CatalogArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
    /// Only tap actions
    #[arg(long, conflicts_with = "swipes")]
    taps: bool,
    /// Only swipe actions
    #[arg(long)]
    swipes: bool,
}

pub fn run(args: CatalogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::global();
    let actions: &[ActionDefinition] = if args.taps {
        catalog.taps()
    } else if args.swipes {
        catalog.swipes()
    } else {
        catalog.all()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(actions)?);
        return Ok(());
    }

    for action in actions {
        let detail = match action.kind {
            ActionKind::Tap { tap_count } => format!("{} touch x {} tap", action.touch_count, tap_count),
            ActionKind::Swipe { direction } => {
                format!("{} touch swipe {}", action.touch_count, direction.label().to_lowercase())
            }
        };
        println!("{:<28} {:>6} pts  {}", action.title, action.point_value, detail);
    }
    Ok(())
}
