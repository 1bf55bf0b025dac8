use clap::Args;
use tappyswipey_core::{failure_requirements, Catalog};

#[derive(Args)]
pub struct ConflictsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ConflictsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let requirements = failure_requirements(Catalog::global());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&requirements)?);
        return Ok(());
    }

    for r in &requirements {
        println!("{} waits for {} to fail", r.action.title, r.must_fail.title);
    }
    Ok(())
}
