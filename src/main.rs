use call_reactions::cli::{Args, run};
use chrono::Local;
use clap::Parser;

// Replays a recorded reaction stream and prints the bursts it produces.
//
// Usage:
//   cargo run -- reactions.json
//   cargo run -- reactions.json --config burst.json

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let outcome = run(&args)?;

    for burst in &outcome.bursts {
        let names: Vec<&str> = burst.reactions.iter().map(|r| r.name.as_str()).collect();
        println!(
            "{:>8.3}s  {}  {}",
            burst.fired_at.as_secs_f64(),
            burst.key,
            names.join(", ")
        );
    }
    println!("{}", serde_json::to_string_pretty(&outcome.stats)?);
    Ok(())
}
