//! Airport Dispatch
//!
//! This demo shows the arbiter keeping a shared landing strip exclusive.
//!
//! Key concepts:
//! - Registry seeded through the builder
//! - Vehicles asking the dispatcher for the runway and the strip
//! - Declines as ordinary results, not errors
//!
//! Run with: RUST_LOG=concordat=debug cargo run --example airport_dispatch

use concordat::arbiter::ConflictTable;
use concordat::builder::airport;
use concordat::{Command, CommandResult, EntityFacade};
use tracing_subscriber::EnvFilter;

fn render(who: &EntityFacade, command: Command, result: &CommandResult) {
    match result {
        CommandResult::Applied {
            to, coordination, effect, ..
        } => println!(
            "  {} wants to {command}: approved -> {to:?}, {coordination} ({effect})",
            who.id()
        ),
        CommandResult::Declined {
            conflicting, held, ..
        } => println!(
            "  {} wants to {command}: declined, {conflicting} is {held}",
            who.id()
        ),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Airport Dispatch ===\n");

    let arbiter = airport(ConflictTable::shared_strip())?;
    let boeing = EntityFacade::new("boeing-747");
    let helicopter = EntityFacade::new("helicopter");

    for (who, command) in [
        (&boeing, Command::Land),
        (&helicopter, Command::TakeOff),
        (&boeing, Command::Clear),
        (&helicopter, Command::TakeOff),
    ] {
        let result = who.handle_command(&arbiter, command)?;
        render(who, command, &result);
    }

    println!("\nFinal registry:\n{}", arbiter.snapshot().to_json()?);
    println!("\n=== Demo Complete ===");
    Ok(())
}
