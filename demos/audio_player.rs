//! Audio Player
//!
//! This demo drives two players that share a single audio output.
//!
//! Key concepts:
//! - Injectable sensors for "is playing" and double activation
//! - Side effects reported as values, then performed by the shell
//! - A second player is declined while the first holds the output
//!
//! Run with: cargo run --example audio_player

use concordat::builder::RegistryBuilder;
use concordat::effects::{dispatch, Console};
use concordat::{Command, DeviceState, EntityFacade, Guard, Sensors};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct Speaker {
    name: &'static str,
}

impl Console for Speaker {
    fn start_playback(&self) -> Result<(), String> {
        println!("  [{}] Started new song", self.name);
        Ok(())
    }

    fn stop_playback(&self) -> Result<(), String> {
        println!("  [{}] Stop music", self.name);
        Ok(())
    }

    fn next_track(&self) -> Result<(), String> {
        println!("  [{}] Changed to the next song", self.name);
        Ok(())
    }

    fn previous_track(&self) -> Result<(), String> {
        println!("  [{}] Changed to the previous song", self.name);
        Ok(())
    }

    fn fast_forward(&self, secs: u32) -> Result<(), String> {
        println!("  [{}] Fast forward {secs}s", self.name);
        Ok(())
    }

    fn rewind(&self, secs: u32) -> Result<(), String> {
        println!("  [{}] Rewind {secs}s", self.name);
        Ok(())
    }

    fn announce(&self, message: &str) -> Result<(), String> {
        println!("  [{}] {message}", self.name);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Audio Player ===\n");

    let arbiter = RegistryBuilder::new()
        .device("walkman", DeviceState::Locked)
        .device("radio", DeviceState::Ready)
        .build_arbiter()?;

    let double_click = Arc::new(AtomicBool::new(true));
    let probe = Arc::clone(&double_click);
    let walkman = EntityFacade::new("walkman").with_sensors(
        Sensors::default()
            .with_playing(Guard::constant(false))
            .with_double_activation(Guard::new(move || probe.load(Ordering::SeqCst))),
    );
    let radio = EntityFacade::new("radio");

    let speaker = Speaker { name: "walkman" };
    let antenna = Speaker { name: "radio" };

    for command in [Command::Lock, Command::Play, Command::Next] {
        let result = dispatch(&walkman, &arbiter, command, &speaker).await?;
        println!("walkman {command}: now {:?}", result.local_state());
    }

    double_click.store(false, Ordering::SeqCst);
    let result = dispatch(&walkman, &arbiter, Command::Next, &speaker).await?;
    println!("walkman next (single click): {}", result.effect());

    let result = dispatch(&radio, &arbiter, Command::Play, &antenna).await?;
    println!("radio play declined: {}", result.is_declined());

    dispatch(&walkman, &arbiter, Command::Play, &speaker).await?;
    let result = dispatch(&radio, &arbiter, Command::Play, &antenna).await?;
    println!("radio play after walkman stopped: {:?}", result.local_state());

    println!("\n=== Demo Complete ===");
    Ok(())
}
