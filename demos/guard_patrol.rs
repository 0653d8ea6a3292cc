//! Guard Patrol
//!
//! This example drives a game guard through a scripted encounter.
//!
//! Key concepts:
//! - A shared entity handle passed to every state behavior
//! - A GLOBAL overlay that takes damage and can redirect any state
//! - RETURN to resume chasing after reloading
//! - State changes reported through `tracing`
//!
//! Run with: RUST_LOG=info cargo run --example guard_patrol

use std::sync::{Arc, Mutex};
use ticksm::{MachineBuilder, StateBehavior, StateName, TransitionName};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Guard {
    health: i32,
    ammo: u32,
    player_distance: u32,
    incoming_damage: i32,
}

type Shared = Arc<Mutex<Guard>>;

struct Vitals {
    guard: Shared,
}

impl StateBehavior for Vitals {
    fn execute(&mut self, current: &StateName) {
        let mut guard = self.guard.lock().unwrap();
        guard.health -= guard.incoming_damage;
        guard.incoming_damage = 0;
        println!("  [{current}] health {}", guard.health);
    }
}

struct Patrol {
    guard: Shared,
}

impl StateBehavior for Patrol {
    fn enter(&mut self) {
        println!("  guard starts patrolling");
    }

    fn execute(&mut self, _current: &StateName) {
        let mut guard = self.guard.lock().unwrap();
        guard.player_distance = guard.player_distance.saturating_sub(3);
    }
}

struct Chase {
    guard: Shared,
}

impl StateBehavior for Chase {
    fn enter(&mut self) {
        println!("  guard spots the player");
    }

    fn execute(&mut self, _current: &StateName) {
        let mut guard = self.guard.lock().unwrap();
        guard.ammo = guard.ammo.saturating_sub(1);
        guard.incoming_damage = 15;
    }

    fn exit(&mut self, reason: &TransitionName) {
        println!("  guard stops chasing: {reason}");
    }
}

struct Reload {
    guard: Shared,
}

impl StateBehavior for Reload {
    fn execute(&mut self, _current: &StateName) {
        self.guard.lock().unwrap().ammo = 3;
    }
}

struct Dead;

impl StateBehavior for Dead {
    fn enter(&mut self) {
        println!("  guard is down");
    }

    fn execute(&mut self, _current: &StateName) {}
}

fn watch<F>(guard: &Shared, test: F) -> impl Fn() -> bool + Send + Sync + 'static
where
    F: Fn(&Guard) -> bool + Send + Sync + 'static,
{
    let guard = Arc::clone(guard);
    move || test(&guard.lock().unwrap())
}

fn main() -> Result<(), ticksm::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Guard Patrol State Machine ===\n");

    let guard: Shared = Arc::new(Mutex::new(Guard {
        health: 50,
        ammo: 2,
        player_distance: 10,
        incoming_damage: 0,
    }));

    let mut machine = MachineBuilder::new()
        .label("guard-1")
        .add_state("global", |guard| Vitals { guard }, ["die"])
        .add_state("patrol", |guard| Patrol { guard }, ["spot"])
        .add_state("chase", |guard| Chase { guard }, ["empty"])
        .add_state("reload", |guard| Reload { guard }, ["loaded"])
        .add_state("dead", |_| Dead, Vec::<&str>::new())
        .add_transition("die", watch(&guard, |g| g.health <= 0), "dead")
        .add_transition("spot", watch(&guard, |g| g.player_distance < 5), "chase")
        .add_transition("empty", watch(&guard, |g| g.ammo == 0), "reload")
        .add_transition("loaded", watch(&guard, |g| g.ammo > 0), "return")
        .set_start("patrol")
        .set_end(["dead"])
        .start(Arc::clone(&guard))?;

    while !machine.is_finished() && machine.ticks() < 20 {
        println!("Tick {}: {}", machine.ticks() + 1, machine.current_state_name());
        let outcome = machine.tick()?;
        for change in &outcome.changes {
            println!("  {change}");
        }
    }

    println!(
        "\nFinished in state {} after {} ticks",
        machine.current_state_name(),
        machine.ticks()
    );
    println!("\n=== Example Complete ===");
    Ok(())
}
