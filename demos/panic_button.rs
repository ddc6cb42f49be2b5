//! Any-State Rules and Snapshot Expansion
//!
//! This example demonstrates that an any-state rule covers exactly the
//! states known at the point it is declared - not states introduced by
//! later declarations.
//!
//! Key concepts:
//! - Any-state declarations
//! - Snapshot-at-declaration-time expansion
//! - Reading the normalized rule list to see the expansion
//!
//! Run with: cargo run --example panic_button

use turnstile::builder::RuleTableBuilder;
use turnstile::{state_enum, stateful};

state_enum! {
    enum MachineState {
        Idle,
        Running,
        Paused,
        Halted,
    }
}

#[derive(Clone)]
struct Machine {
    state: MachineState,
}

stateful!(Machine, state: MachineState);

fn main() {
    println!("=== Panic Button ===\n");

    let table = RuleTableBuilder::<Machine>::new()
        .rule(MachineState::Idle, "start", MachineState::Running)
        .rule(MachineState::Running, "pause", MachineState::Paused)
        // At this point the table knows Idle, Running, and Paused.
        .any_state("panic", MachineState::Halted)
        // Halted enters the catalog here, after the snapshot was taken.
        .rule(MachineState::Halted, "service", MachineState::Idle)
        .build()
        .expect("machine rules compile");

    println!("Normalized rules:");
    for rule in table.rules() {
        println!("  {rule:?}");
    }

    let running = Machine {
        state: MachineState::Running,
    };
    let halted = table.transit(&running, "panic").expect("panic covers Running");
    println!("\nRunning --panic--> {:?}", halted.state);

    // Halted was introduced after the any-state rule: not covered.
    match table.transit(&halted, "panic") {
        Ok(_) => println!("Halted --panic--> unexpectedly allowed"),
        Err(rejection) => println!("Halted --panic--> rejected ({rejection})"),
    }

    println!("\n=== Example Complete ===");
}
