//! Door State Machine
//!
//! This example demonstrates the basic declare-then-transit workflow.
//!
//! Key concepts:
//! - Simple rule declarations
//! - First-match resolution
//! - Not-allowed as a normal, branchable outcome
//! - Introspection catalogs
//!
//! Run with: cargo run --example door

use turnstile::builder::RuleTableBuilder;
use turnstile::{state_enum, stateful};

state_enum! {
    enum DoorState {
        Locked,
        Unlocked,
        Opened,
    }
}

#[derive(Clone)]
struct Door {
    state: DoorState,
}

stateful!(Door, state: DoorState);

fn main() {
    println!("=== Door State Machine ===\n");

    let table = RuleTableBuilder::<Door>::new()
        .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
        .rule(DoorState::Unlocked, "lock", DoorState::Locked)
        .rule(DoorState::Unlocked, "open", DoorState::Opened)
        .build()
        .expect("door rules compile");

    println!("Declared states: {:?}", table.states());
    println!("Declared events: {:?}\n", table.events());

    let door = Door {
        state: DoorState::Locked,
    };
    println!("Initial state: {:?}", door.state);

    let door = table.transit(&door, "unlock").expect("unlock is allowed");
    println!("After 'unlock': {:?}", door.state);

    match table.transit(&door, "close") {
        Ok(_) => println!("'close' unexpectedly allowed"),
        Err(rejection) => println!("After 'close': rejected ({rejection})"),
    }

    let door = table.transit(&door, "open").expect("open is allowed");
    println!("After 'open':   {:?}\n", door.state);

    println!("Catalog document:");
    println!(
        "{}",
        serde_json::to_string_pretty(&table.to_json()).expect("catalog serializes")
    );

    println!("\n=== Example Complete ===");
}
