//! Order Routing with a Guard-Computed Destination
//!
//! This example demonstrates event-grouped declarations whose guard
//! derives the destination from entity data at call time.
//!
//! Key concepts:
//! - Grouped-by-event declarations
//! - Guards as destination functions (not vetoes)
//! - The same event landing in different states for different entities
//!
//! Run with: cargo run --example order_routing

use turnstile::builder::{EventArm, RuleDeclaration, RuleTableBuilder};
use turnstile::{state_enum, stateful};

state_enum! {
    enum OrderState {
        Draft,
        Submitted,
        Approved,
        NeedsReview,
    }
}

#[derive(Clone)]
struct Order {
    id: u32,
    total_cents: u64,
    state: OrderState,
}

stateful!(Order, state: OrderState);

fn main() {
    println!("=== Order Routing ===\n");

    // Orders above 1000.00 need a human; everything else sails through.
    let table = RuleTableBuilder::<Order>::new()
        .rule(OrderState::Draft, "submit", OrderState::Submitted)
        .declare(RuleDeclaration::guarded_event_group(
            "settle",
            |order: &Order| {
                if order.total_cents > 100_000 {
                    OrderState::NeedsReview
                } else {
                    OrderState::Approved
                }
            },
            vec![EventArm::source(OrderState::Submitted)],
        ))
        .build()
        .expect("order rules compile");

    let small = Order {
        id: 1,
        total_cents: 4_999,
        state: OrderState::Draft,
    };
    let large = Order {
        id: 2,
        total_cents: 250_000,
        state: OrderState::Draft,
    };

    for order in [small, large] {
        let submitted = table.transit(&order, "submit").expect("submit is allowed");
        let settled = table.transit(&submitted, "settle").expect("settle is allowed");
        println!(
            "Order #{} ({} cents): Draft -> Submitted -> {:?}",
            settled.id, settled.total_cents, settled.state
        );
    }

    println!("\nIntrospection never computes a guard:");
    for view in table.transitions() {
        println!("  {:?} --{}--> {:?}", view.from, view.event, view.to);
    }

    println!("\n=== Example Complete ===");
}
