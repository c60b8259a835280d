//! Counter Machine
//!
//! This example lowers a two-state counter machine and prints the
//! addressed intermediate form an instruction emitter would consume.
//!
//! Key concepts:
//! - Statements become gated increments producing signal registers
//! - Conditions are flattened into three-address computes
//! - Symbolic state ids are packed after explicit numeric ones
//! - Structural problems can be collected all at once with `verify::check`
//!
//! Run with: cargo run --example counter_machine

use fsm_ir::builder::{MachineBuilder, StateBuilder};
use fsm_ir::core::{Expr, Operator};
use fsm_ir::interchange::to_json_pretty;
use fsm_ir::verify::check;
use fsm_ir::lower;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Counter Machine Example ===\n");

    // "start" counts X up and leaves once X is a multiple of 3
    let machine = MachineBuilder::<()>::new()
        .state(
            StateBuilder::new()
                .id("start")
                .increment("X", 1)
                .goto_if(Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0), 100)
                .goto("start"),
        )?
        .state(StateBuilder::new().id(100).increment("Y", 1).goto("start"))?
        .build()?;

    println!("Structural check passed: {}", check(&machine).is_success());

    let ir = lower(&machine)?;
    for state in &ir.states {
        let starts: Vec<u32> = state.blocks.iter().map(|b| b.start).collect();
        println!("State at {:>3}: blocks start at {:?}", state.address, starts);
    }

    println!("\nIntermediate form:\n{}", to_json_pretty(&ir)?);

    println!("\n=== Example Complete ===");
    Ok(())
}
