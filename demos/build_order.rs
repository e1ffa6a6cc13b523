//! Example: ordering build targets and reporting dependency cycles.
//!
//! Run with `RUST_LOG=toposort=trace` to see the traversal events.

use toposort::Sorter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Build Order Examples ===\n");

    example_acyclic();
    example_cyclic();
}

fn example_acyclic() {
    println!("1. Acyclic build graph:");

    let mut sorter = Sorter::new();
    sorter.add_edge("app", "net");
    sorter.add_edge("app", "ui");
    sorter.add_edge("ui", "render");
    sorter.add_edge("net", "core");
    sorter.add_edge("render", "core");
    sorter.add_node("docs");

    let roots: Vec<_> = sorter.roots();
    println!("   Can start immediately: {:?}", roots);

    match sorter.sort().into_result() {
        Ok(order) => {
            for (i, target) in order.iter().enumerate() {
                println!("   {}. {}", i + 1, target);
            }
        }
        Err(err) => println!("   ERROR: {err}"),
    }
    println!();
}

fn example_cyclic() {
    println!("2. Build graph with cycles:");

    let sorter: Sorter<_> = [
        ("app", "net"),
        ("net", "tls"),
        ("tls", "net"),
        ("app", "codegen"),
        ("codegen", "codegen"),
    ]
    .into_iter()
    .collect();

    let sorted = sorter.sort();
    println!("   Best-effort order: {:?}", sorted.order);
    println!("   Cycles: {}", sorted.dump_cycles(|n| n.to_string()));
    println!();
}
