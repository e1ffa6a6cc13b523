//! Example: sorting custom types through the closure and trait adapters.

use std::collections::HashMap;
use toposort::generic::{Sortable, sort_fn};

struct Workspace {
    crates: Vec<&'static str>,
    requires: HashMap<&'static str, Vec<&'static str>>,
}

impl Sortable for Workspace {
    type Id = &'static str;

    fn ids(&self) -> Vec<Self::Id> {
        self.crates.clone()
    }

    fn dependencies(&self, id: &Self::Id) -> Vec<Self::Id> {
        self.requires.get(id).cloned().unwrap_or_default()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Generic Sorting Examples ===\n");

    println!("1. Closure based:");
    let get_deps = |task: &&str| match *task {
        "deploy" => vec!["test", "build"],
        "test" => vec!["build"],
        "build" => vec!["compile"],
        _ => vec![],
    };
    let sorted = sort_fn(&["deploy", "test", "build", "compile"], get_deps);
    println!("   Execution order: {:?}\n", sorted.order);

    println!("2. Trait based:");
    let workspace = Workspace {
        crates: vec!["cli", "server", "proto", "util"],
        requires: HashMap::from([
            ("cli", vec!["proto", "util"]),
            ("server", vec!["proto"]),
            ("proto", vec!["util"]),
        ]),
    };
    println!("   Valid ordering: {}", workspace.has_valid_ordering());
    println!("   Build order: {:?}", workspace.sorted().order);
}
