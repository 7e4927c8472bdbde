//! List patterns command implementation.

use archtest_patterns::catalog;

/// Runs the list-patterns command.
pub fn run() {
    println!("Available patterns:\n");
    println!("{:<20} {:<32} Parameters", "Kind", "Name");
    println!("{}", "-".repeat(100));

    for info in catalog() {
        println!(
            "{:<20} {:<32} {}",
            info.kind.key(),
            info.name,
            info.parameters.join(", ")
        );
        println!("{:<20} {}", "", info.summary);
    }

    println!("\nParameters ending in `?` are optional. Declare patterns in archtest.toml, e.g.:");
    println!("  [[patterns]]");
    println!("  kind = \"layered\"");
    println!("  layers = [\"domain\", \"application\", \"presentation\"]");
}
