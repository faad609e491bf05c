//! Kinds command: describes every transaction kind from the registry.

use tx_core::{KindSpec, REGISTRY};

/// Renders the help entry of one kind.
pub fn describe(spec: &KindSpec) -> String {
    let mut out = format!("{:>3}  {}", spec.code, spec.command);
    for field in spec.fields {
        out.push_str(&format!(" <{}>", field.name));
    }
    if !spec.aliases.is_empty() {
        out.push_str(&format!("  (alias: {})", spec.aliases.join(", ")));
    }
    out.push_str(&format!("\n       {}", spec.about));
    for field in spec.fields {
        out.push_str(&format!("\n       <{}> {}: {}", field.name, field.ty, field.about));
    }
    out
}

/// Runs the kinds command.
pub fn run() -> String {
    let mut out = String::from("Transaction Types:\n");
    for spec in REGISTRY {
        out.push_str(&describe(spec));
        out.push('\n');
    }
    out
}
