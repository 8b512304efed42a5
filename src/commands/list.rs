use anyhow::Result;

use crate::discovery;

/// Print a human-readable summary of the plugins a generate run would see.
pub fn list_command() -> Result<()> {
    let root = std::env::current_dir()?;
    let records = discovery::discover_plugins(&root)?;

    println!("Plugins:");
    if records.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for record in &records {
        let mut flags = Vec::new();
        if !record.install {
            flags.push("meta".to_string());
        }
        if record.assets {
            flags.push("assets".to_string());
        }
        if record.i18n {
            flags.push("i18n".to_string());
        }
        if !record.deps.is_empty() {
            flags.push(format!("deps: {}", record.deps.join(", ")));
        }

        if flags.is_empty() {
            println!("  - {}", record.plugin);
        } else {
            println!("  - {} ({})", record.plugin, flags.join("; "));
        }
    }

    Ok(())
}
