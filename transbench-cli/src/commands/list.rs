// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `transbench list` command - List backends from configuration.

use super::load_config;

pub fn execute(config_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    if config.backends.is_empty() {
        println!("No backends defined in configuration.");
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                           CONFIGURED BACKENDS                                ║");
    println!("╠═══════════════════╦═══════════════════╦══════════════════════════════════════╣");
    println!("║ Name              ║ Locator           ║ Arguments                            ║");
    println!("╠═══════════════════╬═══════════════════╬══════════════════════════════════════╣");

    for backend in &config.backends {
        let mut args = backend.args.join(" ");
        if backend.options.is_some() {
            args.push_str(&format!(" {} <options>", backend.options_flag));
        }

        println!(
            "║ {:<17} ║ {:<17} ║ {:<36} ║",
            truncate(backend.name.as_str(), 17),
            truncate(backend.locator.as_str(), 17),
            truncate(args.trim(), 36)
        );
    }

    println!("╚═══════════════════╩═══════════════════╩══════════════════════════════════════╝");
    println!();
    println!(
        "Suite: {} | Total: {} backend(s)",
        config.suite,
        config.backends.len()
    );

    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let kept: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("swc", 17), "swc");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abcdef", 4).chars().count(), 4);
    }
}
