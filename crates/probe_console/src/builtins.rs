//! Built-in console commands

use crate::command::{require_arg, Builtin, CommandError, CommandResult};
use crate::log_buffer::LogLevel;
use crate::Console;

/// Run a built-in against the console
pub(crate) fn run(console: &mut Console, builtin: Builtin, args: &[String]) -> CommandResult {
    match builtin {
        Builtin::Help => help(console, args),
        Builtin::Clear => {
            console.clear_log();
            Ok(())
        }
        Builtin::Echo => {
            console.log_info(args.join(" "));
            Ok(())
        }
        Builtin::Quit => {
            console.request_quit();
            console.log_info("Quit requested");
            Ok(())
        }
        Builtin::History => history(console),
        Builtin::Filter => filter(console, args),
    }
}

fn help(console: &mut Console, args: &[String]) -> CommandResult {
    if let Some(topic) = args.first() {
        let description = console
            .commands()
            .get(topic)
            .map(|binding| binding.description.clone())
            .ok_or_else(|| CommandError::InvalidArguments(format!("no command named '{}'", topic)))?;
        console.log_info(format!("{}: {}", topic, description));
        return Ok(());
    }

    let lines: Vec<String> = {
        let commands = console.commands();
        commands
            .names()
            .into_iter()
            .map(|name| {
                let description = commands.get(name).map(|b| b.description.as_str()).unwrap_or("");
                format!("  {:12} {}", name, description)
            })
            .collect()
    };

    console.log_info("Available commands:");
    for line in lines {
        console.log_info(line);
    }
    Ok(())
}

fn history(console: &mut Console) -> CommandResult {
    let lines: Vec<String> = console
        .history()
        .iter()
        .enumerate()
        .map(|(i, cmd)| format!("{:4}  {}", i + 1, cmd))
        .collect();

    for line in lines {
        console.log_info(line);
    }
    Ok(())
}

fn filter(console: &mut Console, args: &[String]) -> CommandResult {
    let name = require_arg(args, 0, "level")?;
    let level = LogLevel::from_name(name)
        .ok_or_else(|| CommandError::InvalidArguments(format!("unknown level '{}'", name)))?;

    let enabled = match args.get(1).map(String::as_str) {
        Some("on") => true,
        Some("off") => false,
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "expected 'on' or 'off', got '{}'",
                other
            )))
        }
        None => {
            let state = if console.is_log_level_enabled(level) { "on" } else { "off" };
            console.log_info(format!("{} is {}", level.name(), state));
            return Ok(());
        }
    };

    console.set_log_filter(level, enabled);
    console.log_info(format!("{} {}", level.name(), if enabled { "shown" } else { "hidden" }));
    Ok(())
}
