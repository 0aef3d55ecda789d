//! Console commands that drive the other debug services

use probe_console::{require_arg, CommandError, CommandResult, Console};
use probe_profiler::{DisplayMode, SharedProfiler};

use crate::SharedWireframe;

/// Register `profiler`, `fps` and `wireframe` on `console`
pub fn register_debug_commands(
    console: &mut Console,
    profiler: &SharedProfiler,
    wireframe: &SharedWireframe,
) {
    let handle = profiler.clone();
    console.register_command(
        "profiler",
        "profiler <on|off|clear|mode <name>|reset <name>|export <csv|json> <path>>",
        move |console, args| profiler_command(&handle, console, args),
    );

    let handle = profiler.clone();
    console.register_command("fps", "Show average FPS", move |console, _args| {
        let line = {
            let profiler = handle.lock();
            format!(
                "FPS: {:.1} over {} frames",
                profiler.average_fps(),
                profiler.frame_count()
            )
        };
        console.log_info(line);
        Ok(())
    });

    let handle = wireframe.clone();
    console.register_command(
        "wireframe",
        "wireframe <on|off|clear>",
        move |console, args| {
            let action = require_arg(args, 0, "action")?;
            let mut wireframe = handle.lock();
            match action {
                "on" => wireframe.set_enabled(true),
                "off" => wireframe.set_enabled(false),
                "clear" => wireframe.clear(),
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown action '{}'",
                        other
                    )))
                }
            }
            drop(wireframe);
            console.log_info(format!("Wireframe: {}", action));
            Ok(())
        },
    );
}

fn profiler_command(profiler: &SharedProfiler, console: &mut Console, args: &[String]) -> CommandResult {
    let action = require_arg(args, 0, "action")?;

    match action {
        "on" | "off" => {
            profiler.lock().set_enabled(action == "on");
            console.log_info(format!("Profiler {}", if action == "on" { "enabled" } else { "disabled" }));
        }
        "clear" => {
            profiler.lock().clear();
            console.log_info("Profiler data cleared");
        }
        "mode" => {
            let name = require_arg(args, 1, "mode")?;
            let mode = DisplayMode::from_name(name)
                .ok_or_else(|| CommandError::InvalidArguments(format!("unknown display mode '{}'", name)))?;
            profiler.lock().set_display_mode(mode);
            console.log_info(format!("Profiler display mode: {}", mode.name()));
        }
        "reset" => {
            let name = require_arg(args, 1, "name")?;
            if profiler.lock().reset_profile(name) {
                console.log_info(format!("Reset profile '{}'", name));
            } else {
                console.log_warning(format!("No profile named '{}'", name));
            }
        }
        "export" => {
            let format = require_arg(args, 1, "format")?;
            let path = require_arg(args, 2, "path")?;
            let result = match format {
                "csv" => profiler.lock().export_csv(path),
                "json" => profiler.lock().export_json(path),
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown export format '{}'",
                        other
                    )))
                }
            };
            result.map_err(|e| CommandError::ExecutionFailed(e.to_string()))?;
            console.log_info(format!("Profile exported to {}", path));
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown action '{}'",
                other
            )))
        }
    }

    Ok(())
}
