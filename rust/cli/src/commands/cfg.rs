//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of each value
//! (default, environment, or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "rows": {
//!     "value": 4,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "rows": {
            "value": config.rows,
            "source": sources.rows,
        },
        "cols": {
            "value": config.cols,
            "source": sources.cols,
        },
        "resolve_delay_ms": {
            "value": config.resolve_delay_ms,
            "source": sources.resolve_delay_ms,
        },
        "message_delay_ms": {
            "value": config.message_delay_ms,
            "source": sources.message_delay_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cfg_displays_json_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_cfg_command(&mut out, &mut err);
        assert!(result.is_ok(), "cfg command should succeed");

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&output).expect("cfg output should be valid JSON");
        for key in ["seed", "rows", "cols", "resolve_delay_ms", "message_delay_ms"] {
            assert!(json[key].get("value").is_some(), "{} should have a value", key);
            assert!(json[key]["source"].is_string(), "{} should have a source", key);
        }

        assert!(output.contains('\n'), "output should be pretty-printed");
        assert!(String::from_utf8(err).unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_cfg_reports_env_source() {
        unsafe {
            std::env::set_var("GAMEMORY_MESSAGE_DELAY_MS", "250");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        unsafe {
            std::env::remove_var("GAMEMORY_MESSAGE_DELAY_MS");
        }
        result.unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["message_delay_ms"]["value"], 250);
        assert_eq!(json["message_delay_ms"]["source"], "env");
    }

    #[test]
    #[serial]
    fn test_cfg_handles_config_error() {
        unsafe {
            std::env::set_var("GAMEMORY_SEED", "not-a-number");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        unsafe {
            std::env::remove_var("GAMEMORY_SEED");
        }

        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(String::from_utf8(err).unwrap().contains("Invalid seed"));
    }
}
