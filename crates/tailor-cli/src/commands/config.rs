//! `tailor config` - read and write configuration values.

use std::path::Path;

use serde_json::Value;
use toml::Table;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {}", display_value(&value)))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::active_path(global.config.as_ref());
            let parsed = parse_for_key(&config, &key, &value)?;
            write_config_value(&path, &key, parsed)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(global.config.as_ref());
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

/// Look up a dotted key such as `skip.extensions`. Only leaf values count.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let value = key
        .split('.')
        .try_fold(&root, |node, segment| node.get(segment))
        .ok_or_else(|| unknown_key(key))?;

    if value.is_object() {
        return Err(unknown_key(key));
    }
    Ok(value.clone())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Interpret `raw` according to the type the key currently has.
fn parse_for_key(config: &AppConfig, key: &str, raw: &str) -> CliResult<toml::Value> {
    match get_config_value(config, key)? {
        Value::Bool(_) => raw
            .trim()
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|e| CliError::InvalidInput {
                message: format!("'{key}' expects true or false, got '{raw}'"),
                source: Some(Box::new(e)),
            }),
        Value::Array(_) => Ok(toml::Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| toml::Value::String(item.to_owned()))
                .collect(),
        )),
        _ => Ok(toml::Value::String(raw.to_owned())),
    }
}

/// Set `key` in the file at `path`, creating the file and any missing
/// tables. Other keys in the file are preserved.
fn write_config_value(path: &Path, key: &str, value: toml::Value) -> CliResult<()> {
    let mut table = if path.exists() {
        let text = std::fs::read_to_string(path).with_cli_context(|| {
            format!("Failed to read config at '{}'", path.display())
        })?;
        text.parse::<Table>().map_err(|e| CliError::ConfigError {
            message: format!("Failed to parse '{}': {e}", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        Table::new()
    };

    set_dotted(&mut table, key, value)?;

    let text = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, text).with_cli_context(|| {
        format!("Failed to write config to '{}'", path.display())
    })
}

fn set_dotted(table: &mut Table, key: &str, value: toml::Value) -> CliResult<()> {
    let (sections, leaf) = match key.rsplit_once('.') {
        Some((sections, leaf)) => (sections.split('.').collect::<Vec<_>>(), leaf),
        None => (Vec::new(), key),
    };

    let mut node = table;
    for section in sections {
        let entry = node
            .entry(section)
            .or_insert_with(|| toml::Value::Table(Table::new()));
        node = entry.as_table_mut().ok_or_else(|| CliError::ConfigError {
            message: format!("'{section}' in the config file is not a table"),
            source: None,
        })?;
    }
    node.insert(leaf.to_owned(), value);
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
