use crate::cli::args::{Args, Command, ConfigCommand, PowerStateArg};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::connector::Connector;
use crate::core::protocol::effect_index;
use crate::core::session::{CommandSession, LedState};
use crate::domain::config::{DeviceEntry, LedComConfig};
use crate::domain::error::{LedComError, LedComResult};
use crate::infrastructure::bluetooth::BlueZAdapter;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::state::StateStore;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Execute a parsed command line
pub async fn execute_command(args: Args) -> LedComResult<()> {
    let writer = ConsoleWriter::new(args.output.clone(), args.quiet);
    let manager = ConfigManager::new()?;
    let config = match &args.config {
        Some(path) => manager.load_config_from_path(Path::new(path))?,
        None => manager.load_config()?,
    };

    match &args.command {
        Command::Devices => {
            let connector = build_connector(&config).await?;
            let peripherals = connector.list_bonded_peripherals().await?;

            if peripherals.is_empty() {
                writer.write_message("No bonded devices found")?;
            } else {
                writer.write_peripherals(&peripherals)?;
            }
            Ok(())
        }
        Command::Effects => {
            writer.write_effects()?;
            Ok(())
        }
        Command::Color { r, g, b } => {
            let (mut session, store) = open_session(&args, &config).await?;
            let sent = session.set_color(*r, *g, *b).await;
            finish_session(session, store.as_ref(), sent, &writer)
        }
        Command::Brightness { value } => {
            let (mut session, store) = open_session(&args, &config).await?;
            let sent = session.set_brightness(*value).await;
            finish_session(session, store.as_ref(), sent, &writer)
        }
        Command::Effect { effect } => {
            let index = effect_index(effect).ok_or_else(|| {
                LedComError::InvalidInput(format!(
                    "unknown effect '{}' (see `ledcom effects`)",
                    effect
                ))
            })?;

            let (mut session, store) = open_session(&args, &config).await?;
            let sent = session.select_effect(index).await;
            finish_session(session, store.as_ref(), sent, &writer)
        }
        Command::Power { state } => {
            let (mut session, store) = open_session(&args, &config).await?;
            let sent = match state {
                Some(PowerStateArg::On) => session.set_power(true).await,
                Some(PowerStateArg::Off) => session.set_power(false).await,
                None => session.toggle_power().await,
            };
            finish_session(session, store.as_ref(), sent, &writer)
        }
        Command::Sync => {
            let (session, store) = open_session(&args, &config).await?;
            let sent = session.is_connected();
            writer.write_state(session.state())?;
            finish_session(session, store.as_ref(), sent, &writer)
        }
        Command::Raw { command } => {
            let (mut session, store) = open_session(&args, &config).await?;
            let sent = session.send_command(command).await;
            finish_session(session, store.as_ref(), sent, &writer)
        }
        Command::Config(config_args) => {
            execute_config_command(&config_args.command, &manager, config, &writer)
        }
        Command::Version => {
            writer.write_message(&format!("ledcom {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

/// Resolve the target controller address from the command line and the
/// configuration: explicit address, then alias lookup, then a sole
/// configured device.
fn resolve_address(args: &Args, config: &LedComConfig) -> LedComResult<String> {
    if let Some(address) = &args.address {
        return Ok(address.clone());
    }

    if let Some(name) = &args.device {
        return config
            .find_device(name)
            .map(|entry| entry.address.clone())
            .ok_or_else(|| {
                LedComError::InvalidInput(format!("no configured device named '{}'", name))
            });
    }

    match config.devices.as_slice() {
        [only] => Ok(only.address.clone()),
        [] => Err(LedComError::InvalidInput(
            "no target: pass --address, --device or configure a device".to_string(),
        )),
        _ => Err(LedComError::InvalidInput(
            "multiple devices configured: pass --address or --device".to_string(),
        )),
    }
}

async fn build_connector(config: &LedComConfig) -> LedComResult<Connector> {
    let adapter = BlueZAdapter::new().await?;
    Ok(Connector::new(Arc::new(adapter))
        .with_connect_timeout(Duration::from_millis(config.global.connect_timeout_ms)))
}

/// Connect a session to the resolved target, resuming persisted shadow
/// state when enabled. The connect itself replays the full state.
async fn open_session(
    args: &Args,
    config: &LedComConfig,
) -> LedComResult<(CommandSession, Option<StateStore>)> {
    let address = resolve_address(args, config)?;
    let connector = build_connector(config).await?;

    let (store, state) = if config.global.state_file_enabled {
        let store = StateStore::new()?;
        let state = store.load();
        (Some(store), state)
    } else {
        (None, LedState::default())
    };

    let mut session = CommandSession::with_state(connector, state);
    session.connect(&address).await?;
    debug!("Session established with {}", address);

    Ok((session, store))
}

/// Persist the shadow state and report the send outcome. A command that
/// could not be sent because the link dropped is an offline condition,
/// not a failure of the invocation.
fn finish_session(
    session: CommandSession,
    store: Option<&StateStore>,
    sent: bool,
    writer: &ConsoleWriter,
) -> LedComResult<()> {
    let state = session.into_state();
    if let Some(store) = store {
        store.save(&state)?;
    }

    if sent {
        writer.write_message("OK")?;
    } else {
        writer.write_error("Command not sent: connection lost, reconnect to retry")?;
    }
    Ok(())
}

fn execute_config_command(
    command: &ConfigCommand,
    manager: &ConfigManager,
    mut config: LedComConfig,
    writer: &ConsoleWriter,
) -> LedComResult<()> {
    match command {
        ConfigCommand::Show => {
            writer.write_config(&config)?;
            Ok(())
        }
        ConfigCommand::Init => {
            let current_dir = std::env::current_dir().map_err(|e| LedComError::Config {
                message: format!("Failed to determine current directory: {}", e),
            })?;
            manager.init_project_config(&current_dir)?;
            writer.write_message("Project configuration created in .ledcom/config.toml")?;
            Ok(())
        }
        ConfigCommand::Devices => {
            if config.devices.is_empty() {
                writer.write_message("No devices configured")?;
            } else {
                writer.write_device_entries(&config.devices)?;
            }
            Ok(())
        }
        ConfigCommand::AddDevice {
            name,
            address,
            description,
        } => {
            if config.find_device(name).is_some() {
                return Err(LedComError::InvalidInput(format!(
                    "device '{}' already configured",
                    name
                )));
            }

            config.devices.push(DeviceEntry {
                name: name.clone(),
                address: address.clone(),
                description: description.clone().unwrap_or_default(),
            });
            manager.save_config(&config)?;
            writer.write_message(&format!("Added device '{}'", name))?;
            Ok(())
        }
    }
}
