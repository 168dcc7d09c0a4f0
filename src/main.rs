// subwatch: Git submodule status monitor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Status | Watch | Pull | Push | Icons | Options
//! ```

use std::process::ExitCode;

use subwatch::cli::global::GlobalOptions;
use subwatch::cli::{self, Command};
use subwatch::cmd::action::run_action_command;
use subwatch::cmd::config::run_options_command;
use subwatch::cmd::icons::run_icons_command;
use subwatch::cmd::status::run_status_command;
use subwatch::cmd::watch::run_watch_command;
use subwatch::config::Config;
use subwatch::config::loader::ConfigLoader;
use subwatch::logging::{LogConfig, init_logging};
use subwatch::submodule::ActionKind;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "subwatch.toml";
const ENV_PREFIX: &str = "SUBWATCH";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .with_json(config.global.json_logs)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => Ok(()),
        Some(Command::Options) => {
            run_options_command(
                config,
                &build_config_loader(&cli.global).format_loaded_files(),
            );
            Ok(())
        }
        Some(Command::Status(args)) => run_status_command(args, config).await,
        Some(Command::Watch(args)) => run_watch_command(args, config).await,
        Some(Command::Pull(args)) => run_action_command(ActionKind::Pull, args, config).await,
        Some(Command::Push(args)) => run_action_command(ActionKind::Push, args, config).await,
        Some(Command::Icons(args)) => run_icons_command(args, config),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> subwatch::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for assignment in global.to_config_overrides() {
        loader = loader.set_assignment(&assignment)?;
    }
    loader.build()
}
