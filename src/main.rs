// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (files, env, --set) --> Logging --> Command Dispatch
//!   Release | Test | Integration | Coverage | Docs | Blacken | Vendorize | Ci
//!   Version | Options | Inis
//! ```

use std::process::ExitCode;

use chores_rs::cli::global::GlobalOptions;
use chores_rs::cli::{self, Command};
use chores_rs::cmd::blacken::run_blacken_command;
use chores_rs::cmd::ci::run_ci_command;
use chores_rs::cmd::config::{run_inis_command, run_options_command};
use chores_rs::cmd::docs::run_docs_command;
use chores_rs::cmd::release::run_release_command;
use chores_rs::cmd::testing::{
    run_coverage_command, run_integration_command, run_test_command,
};
use chores_rs::cmd::vendorize::run_vendorize_command;
use chores_rs::config::Config;
use chores_rs::config::loader::ConfigLoader;
use chores_rs::config::types::GlobalConfig;
use chores_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Config file picked up from the working directory.
const DEFAULT_INI: &str = "chores.toml";

/// Environment variable prefix, e.g. `CHORES_PACKAGING__SIGN`.
const ENV_PREFIX: &str = "CHORES";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &loaded_files).await
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_json_file(global.log_json)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, loaded_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(loaded_files);
            Ok(())
        }
        Some(Command::Release(args)) => run_release_command(args, config).await,
        Some(Command::Test(args)) => run_test_command(args, config).await,
        Some(Command::Integration(args)) => run_integration_command(args, config).await,
        Some(Command::Coverage(args)) => run_coverage_command(args, config).await,
        Some(Command::Docs(args)) => run_docs_command(args, config).await,
        Some(Command::Blacken(args)) => run_blacken_command(args, config).await,
        Some(Command::Vendorize(args)) => run_vendorize_command(args, config).await,
        Some(Command::Ci(args)) => run_ci_command(args, config).await,
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

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> chores_rs::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .set_all(global.to_config_overrides())
}
