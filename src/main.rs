//! shellkit - interactive shell helpers
//!
//! - `pomo`: a work/rest cycle with a stand-up reminder halfway through work
//! - `alias add`: append an alias to the alias file and reload the shell
//! - `jump`: pick a local repository with a fuzzy selector and cd into it

use anyhow::Result;
use clap::{CommandFactory, Parser};

use shellkit::alias::{AliasError, AliasRegistrar};
use shellkit::cli::{AliasCommand, Cli, Commands, Display, PomoArgs};
use shellkit::config::{self, ConfigError, ShellkitConfig};
use shellkit::jump::{JumpError, JumpOutcome, RepositoryJumper};
use shellkit::pomo::{CycleController, CycleMessages};
use shellkit::shell::{self, init_script, ShellContext, ShellEffect};
use shellkit::tools::{
    CommandLister, CommandNotifier, CountdownBackendImpl, FzfSelector, ToolError,
};
use shellkit::types::CycleParams;

/// Exit status for cancellations and user errors.
const EXIT_FAILURE: i32 = 1;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    match execute(cli).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            Display::show_error(&e.to_string());
            if let Some(suggestion) = suggestion_for(&e) {
                Display::show_suggestion(suggestion);
            }
            std::process::exit(EXIT_FAILURE);
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command and returns the process exit status.
async fn execute(cli: Cli) -> Result<i32> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Pomo(args)) => {
            let config = ShellkitConfig::load()?;
            run_pomo(&config, &args).await
        }
        Some(Commands::Alias { command }) => {
            let config = ShellkitConfig::load()?;
            let registrar = AliasRegistrar::from_config(&config);
            match command {
                AliasCommand::Add { args } => {
                    let mut context = ShellContext::from_env()?;
                    match registrar.register_args(&args, &mut context) {
                        Ok(registration) => {
                            Display::show_alias_added(&registration);
                            // The alias is already written; a failed reload is not fatal.
                            if let Err(e) = apply_effects(&context) {
                                Display::show_effects_warning(&e.to_string());
                                print_effects(&context);
                            }
                            Ok(0)
                        }
                        Err(e) if e.is_usage() => {
                            Display::show_error(&e.to_string());
                            Ok(EXIT_FAILURE)
                        }
                        Err(e) => Err(e.into()),
                    }
                }
                AliasCommand::List => {
                    Display::show_aliases(&registrar.list()?);
                    Ok(0)
                }
            }
        }
        Some(Commands::Jump { query }) => {
            let config = ShellkitConfig::load()?;
            run_jump(&config, query).await
        }
        Some(Commands::Init { shell }) => {
            print!("{}", init_script(shell, env!("CARGO_PKG_NAME")));
            Ok(0)
        }
        Some(Commands::Config) => {
            let path = config::config_path()?;
            let config = ShellkitConfig::load_from(&path)?;
            Display::show_config(&path, path.exists(), &config.to_pretty_json()?);
            Ok(0)
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(0)
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
            Ok(0)
        }
    }
}

/// Runs one work/rest cycle with tools chosen from configuration.
async fn run_pomo(config: &ShellkitConfig, args: &PomoArgs) -> Result<i32> {
    let defaults = config.pomo.default_params();
    let params = CycleParams::new(
        args.work.unwrap_or(defaults.work_minutes),
        args.rest.unwrap_or(defaults.rest_minutes),
    );

    let controller = CycleController::new(
        CountdownBackendImpl::from_config(&config.countdown),
        CommandNotifier::from_config(&config.notifier),
        CycleMessages::from_config(&config.pomo),
    );

    Display::show_cycle_start(&params);
    let outcome = controller.run_cycle(params).await?;
    Display::show_cycle_outcome(outcome);

    Ok(if outcome.is_completed() { 0 } else { EXIT_FAILURE })
}

/// Picks a repository and hands the directory change to the shell.
async fn run_jump(config: &ShellkitConfig, query: Option<String>) -> Result<i32> {
    let jumper = RepositoryJumper::new(
        CommandLister::from_config(&config.repositories),
        FzfSelector::new(&config.selector.command),
        &config.selector.prompt,
    );
    let mut context = ShellContext::from_env()?;

    match jumper.jump(query, &mut context).await {
        Ok(JumpOutcome::Changed(_)) => {
            apply_effects(&context)?;
            Ok(0)
        }
        Ok(JumpOutcome::NoSelection) => {
            Display::show_no_selection();
            Ok(0)
        }
        Err(e @ JumpError::NoRepositories) => {
            Display::show_no_repositories(e.suggestion());
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Hands recorded effects back to the calling shell.
///
/// With the shell wrapper installed they go to the effects file; otherwise a
/// directory change is printed on stdout and a reload becomes a hint.
fn apply_effects(context: &ShellContext) -> Result<()> {
    if let Some(path) = shell::effects_file_from_env() {
        shell::write_effects_file(&path, context.effects())?;
        return Ok(());
    }

    print_effects(context);
    Ok(())
}

/// Prints effects for a shell without the wrapper functions.
fn print_effects(context: &ShellContext) {
    for effect in context.effects() {
        match effect {
            ShellEffect::ChangeDirectory(path) => println!("{}", path.display()),
            ShellEffect::Reload(rc_file) => Display::show_reload_hint(rc_file),
        }
    }
}

/// Looks up a hint for errors that carry one.
fn suggestion_for(error: &anyhow::Error) -> Option<&'static str> {
    if let Some(e) = error.downcast_ref::<ConfigError>() {
        return Some(e.suggestion());
    }
    if let Some(e) = error.downcast_ref::<AliasError>() {
        return Some(e.suggestion());
    }
    if let Some(e) = error.downcast_ref::<JumpError>() {
        return Some(e.suggestion());
    }
    error.downcast_ref::<ToolError>().map(ToolError::suggestion)
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
