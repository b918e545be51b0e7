//! kickstart-tui - Main entry point
//!
//! Interactive profile menu by default; `generate`, `validate`, `profiles`
//! and `resolve` run headless.

use anyhow::{Context, Result};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, error, info, warn};

use kickstart_tui::app::App;
use kickstart_tui::cli::{Cli, Commands};
use kickstart_tui::config_file::{AnswerFile, read_password_file};
use kickstart_tui::hardware::DiskInventory;
use kickstart_tui::kickstart;
use kickstart_tui::logging::{self, LogTarget, TUI_LOG_FILE};
use kickstart_tui::logic::resolver;
use kickstart_tui::profiles::{Profile, ProfileSummary};
use kickstart_tui::sanity;
use kickstart_tui::signals::ShutdownFlag;

fn main() {
    let cli = Cli::parse_args();

    let interactive = matches!(cli.command, None | Some(Commands::Menu));
    let target = if interactive {
        LogTarget::File(Path::new(TUI_LOG_FILE))
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init_logging(cli.verbose, target) {
        eprintln!("Warning: {:#}", e);
    }
    info!("kickstart-tui {} starting up", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None | Some(Commands::Menu) => {
            info!("Launching profile menu");
            run_menu(&cli.output_dir)
        }
        Some(Commands::Generate {
            config,
            password_file,
            dry_run,
        }) => generate(&config, &password_file, &cli.output_dir, dry_run),
        Some(Commands::Validate { config }) => validate(&config),
        Some(Commands::Profiles { json }) => list_profiles(json),
        Some(Commands::Resolve { profile, disk_gb }) => show_resolution(&profile, disk_gb),
    }
}

/// Run the TUI menu
fn run_menu(output_dir: &Path) -> Result<()> {
    let sanity = sanity::verify_environment();
    if !sanity.is_ok() {
        sanity::print_error_and_exit(&sanity);
    }

    let shutdown = ShutdownFlag::install().context("Failed to install signal handlers")?;
    let mut app = App::new(output_dir.to_path_buf(), shutdown);

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode().context("Failed to enable raw mode")?;
    if let Err(e) = crossterm::execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(Into::into)
        .and_then(|mut terminal| app.run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        stdout(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    );

    result.context("Profile menu failed")?;

    match app.written() {
        Some(paths) => {
            println!("✓ Kickstart files written:");
            for path in paths {
                println!("  {}", path.display());
            }
        }
        None => println!("No kickstart files written."),
    }
    Ok(())
}

/// Headless generation from an answer file
fn generate(config: &Path, password_file: &Path, output_dir: &Path, dry_run: bool) -> Result<()> {
    info!("Loading answer file {:?}", config);
    let answers = AnswerFile::load_from_file(config)?;
    answers.validate()?;
    let builder = answers.to_builder()?;

    let resolution = resolver::resolve(builder.profile, builder.disk_total_gb());
    for warning in &resolution.warnings {
        warn!("{}", warning.to_string().replace("\n\n", " "));
    }

    let password = read_password_file(password_file)?;
    let request = builder
        .build(&password)
        .context("Failed to build install request")?;
    let artifacts = kickstart::emit(&request);

    if dry_run {
        info!("Dry run: printing {} artifact(s)", artifacts.len());
        for (artifact, content) in artifacts.iter() {
            println!("==> {} <==", artifact.file_name());
            print!("{}", content);
        }
        return Ok(());
    }

    let written = artifacts
        .write_all(output_dir)
        .with_context(|| format!("Failed to write artifacts to {:?}", output_dir))?;
    println!("✓ Kickstart files written:");
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}

/// Validate an answer file without generating anything
fn validate(config: &Path) -> Result<()> {
    info!("Validating answer file: {:?}", config);
    let answers = AnswerFile::load_from_file(config)?;
    answers
        .validate()
        .context("Answer file validation failed")?;
    println!(
        "✓ Answer file is valid: {} ({})",
        config.display(),
        answers.profile
    );
    Ok(())
}

fn list_profiles(json: bool) -> Result<()> {
    let summaries: Vec<ProfileSummary> = Profile::iter()
        .map(|p| ProfileSummary::from(p.spec()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{:<22} {:<30} {:>8}  NOTES", "ID", "NAME", "MIN DISK");
    for s in &summaries {
        let mut notes = Vec::new();
        if !s.hardening {
            notes.push("hardening deferred");
        }
        if s.banner {
            notes.push("classification banner");
        }
        if s.network == "static" {
            notes.push("static network");
        }
        println!(
            "{:<22} {:<30} {:>6}Gb  {}",
            s.id.to_string(),
            s.name,
            s.min_disk_gb,
            notes.join(", ")
        );
    }
    Ok(())
}

fn show_resolution(profile: &str, disk_gb: Option<u64>) -> Result<()> {
    let total = match disk_gb {
        Some(gb) => gb,
        None => DiskInventory::detect().total_gb(),
    };
    let resolution = resolver::resolve_named(profile, total)?;

    println!("Profile:   {}", resolution.profile.name());
    println!("Disk:      {}Gb", total);
    println!("Partition: {}", resolution.plan);
    println!();
    println!("Packages:");
    for line in resolution.packages.render().lines() {
        println!("  {}", line);
    }
    for (title, lines) in [
        ("Pre-install (nochroot):", &resolution.pre_install),
        ("Post-install:", &resolution.post_install),
    ] {
        println!();
        println!("{}", title);
        if lines.is_empty() {
            println!("  (none)");
        }
        for line in lines {
            println!("  {}", line);
        }
    }
    if !resolution.warnings.is_empty() {
        println!();
        for warning in &resolution.warnings {
            println!("⚠ {}", warning);
        }
    }
    Ok(())
}
