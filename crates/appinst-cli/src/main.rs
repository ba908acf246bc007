//! appinst - install application menus and shortcuts from a JSON manifest.
//!
//! Fatal errors are printed to stderr and terminate the process with a
//! non-zero exit code that identifies the kind of failure.

use anyhow::{Context, Result};
use appinst::config::AppConfig;
use appinst::platform;
use appinst::{
    AppinstError, Dispatcher, DispatcherBuilder, DryRunInstaller, HelperConfig, HostPlatform,
    InstallManifest, InstallerMetadata, PlatformId, RuntimeVersion,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "appinst")]
#[command(about = "Install application menus and shortcuts on any desktop")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install the menus and shortcuts of a manifest
    Install(InstallArgs),
    /// Remove the menus and shortcuts of a manifest (Windows only)
    Uninstall(InstallArgs),
    /// Print the menu used when a manifest has none
    DefaultMenu(HostArgs),
    /// Print the platform installer that would be used
    Detect(HostArgs),
}

#[derive(Args, Debug)]
struct HostArgs {
    /// Simulate a platform token (linux2, redhat3, redhat4, darwin, win32)
    #[arg(long)]
    platform: Option<String>,

    /// Installer metadata file (defaults to $APPINST_METADATA or the config dir)
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Interpreter version for the fallback menu name, e.g. 3.11
    #[arg(long, value_parser = parse_runtime_version)]
    runtime_version: Option<RuntimeVersion>,
}

#[derive(Args, Debug)]
struct InstallArgs {
    /// JSON manifest with `menus` and `shortcuts`
    #[arg(short, long)]
    manifest: PathBuf,

    /// Install for the current user or the whole system
    #[arg(long, default_value = "user")]
    mode: String,

    /// Helper program table (defaults to helpers.json in the config dir)
    #[arg(long)]
    helpers: Option<PathBuf>,

    /// Print the request each installer would receive instead of running it
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    host: HostArgs,
}

fn parse_runtime_version(s: &str) -> std::result::Result<RuntimeVersion, String> {
    RuntimeVersion::parse(s).ok_or_else(|| format!("expected MAJOR.MINOR, got '{}'", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("{} {}", AppConfig::APP_NAME, env!("CARGO_PKG_VERSION"));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit status for an error, using the library's code when there is one.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppinstError>()
        .map(AppinstError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Install(args) => install(args, false),
        Commands::Uninstall(args) => install(args, true),
        Commands::DefaultMenu(args) => {
            let dispatcher = host_builder(&args)?.build();
            println!("{}", serde_json::to_string_pretty(&dispatcher.default_menu())?);
            Ok(())
        }
        Commands::Detect(args) => {
            let dispatcher = host_builder(&args)?.build();
            let platform = PlatformId::resolve(dispatcher.host())?;
            println!("{}", platform);
            Ok(())
        }
    }
}

fn install(args: InstallArgs, uninstall: bool) -> Result<()> {
    let manifest = InstallManifest::load(&args.manifest)
        .with_context(|| format!("Failed to read manifest {}", args.manifest.display()))?;
    debug!(
        "Manifest {}: {} menu(s), {} shortcut(s)",
        args.manifest.display(),
        manifest.menus.len(),
        manifest.shortcuts.len()
    );

    let mut builder = host_builder(&args.host)?;
    if args.dry_run {
        info!("Dry-run mode: no menus or shortcuts will be changed");
        for platform in PlatformId::ALL {
            builder = builder.installer(DryRunInstaller::stdout(platform));
        }
    } else {
        for installer in load_helpers(args.helpers.as_deref())?.installers() {
            builder = builder.installer(installer);
        }
    }

    let dispatcher = builder.build();
    dispatcher.install(manifest.menus, manifest.shortcuts, &args.mode, uninstall)?;

    info!(
        "{} complete",
        if uninstall { "Uninstall" } else { "Install" }
    );
    Ok(())
}

fn host_builder(args: &HostArgs) -> Result<DispatcherBuilder> {
    let metadata = InstallerMetadata::discover(args.metadata.as_deref())?;

    let mut builder = Dispatcher::builder().metadata(metadata);
    if let Some(token) = &args.platform {
        builder = builder.host(HostPlatform::from_token(token));
    }
    if let Some(version) = args.runtime_version {
        builder = builder.runtime_version(version);
    }
    Ok(builder)
}

/// Load the helper table, treating a missing default file as empty.
fn load_helpers(explicit: Option<&Path>) -> Result<HelperConfig> {
    if let Some(path) = explicit {
        return Ok(HelperConfig::load(path)?);
    }

    let path = platform::helpers_path()?;
    if path.exists() {
        Ok(HelperConfig::load(&path)?)
    } else {
        warn!("No helper config at {}; no platform installers available", path.display());
        Ok(HelperConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_install_args() {
        let cli = Cli::try_parse_from([
            "appinst",
            "install",
            "--manifest",
            "menus.json",
            "--mode",
            "system",
            "--platform",
            "redhat4",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.manifest, PathBuf::from("menus.json"));
                assert_eq!(args.mode, "system");
                assert_eq!(args.host.platform.as_deref(), Some("redhat4"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_mode_defaults_to_user() {
        let cli = Cli::try_parse_from(["appinst", "uninstall", "-m", "menus.json"]).unwrap();
        match cli.command {
            Commands::Uninstall(args) => assert_eq!(args.mode, "user"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_runtime_version_arg() {
        let cli = Cli::try_parse_from(["appinst", "default-menu", "--runtime-version", "2.7"])
            .unwrap();
        match cli.command {
            Commands::DefaultMenu(args) => {
                assert_eq!(args.runtime_version, Some(RuntimeVersion::new(2, 7)))
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["appinst", "detect", "--runtime-version", "three"]).is_err());
    }

    #[test]
    fn test_exit_code_from_library_error() {
        let err = anyhow::Error::from(AppinstError::UnsupportedPlatform {
            platform: "sunos5".into(),
        });
        assert_eq!(exit_code(&err), 4);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_unknown_platform_install_fails_nonzero() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let manifest = temp_dir.path().join("menus.json");
        std::fs::write(&manifest, r#"{"menus": [{"id": "A", "name": "A"}]}"#).unwrap();
        let metadata = temp_dir.path().join("installer.json");
        std::fs::write(&metadata, r#"{"full_name": "EPD-7.1"}"#).unwrap();

        let args = InstallArgs {
            manifest,
            mode: "user".into(),
            helpers: None,
            dry_run: true,
            host: HostArgs {
                platform: Some("sunos5".into()),
                metadata: Some(metadata),
                runtime_version: None,
            },
        };

        let err = install(args, false).unwrap_err();
        assert_eq!(exit_code(&err), 4);
    }
}
