//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

use colored::Colorize;

use crate::commands::{Commands, SourceArgs};
use crate::common::Result;
use crate::config::{env, source, Profile, Resolution, Resolver};

/// Dispatch a CLI command
pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve { source } => {
            let resolution = resolve_from_args(&source)?;
            println!("{}", serde_json::to_string_pretty(&*resolution.config)?);
            Ok(())
        }

        Commands::Profiles => {
            for profile in Profile::ALL {
                let marker = if *profile == Profile::default() {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "{}{}  {}",
                    profile.name().white().bold(),
                    marker.dimmed(),
                    profile.description().dimmed()
                );
                println!("{}", serde_json::to_string_pretty(&profile.defaults())?);
            }
            Ok(())
        }

        Commands::Specs { source } => {
            let resolution = resolve_from_args(&source)?;
            let files = resolution.config.expand_specs()?;
            if files.is_empty() {
                eprintln!(
                    "{} no spec files match {}",
                    "Warning:".yellow().bold(),
                    resolution.config.spec_pattern.join(", ")
                );
            }
            for file in files {
                println!("{}", file.display());
            }
            Ok(())
        }
    }
}

/// Locate, load and resolve the configuration the arguments describe
pub fn resolve_from_args(args: &SourceArgs) -> Result<Resolution> {
    let cwd = std::env::current_dir()?;
    let located = source::locate(args.config.as_deref(), &cwd);

    let mut raw = located.load()?;
    if !args.no_env {
        raw = raw.overlay(env::from_process_env()?);
    }

    let mut resolver = Resolver::new()
        .strict(args.strict)
        .project_root(located.project_root);
    if let Some(name) = &args.profile {
        resolver = resolver.with_profile(name.parse()?);
    }

    resolver.resolve(raw)
}
