use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_versioner::build_info::BuildInfo;
use git_versioner::cli::{run_generate, GenerateArgs};
use git_versioner::config::{self, Config};
use git_versioner::domain::{Scheme, Selection, VersionSpec};
use git_versioner::git::Backend;
use git_versioner::ui;
use git_versioner::writer::{OutputFormat, OutputTarget};

#[derive(clap::Parser)]
#[command(
    name = "git-versioner",
    about = "Derive a version string from git tags and history"
)]
struct Args {
    #[arg(short = 'C', long, default_value = ".", help = "Repository path")]
    repo: String,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, group = "scheme_choice", help = "Version scheme: default, semver, calver or simple")]
    scheme: Option<Scheme>,

    #[arg(long, group = "scheme_choice", help = "Shortcut for --scheme semver")]
    semver: bool,

    #[arg(long, group = "scheme_choice", help = "Shortcut for --scheme calver")]
    calver: bool,

    #[arg(long, group = "scheme_choice", help = "Shortcut for --scheme simple")]
    simple: bool,

    #[arg(long, help = "Append the abbreviated commit hash")]
    hash: bool,

    #[arg(
        long,
        conflicts_with_all = ["scheme_choice", "hash"],
        help = "Docker-safe legacy format (no '+')"
    )]
    docker: bool,

    #[arg(short = 'i', long, help = "Read the repository with the embedded git library")]
    builtin_git: bool,

    #[arg(short = 'g', long, group = "writer", help = "Write a Go source file")]
    go: bool,

    #[arg(long, requires = "go", help = "Go file path (default version.go)")]
    go_path: Option<String>,

    #[arg(short = 'c', long, group = "writer", help = "Write a C/C++ header")]
    cpp: bool,

    #[arg(long, requires = "cpp", help = "Header path (default version.h)")]
    cpp_path: Option<String>,

    #[arg(short = 'y', long, group = "writer", help = "Write a YAML file")]
    yaml: bool,

    #[arg(long, requires = "yaml", help = "YAML file path (default version.yaml)")]
    yaml_path: Option<String>,

    #[arg(short = 'f', long, group = "writer", help = "Write a plain text file")]
    file: bool,

    #[arg(long, requires = "file", help = "Text file path (default .VERSION)")]
    file_path: Option<String>,

    #[arg(long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

impl Args {
    fn scheme(&self) -> Option<Scheme> {
        if self.semver {
            Some(Scheme::Semver)
        } else if self.calver {
            Some(Scheme::CalVer)
        } else if self.simple {
            Some(Scheme::Simple)
        } else {
            self.scheme
        }
    }

    fn output(&self) -> Option<OutputTarget> {
        let (format, path) = if self.go {
            (OutputFormat::Go, &self.go_path)
        } else if self.cpp {
            (OutputFormat::Cpp, &self.cpp_path)
        } else if self.yaml {
            (OutputFormat::Yaml, &self.yaml_path)
        } else if self.file {
            (OutputFormat::Plain, &self.file_path)
        } else {
            return None;
        };
        Some(OutputTarget::new(format, path.as_deref()))
    }

    /// Merge flags over configuration; flags win
    fn generate_args(&self, config: &Config) -> GenerateArgs {
        let backend = if self.builtin_git {
            Backend::Git2
        } else {
            config.repository.backend
        };

        GenerateArgs {
            repo_path: self.repo.clone().into(),
            backend,
            resolve_detached: config.repository.resolve_detached,
            selection: select(
                self.scheme().or(config.version.scheme),
                self.hash || config.version.include_hash,
                self.docker || config.version.docker,
            ),
            output: self.output(),
        }
    }
}

/// Legacy formatting unless a scheme or the hash was asked for
fn select(scheme: Option<Scheme>, include_hash: bool, docker: bool) -> Selection {
    if scheme.is_none() && !include_hash {
        Selection::Legacy { docker }
    } else {
        Selection::Scheme(VersionSpec::new(scheme.unwrap_or_default(), include_hash))
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("git_versioner={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.version {
        println!("{}", BuildInfo::from_env());
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let generate = args.generate_args(&config);
    let info = match run_generate(&generate) {
        Ok(info) => info,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match &generate.output {
        Some(target) => ui::display_success(&format!(
            "Wrote {} to {}",
            ui::describe(&info),
            target.path.display()
        )),
        None => println!("{}", info.version),
    }

    Ok(())
}
