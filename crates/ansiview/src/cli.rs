//! Command-line arguments.

use std::path::PathBuf;

use ansiview_render::{detect_theme, ThemeKind};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Export ANSI-styled terminal output as sanitized HTML.
#[derive(Debug, Parser)]
#[command(name = "ansiview", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a file to a self-contained HTML page
    Render(RenderArgs),
    /// Print a file with its escape sequences removed
    Strip {
        /// File to read
        file: PathBuf,
    },
    /// Print the color and attribute sample matrix
    Sample,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// File to render
    pub file: PathBuf,

    /// Write the page here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML style configuration (defaults to the built-in palette)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Theme for the exported page
    #[arg(long, value_enum, default_value_t = ThemeArg::Auto)]
    pub theme: ThemeArg,

    /// JSON state to embed; produces a page for a live surface that
    /// applies its own theme class
    #[arg(long, value_name = "JSON")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Follow the operating system
    Auto,
    Dark,
    Light,
    HighContrast,
}

impl ThemeArg {
    pub fn resolve(self) -> ThemeKind {
        match self {
            ThemeArg::Auto => detect_theme(),
            ThemeArg::Dark => ThemeKind::Dark,
            ThemeArg::Light => ThemeKind::Light,
            ThemeArg::HighContrast => ThemeKind::HighContrast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["ansiview", "render", "build.log"]).unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.file, PathBuf::from("build.log"));
        assert_eq!(args.theme, ThemeArg::Auto);
        assert!(args.output.is_none());
        assert!(args.state.is_none());
    }

    #[test]
    fn test_render_options() {
        let cli = Cli::try_parse_from([
            "ansiview",
            "render",
            "build.log",
            "-o",
            "out.html",
            "--config",
            "styles.yaml",
            "--theme",
            "high-contrast",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
        assert_eq!(args.config, Some(PathBuf::from("styles.yaml")));
        assert_eq!(args.theme.resolve(), ThemeKind::HighContrast);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(Cli::try_parse_from(["ansiview", "render", "x", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
