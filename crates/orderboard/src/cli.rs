use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use orderboard_core::{Locale, ReportConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Order delivery dashboard and report generator", long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the summary, write the dashboard and text report, then open the dashboard
    Render(RenderArgs),
    /// Print the summary and order table without writing any files
    Summary(InputArgs),
}

#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// CSV file with order rows; the built-in sample is used when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Label language (en or de)
    #[arg(long)]
    pub locale: Option<Locale>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Directory the artifacts are written to
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Also write a JSON summary next to the report
    #[arg(long)]
    pub summary_json: bool,
    /// Open the dashboard even when the config file disables it
    #[arg(long, conflicts_with = "no_open")]
    pub open: bool,
    /// Write the artifacts without opening the dashboard
    #[arg(long)]
    pub no_open: bool,
}

/// Applies the flags shared by every subcommand on top of a loaded config.
pub fn apply_input_args(mut config: ReportConfig, args: &InputArgs) -> ReportConfig {
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(input) = &args.input {
        config.input = Some(input.clone());
    }
    config
}

/// Applies every `render` flag. Flags win over environment and file values.
pub fn apply_render_args(config: ReportConfig, args: &RenderArgs) -> ReportConfig {
    let mut config = apply_input_args(config, &args.input);
    if let Some(dir) = &args.out_dir {
        config.out_dir = dir.clone();
    }
    config.summary_json |= args.summary_json;
    if args.open {
        config.open = true;
    }
    if args.no_open {
        config.open = false;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use orderboard_core::config::{LOCALE_ENV, OUT_DIR_ENV};

    fn parse_render(argv: &[&str]) -> Result<RenderArgs> {
        let cli = Cli::try_parse_from(std::iter::once("orderboard").chain(argv.iter().copied()))?;
        match cli.command {
            Command::Render(args) => Ok(args),
            Command::Summary(_) => anyhow::bail!("expected the render subcommand"),
        }
    }

    fn layered_config() -> Result<ReportConfig> {
        let config = ReportConfig::from_toml_str("locale = \"de\"\nout_dir = \"from-file\"")?
            .with_env_overrides(|key| match key {
                LOCALE_ENV => Some("de".to_string()),
                OUT_DIR_ENV => Some("/tmp/from-env".to_string()),
                _ => None,
            })?;
        Ok(config)
    }

    #[test]
    fn flags_win_over_environment_and_file() -> Result<()> {
        let args = parse_render(&["render", "--locale", "en", "--out-dir", "cli-out"])?;
        let config = apply_render_args(layered_config()?, &args);

        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.out_dir, PathBuf::from("cli-out"));
        Ok(())
    }

    #[test]
    fn environment_survives_when_flags_are_absent() -> Result<()> {
        let args = parse_render(&["render"])?;
        let config = apply_render_args(layered_config()?, &args);

        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.out_dir, PathBuf::from("/tmp/from-env"));
        assert!(config.open);
        assert!(!config.summary_json);
        Ok(())
    }

    #[test]
    fn no_open_disables_the_default_display() -> Result<()> {
        let args = parse_render(&["render", "--no-open"])?;
        let config = apply_render_args(ReportConfig::default(), &args);
        assert!(!config.open);
        Ok(())
    }

    #[test]
    fn open_flag_overrides_a_file_that_disables_display() -> Result<()> {
        let args = parse_render(&["render", "--open", "--summary-json"])?;
        let config = apply_render_args(ReportConfig::from_toml_str("open = false")?, &args);
        assert!(config.open);
        assert!(config.summary_json);
        Ok(())
    }

    #[test]
    fn open_and_no_open_conflict() {
        assert!(parse_render(&["render", "--open", "--no-open"]).is_err());
    }

    #[test]
    fn summary_flags_apply_locale_and_input() -> Result<()> {
        let cli = Cli::try_parse_from(["orderboard", "summary", "--locale", "english", "--input", "orders.csv"])?;
        let Command::Summary(args) = cli.command else {
            anyhow::bail!("expected the summary subcommand");
        };
        let config = apply_input_args(ReportConfig::default(), &args);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.input, Some(PathBuf::from("orders.csv")));
        Ok(())
    }
}
