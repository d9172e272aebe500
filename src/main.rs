use clap::{Parser, ValueEnum};
use ichart_oxide::chart::{ChartRequest, WindowSize, build_chart_from_path};
use ichart_oxide::{AppConfig, ChartError, VariantKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ichart-oxide")]
#[command(about = "Build SPC I-Chart descriptions from plant exports as JSON")]
struct Args {
    /// Chart variant to build
    #[arg(value_enum)]
    variant: VariantOpt,

    /// Parameter display name or tag
    #[arg(short, long)]
    param: String,

    /// Dataset to read instead of the configured one (.csv or .parquet)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of most recent rows for current/AI charts (ignored for history)
    #[arg(short, long)]
    window: Option<usize>,

    /// Configuration file (default: ichart.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum VariantOpt {
    History,
    Current,
    Ai,
}

impl From<VariantOpt> for VariantKind {
    fn from(value: VariantOpt) -> Self {
        match value {
            VariantOpt::History => VariantKind::History,
            VariantOpt::Current => VariantKind::Current,
            VariantOpt::Ai => VariantKind::Ai,
        }
    }
}

fn run(args: Args) -> Result<String, ChartError> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let kind = VariantKind::from(args.variant);

    let tag = config.resolve_tag(&args.param);
    let path = args.csv.unwrap_or_else(|| config.dataset(kind).to_path_buf());
    let window = match kind {
        VariantKind::History => WindowSize::Unbounded,
        VariantKind::Current | VariantKind::Ai => {
            WindowSize::Latest(args.window.unwrap_or(config.default_window))
        }
    };

    let request = ChartRequest {
        variant: config.variant(kind).clone(),
        columns: config.columns.clone(),
        window,
    };
    let spec = build_chart_from_path(&path, &tag, &request)?;
    spec.to_json(!args.compact)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit with status 2, --help and --version with 0
    let args = Args::parse();

    match run(args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "chart build failed");
            eprintln!("{}: {}", e.title(), e.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("ichart-oxide").chain(list.iter().copied()))
    }

    fn export() -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in [
            "parameter_name,ts,value,History_Mean_Value,History_Sigma_Value,Current_Mean_Value,Current_Sigma_Value,param_unit",
            "BED HEIGHT,05-01-2024 10:03:00,612,600,4,610,4,mm",
            "BED HEIGHT,05-01-2024 10:02:00,608,,,,,",
            "BED HEIGHT,05-01-2024 10:01:00,601,,,,,",
            "BED HEIGHT,05-01-2024 10:00:00,599,,,,,",
        ] {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn point_count(json: &str) -> usize {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        value["line"]["points"].as_array().unwrap().len()
    }

    #[test]
    fn test_parse_full_command_line() {
        let parsed = args(&["current", "--param", "Bed Height", "--window", "40", "--compact"]).unwrap();
        assert_eq!(parsed.variant, VariantOpt::Current);
        assert_eq!(VariantKind::from(parsed.variant), VariantKind::Current);
        assert_eq!(parsed.param, "Bed Height");
        assert_eq!(parsed.window, Some(40));
        assert!(parsed.compact);
        assert!(parsed.csv.is_none());
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(args(&[]).unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(args(&["history"]).unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(args(&["weekly", "--param", "x"]).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(
            args(&["ai", "--param", "x", "--window", "ten"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert!(args(&["ai", "--param"]).is_err());
        assert!(args(&["ai", "--param", "x", "--bogus"]).is_err());
        assert_eq!(args(&["ai", "--param", "x", "--bogus"]).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_run_reads_csv_override() {
        let file = export();
        let path = file.path().to_str().unwrap();

        let json = run(args(&["current", "-p", "bed height", "--csv", path, "--window", "2"]).unwrap()).unwrap();
        assert_eq!(point_count(&json), 2);
        assert!(json.contains('\n'));

        let compact = run(args(&["current", "-p", "BED HEIGHT", "--csv", path, "-w", "3", "--compact"]).unwrap())
            .unwrap();
        assert_eq!(point_count(&compact), 3);
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_run_history_ignores_window() {
        let file = export();
        let path = file.path().to_str().unwrap();

        let json = run(args(&["history", "--param", "BED HEIGHT", "--csv", path, "--window", "2"]).unwrap()).unwrap();
        assert_eq!(point_count(&json), 4);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["variant"], "history");
        assert_eq!(value["window"], "unbounded");
        assert_eq!(value["timestamps"]["known_format"], "%d-%m-%Y %H:%M:%S");
    }

    #[test]
    fn test_run_reports_explicit_missing_config() {
        let file = export();
        let path = file.path().to_str().unwrap();
        let result = run(args(&["history", "-p", "BED HEIGHT", "--csv", path, "-c", "/nonexistent/ichart.json"]).unwrap());
        assert!(matches!(result, Err(ChartError::FileIo(_))));
    }
}
