//! Command-line arguments for the `orders-api` binary.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the orders service.
#[derive(Parser, Debug)]
#[command(name = "orders-api", version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (falls back to BISTRO_CONFIG, then the platform config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info,bistro=debug,sqlx=warn")]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["orders-api"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.log_filter, "info,bistro=debug,sqlx=warn");
    }

    #[test]
    fn test_config_flag_forms() {
        let args = Args::try_parse_from(["orders-api", "--config", "/etc/bistro.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/bistro.toml")));

        let args = Args::try_parse_from(["orders-api", "--config=local.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("local.toml")));

        let args = Args::try_parse_from(["orders-api", "-c", "short.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("short.toml")));
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        let err = Args::try_parse_from(["orders-api", "--confg", "x.toml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        assert!(Args::try_parse_from(["orders-api", "--config"]).is_err());
    }
}
