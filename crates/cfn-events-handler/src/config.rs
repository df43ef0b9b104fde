//! Command line and environment configuration
//!
//! Lambda starts the binary without arguments, so every option falls back to
//! an environment variable set on the function.

use cfn_events_common::ResourceKind;
use cfn_events_common::defaults::{DEFAULT_RESPONSE_TIMEOUT_SECS, ENV_RESOURCE_KIND};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "cfn-events-handler")]
#[command(about = "CloudFormation custom resource handler for CloudWatch Events")]
#[command(version)]
pub struct Args {
    /// Custom resource kind served by this deployment
    #[arg(long, env = ENV_RESOURCE_KIND)]
    pub kind: ResourceKind,

    /// AWS region (default: SDK resolution chain)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Timeout for sending the response to CloudFormation, in seconds
    #[arg(
        long,
        env = "CFN_EVENTS_RESPONSE_TIMEOUT_SECS",
        default_value_t = DEFAULT_RESPONSE_TIMEOUT_SECS
    )]
    pub response_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "CFN_EVENTS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reconcile one event from a file and print the response instead of sending it
    Invoke {
        /// Path to the lifecycle event JSON
        #[arg(long)]
        event: PathBuf,
    },
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Response timeout must be at least one second")]
    ZeroResponseTimeout,
}

/// Validated handler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub kind: ResourceKind,
    pub region: Option<String>,
    pub response_timeout: Duration,
    pub log_format: LogFormat,
}

impl TryFrom<&Args> for HandlerConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        if args.response_timeout_secs == 0 {
            return Err(ConfigError::ZeroResponseTimeout);
        }

        Ok(Self {
            kind: args.kind,
            region: args.region.clone().filter(|r| !r.is_empty()),
            response_timeout: Duration::from_secs(args.response_timeout_secs),
            log_format: args.log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("cfn-events-handler").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--kind", "rule", "--region", "us-east-1"]).unwrap();
        let config = HandlerConfig::try_from(&args).unwrap();

        assert_eq!(config.kind, ResourceKind::Rule);
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(
            config.response_timeout,
            Duration::from_secs(DEFAULT_RESPONSE_TIMEOUT_SECS)
        );
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let args = parse(&["--kind", "Target"]).unwrap();
        assert_eq!(args.kind, ResourceKind::Target);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(parse(&["--kind", "bucket"]).is_err());
    }

    #[test]
    fn test_invoke_subcommand() {
        let args = parse(&[
            "--kind",
            "target",
            "--log-format",
            "json",
            "invoke",
            "--event",
            "event.json",
        ])
        .unwrap();

        assert_eq!(args.log_format, LogFormat::Json);
        assert_eq!(
            args.command,
            Some(Command::Invoke {
                event: PathBuf::from("event.json")
            })
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = parse(&["--kind", "rule", "--response-timeout-secs", "0"]).unwrap();
        assert_eq!(
            HandlerConfig::try_from(&args),
            Err(ConfigError::ZeroResponseTimeout)
        );
    }

    #[test]
    fn test_empty_region_means_default_chain() {
        let args = parse(&["--kind", "rule", "--region", ""]).unwrap();
        assert_eq!(HandlerConfig::try_from(&args).unwrap().region, None);
    }
}
