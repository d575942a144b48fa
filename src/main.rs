use crate::{
    types::version::VersionDescriptor,
    utils::{
        config,
        error::VersionError,
        logger::{LogLevel, Logger},
        path::get_cwd,
    },
    version::{
        bump::{self, BumpRequest},
        report::{self, ReportFormat},
        store::{VersionStore, validate_postfix},
    },
};
use anyhow::{Context, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::process;

mod types;
mod utils;
mod version;

#[derive(Parser)]
#[command(name = "versionbump")]
#[command(author = "Labscend Studios")]
#[command(version)]
#[command(about = "Set or read the current version stored in src/version.inc")]
struct Cli {
    /// Bump the major version, resetting minor, patch and postfix
    #[arg(long)]
    major: bool,

    /// Bump the minor version, resetting patch and postfix
    #[arg(long)]
    minor: bool,

    /// Bump the patch version, resetting the postfix
    #[arg(long)]
    patch: bool,

    /// Set the postfix (ignored when empty, no whitespace or quotes)
    #[arg(long, value_name = "POSTFIX", value_parser = validate_postfix)]
    postfix: Option<String>,

    /// Version file to use instead of the project default
    #[arg(long, env = "VERSIONBUMP_FILE", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the packed integer form instead of vMAJOR.MINOR.PATCH
    #[arg(long, conflicts_with = "json")]
    int: bool,

    /// Print the version as a JSON object
    #[arg(long)]
    json: bool,

    /// Fail unless the resulting version is at least MAJOR.MINOR.PATCH
    #[arg(long, value_name = "VERSION")]
    require: Option<String>,

    /// Log each step to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn bump_request(&self) -> BumpRequest {
        BumpRequest {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            postfix: self.postfix.clone(),
        }
    }

    fn report_format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else if self.int {
            ReportFormat::Int
        } else {
            ReportFormat::Tag
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let logger = Logger::new(cli.verbose);

    if let Err(err) = run(&cli, &logger) {
        let causes: Vec<String> = err.chain().skip(1).map(|c| c.to_string()).collect();
        logger.log_message_with_trace(
            LogLevel::Error,
            &err.to_string(),
            causes.iter().map(String::as_str).collect(),
        );
        process::exit(1);
    }
}

fn run(cli: &Cli, logger: &Logger) -> anyhow::Result<()> {
    // --require is validated before any write.
    let required = cli
        .require
        .as_deref()
        .map(str::parse::<VersionDescriptor>)
        .transpose()?;

    let cwd = get_cwd();
    let store_config = config::resolve(&cwd, cli.file.as_deref())
        .context("Failed to resolve the version file location")?;
    let mut store = VersionStore::from_config(&store_config);
    logger.log_message(
        LogLevel::Info,
        &format!("Using version file {}", store.path().display()),
    );

    let mut descriptor = store.load().context("Failed to load version")?;
    let before = descriptor.tag();

    let request = cli.bump_request();
    if request.postfix.as_deref() == Some("") {
        logger.log_message(LogLevel::Warning, "Empty postfix ignored");
    }
    if !request.is_mutating() {
        logger.log_message(LogLevel::Debug, "No bump requested, version file untouched");
    }

    let writes = bump::apply(&mut store, &mut descriptor, &request, logger)
        .context("Failed to update version")?;
    if writes > 0 {
        logger.log_message(
            LogLevel::Success,
            &format!("{} -> {} ({} write(s))", before, descriptor.tag(), writes),
        );
    }

    if let Some(required) = required {
        if descriptor.cmp_release(&required).is_lt() {
            return Err(VersionError::VersionTooOld {
                current: descriptor.to_string(),
                required: required.to_string(),
            }
            .into());
        }
    }

    let line = report::render(&descriptor, cli.report_format()).map_err(|e| anyhow!(e))?;
    println!("{}", line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_to_bump_request() {
        let cli = Cli::parse_from(["versionbump", "--minor", "--postfix", "rc1"]);
        assert_eq!(
            cli.bump_request(),
            BumpRequest {
                major: false,
                minor: true,
                patch: false,
                postfix: Some("rc1".to_string()),
            }
        );
        assert_eq!(cli.report_format(), ReportFormat::Tag);
    }

    #[test]
    fn postfix_with_space_is_rejected() {
        let err = Cli::try_parse_from(["versionbump", "--postfix", "rc 1"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn int_and_json_conflict() {
        assert!(Cli::try_parse_from(["versionbump", "--int", "--json"]).is_err());
    }
}
