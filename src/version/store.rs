use std::fs;
use std::path::{Path, PathBuf};

use crate::types::version::VersionDescriptor;
use crate::utils::config::StoreConfig;
use crate::utils::error::{Result, VersionError};

const FIELDS: [&str; 4] = ["MAJOR", "MINOR", "PATCH", "POSTFIX"];

/// Something a descriptor can be written to.
pub trait VersionSink {
    fn persist(&mut self, descriptor: &VersionDescriptor) -> Result<()>;
}

/// The version include file on disk.
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
    prefix: String,
}

impl VersionStore {
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.file, &config.prefix)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<VersionDescriptor> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| VersionError::from_io(&self.path, e))?;
        parse_descriptor(&content, &self.path)
    }
}

impl VersionSink for VersionStore {
    fn persist(&mut self, descriptor: &VersionDescriptor) -> Result<()> {
        fs::write(&self.path, render_descriptor(descriptor, &self.prefix))
            .map_err(|e| VersionError::from_io(&self.path, e))
    }
}

/// Parses the four `#define` lines, reading the third token of each.
///
/// ### Parameters
/// - `content`: the file text.
/// - `path`: used for error messages only.
///
pub fn parse_descriptor(content: &str, path: &Path) -> Result<VersionDescriptor> {
    let malformed = |line: usize, reason: String| VersionError::MalformedResource {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut lines = content.lines();
    let mut tokens: Vec<&str> = Vec::with_capacity(FIELDS.len());
    for (idx, field) in FIELDS.iter().enumerate() {
        let line_no = idx + 1;
        let line = lines
            .next()
            .ok_or_else(|| malformed(line_no, format!("missing {} line", field.to_lowercase())))?;
        let token = line
            .split_whitespace()
            .nth(2)
            .ok_or_else(|| malformed(line_no, "expected at least three tokens".to_string()))?;
        tokens.push(token);
    }

    let number = |idx: usize| {
        tokens[idx].parse::<u32>().map_err(|_| {
            malformed(
                idx + 1,
                format!(
                    "{} value '{}' is not a non-negative integer",
                    FIELDS[idx].to_lowercase(),
                    tokens[idx]
                ),
            )
        })
    };

    Ok(VersionDescriptor::new(
        number(0)?,
        number(1)?,
        number(2)?,
        tokens[3].replace('"', ""),
    ))
}

/// Checks that `postfix` fits in the quoted third token of the POSTFIX line.
///
/// Used as the clap value parser for `--postfix`, so an empty value still
/// passes and is ignored later.
pub fn validate_postfix(postfix: &str) -> std::result::Result<String, String> {
    if postfix.chars().any(|c| c.is_whitespace() || c == '"') {
        return Err(format!(
            "postfix '{}' must not contain whitespace or '\"'",
            postfix
        ));
    }
    Ok(postfix.to_string())
}

/// Renders the descriptor back into the four-line include format, without a trailing newline.
pub fn render_descriptor(descriptor: &VersionDescriptor, prefix: &str) -> String {
    format!(
        "#define {p}_VERSION_MAJOR {}\n#define {p}_VERSION_MINOR {}\n#define {p}_VERSION_PATCH {}\n#define {p}_VERSION_POSTFIX \"{}\"",
        descriptor.major,
        descriptor.minor,
        descriptor.patch,
        descriptor.postfix,
        p = prefix
    )
}
