use crate::types::version::VersionDescriptor;
use crate::utils::error::Result;
use crate::utils::logger::{LogLevel, Logger};
use crate::version::store::VersionSink;

/// Which bumps to apply in one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BumpRequest {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
    pub postfix: Option<String>,
}

impl BumpRequest {
    fn new_postfix(&self) -> Option<&str> {
        self.postfix.as_deref().filter(|p| !p.is_empty())
    }

    /// True when at least one step would write the store.
    pub fn is_mutating(&self) -> bool {
        self.major || self.minor || self.patch || self.new_postfix().is_some()
    }
}

/// Applies the requested bumps in major, minor, patch, postfix order.
///
/// Every step that runs writes the sink on its own, so a failure halfway
/// leaves the earlier steps persisted. Returns the number of writes.
pub fn apply<S: VersionSink>(
    sink: &mut S,
    descriptor: &mut VersionDescriptor,
    request: &BumpRequest,
    logger: &Logger,
) -> Result<usize> {
    let mut writes = 0;

    if request.major {
        descriptor.bump_major();
        persist_step(sink, descriptor, "major", logger)?;
        writes += 1;
    }
    if request.minor {
        descriptor.bump_minor();
        persist_step(sink, descriptor, "minor", logger)?;
        writes += 1;
    }
    if request.patch {
        descriptor.bump_patch();
        persist_step(sink, descriptor, "patch", logger)?;
        writes += 1;
    }
    if let Some(postfix) = request.new_postfix() {
        descriptor.postfix = postfix.to_string();
        persist_step(sink, descriptor, "postfix", logger)?;
        writes += 1;
    }

    Ok(writes)
}

fn persist_step<S: VersionSink>(
    sink: &mut S,
    descriptor: &VersionDescriptor,
    step: &str,
    logger: &Logger,
) -> Result<()> {
    sink.persist(descriptor)?;
    logger.log_message(
        LogLevel::Debug,
        &format!("{} step written: {}", step, descriptor.tag()),
    );
    Ok(())
}
