use serde::Serialize;

use crate::types::version::VersionDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReportFormat {
    #[default]
    Tag,
    Int,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    descriptor: &'a VersionDescriptor,
    version: String,
}

/// Renders the single line printed on stdout.
pub fn render(descriptor: &VersionDescriptor, format: ReportFormat) -> Result<String, String> {
    match format {
        ReportFormat::Tag => Ok(descriptor.tag()),
        ReportFormat::Int => Ok(descriptor.as_int().to_string()),
        ReportFormat::Json => serde_json::to_string(&JsonReport {
            descriptor,
            version: descriptor.tag(),
        })
        .map_err(|e| format!("Failed to serialize version: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn tag_report() {
        let v = VersionDescriptor::new(0, 21, 1, "");
        assert_eq!(render(&v, ReportFormat::Tag).unwrap(), "v0.21.1");
    }

    #[test]
    fn int_report() {
        let v = VersionDescriptor::new(0, 21, 1, "");
        assert_eq!(render(&v, ReportFormat::Int).unwrap(), "21001");
    }

    #[test]
    fn json_report_has_all_fields() {
        let v = VersionDescriptor::new(1, 0, 0, "rc1");
        let out = render(&v, ReportFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["major"], 1);
        assert_eq!(parsed["minor"], 0);
        assert_eq!(parsed["patch"], 0);
        assert_eq!(parsed["postfix"], "rc1");
        assert_eq!(parsed["version"], "v1.0.0-rc1");
    }
}
