//! Import-based dependency fan-out
//!
//! An import is project-local unless it starts with a platform prefix. Only
//! outgoing dependencies are visible from a single file, so fan-in is always
//! zero and instability degenerates to 0 or 1.

use std::collections::BTreeSet;

use crate::metadata::DependencyImpact;

/// Runtime, framework, logging and codegen packages
pub const PLATFORM_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "org.springframework",
    "org.slf4j",
    "lombok",
];

/// Classifies imports as project-local or platform
#[derive(Debug, Clone, Default)]
pub struct DependencyInspector {
    extra_prefixes: Vec<String>,
}

impl DependencyInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add prefixes on top of [`PLATFORM_PREFIXES`]
    pub fn with_extra_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_prefixes
            .extend(prefixes.into_iter().map(Into::into).filter(|p: &String| !p.is_empty()));
        self
    }

    pub fn is_project_local(&self, import: &str) -> bool {
        let platform = PLATFORM_PREFIXES.iter().any(|p| import.starts_with(p))
            || self.extra_prefixes.iter().any(|p| import.starts_with(p.as_str()));
        !platform
    }

    /// Build the dependency impact of an import list
    pub fn inspect(&self, imports: &[String]) -> DependencyImpact {
        let outgoing: BTreeSet<String> = imports
            .iter()
            .filter(|import| self.is_project_local(import))
            .cloned()
            .collect();
        let incoming = BTreeSet::new();

        let fan_out = outgoing.len() as u32;
        let fan_in = incoming.len() as u32;
        let instability = if fan_out + fan_in == 0 {
            0.0
        } else {
            fan_out as f64 / (fan_out + fan_in) as f64
        };

        DependencyImpact {
            outgoing_dependencies: outgoing,
            incoming_dependencies: incoming,
            fan_out,
            fan_in,
            instability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_platform_imports_are_excluded() {
        let impact = DependencyInspector::new().inspect(&imports(&[
            "java.util.List",
            "javax.persistence.Entity",
            "org.springframework.stereotype.Service",
            "org.slf4j.Logger",
            "lombok.Data",
            "com.acme.billing.Invoice",
            "com.acme.billing.Invoice",
            "org.apache.commons.lang3.StringUtils",
        ]));

        assert_eq!(impact.fan_out, 2);
        assert!(impact.outgoing_dependencies.contains("com.acme.billing.Invoice"));
        assert!(impact
            .outgoing_dependencies
            .contains("org.apache.commons.lang3.StringUtils"));
        assert_eq!(impact.instability, 1.0);
    }

    #[test]
    fn test_fan_in_is_always_zero() {
        let impact = DependencyInspector::new().inspect(&imports(&["com.acme.A"]));
        assert_eq!(impact.fan_in, 0);
        assert!(impact.incoming_dependencies.is_empty());
    }

    #[test]
    fn test_no_imports() {
        let impact = DependencyInspector::new().inspect(&[]);
        assert_eq!(impact.fan_out, 0);
        assert_eq!(impact.instability, 0.0);
    }

    #[test]
    fn test_extra_prefixes() {
        let inspector = DependencyInspector::new().with_extra_prefixes(["com.fasterxml", ""]);
        assert!(!inspector.is_project_local("com.fasterxml.jackson.databind.ObjectMapper"));
        assert!(inspector.is_project_local("com.acme.Thing"));
        assert!(!inspector.is_project_local("java.time.Instant"));
    }

    #[test]
    fn test_prefix_match_is_literal() {
        // "javafx" does not start with "java."
        assert!(DependencyInspector::new().is_project_local("javafx.scene.Node"));
        // "lombok" has no trailing dot
        assert!(!DependencyInspector::new().is_project_local("lombokish.Thing"));
    }
}
