//! Mock data source returning a fixed insight document.
//!
//! Stands in for the real insight API. The payload is the `express@4.10.5`
//! record; the requested ecosystem, name and version are echoed back in
//! `packageVersion`.

use super::DataSource;
use crate::model::{FetchError, PackageIdentifier};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Simulated API latency used when no override is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Data source that always answers with the mock payload.
#[derive(Debug, Clone)]
pub struct MockSource {
    latency: Duration,
}

impl MockSource {
    /// Mock source sleeping `latency` per fetch.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Mock source without simulated latency.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl DataSource for MockSource {
    fn fetch(&self, id: &PackageIdentifier) -> Result<Value, FetchError> {
        if !self.latency.is_zero() {
            debug!(latency_ms = self.latency.as_millis() as u64, "Simulating API latency");
            std::thread::sleep(self.latency);
        }
        Ok(mock_payload(id))
    }
}

/// Build the mock insight document for `id`.
pub fn mock_payload(id: &PackageIdentifier) -> Value {
    json!({
        "packageVersion": {
            "package": {
                "ecosystem": id.ecosystem().to_uppercase(),
                "name": id.name(),
            },
            "version": id.version(),
        },
        "insight": {
            "dependencies": mock_dependencies(),
            "vulnerabilities": mock_vulnerabilities(),
            "projectInsights": [ {
                "project": {
                    "type": "PROJECT_SOURCE_TYPE_GITHUB",
                    "name": "github.com/strongloop/express",
                    "url": "https://github.com/strongloop/express",
                    "stars": "66020",
                    "forks": "16984",
                    "issues": { "open": "215" },
                },
                "scorecard": mock_scorecard(),
            } ],
            "licenses": {
                "licenses": [ { "licenseId": "MIT" } ],
            },
        },
        "packagePublishedAt": "2014-12-11T05:08:02Z",
    })
}

fn mock_vulnerabilities() -> Value {
    json!([
        {
            "id": { "value": "GHSA-rv95-896h-c2vc" },
            "summary": "Express.js Open Redirect in malformed URLs",
            "aliases": [ { "value": "CVE-2024-29041" } ],
            "severities": [ {
                "type": "TYPE_CVSS_V3",
                "score": "CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:C/C:L/I:L/A:N",
                "risk": "RISK_MEDIUM",
            } ],
            "publishedAt": "2024-03-25T19:40:26Z",
        },
        {
            "id": { "value": "GHSA-qw6h-vgh9-j6wx" },
            "summary": "express vulnerable to XSS via response.redirect()",
            "aliases": [ { "value": "CVE-2024-43796" } ],
            "severities": [ {
                "type": "TYPE_CVSS_V3",
                "score": "CVSS:3.1/AV:N/AC:H/PR:N/UI:R/S:U/C:L/I:L/A:L",
                "risk": "RISK_MEDIUM",
            } ],
            "publishedAt": "2024-09-10T19:41:04Z",
        },
    ])
}

const MOCK_DEPENDENCIES: [(&str, &str); 24] = [
    ("accepts", "1.1.4"),
    ("content-disposition", "0.5.0"),
    ("cookie", "0.1.2"),
    ("cookie-signature", "1.0.5"),
    ("debug", "2.1.3"),
    ("depd", "1.0.1"),
    ("escape-html", "1.0.1"),
    ("etag", "1.5.1"),
    ("finalhandler", "0.3.2"),
    ("fresh", "0.2.4"),
    ("media-typer", "0.3.0"),
    ("merge-descriptors", "0.0.2"),
    ("methods", "1.1.0"),
    ("on-finished", "2.1.1"),
    ("parseurl", "1.3.3"),
    ("path-to-regexp", "0.1.3"),
    ("proxy-addr", "1.0.10"),
    ("qs", "2.3.3"),
    ("range-parser", "1.0.3"),
    ("send", "0.10.1"),
    ("serve-static", "1.7.2"),
    ("type-is", "1.5.7"),
    ("utils-merge", "1.0.0"),
    ("vary", "1.0.1"),
];

fn mock_dependencies() -> Value {
    MOCK_DEPENDENCIES
        .iter()
        .map(|(name, version)| json!({ "package": { "name": name }, "version": version }))
        .collect()
}

const MOCK_CHECKS: [(&str, i32, &str); 9] = [
    ("Code-Review", 10, "all changesets reviewed"),
    (
        "Maintained",
        10,
        "24 commit(s) and 12 issue activity found in the last 90 days",
    ),
    ("Security-Policy", 10, "security policy file detected"),
    (
        "Dangerous-Workflow",
        10,
        "no dangerous workflow patterns detected",
    ),
    (
        "Token-Permissions",
        0,
        "detected GitHub workflow tokens with excessive permissions",
    ),
    ("Binary-Artifacts", 10, "no binaries found in the repo"),
    ("Vulnerabilities", 10, "0 existing vulnerabilities detected"),
    ("License", 10, "license file detected"),
    ("SAST", 9, "SAST tool detected but not run on all commits"),
];

fn mock_scorecard() -> Value {
    let checks: Vec<Value> = MOCK_CHECKS
        .iter()
        .map(|(name, score, reason)| json!({ "name": name, "score": score, "reason": reason }))
        .collect();
    json!({ "score": 7.2, "checks": checks })
}
