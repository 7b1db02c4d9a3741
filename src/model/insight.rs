//! Package insight document returned by a data source.
//!
//! Every field is optional: the backend omits whatever it does not know, and the
//! view falls back to placeholders. Deserialization only fails when a field is
//! present with the wrong shape.

use serde::{Deserialize, Deserializer};

/// Top-level insight response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageInsight {
    /// Echo of the requested package and version.
    pub package_version: Option<PackageVersion>,
    /// Security findings for the version.
    pub insight: Option<Insight>,
    /// Publication timestamp, RFC 3339 when well-formed.
    pub package_published_at: Option<String>,
}

/// `packageVersion` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageVersion {
    /// Ecosystem and name.
    pub package: Option<PackageRef>,
    /// Version string.
    pub version: Option<String>,
}

/// Package reference inside `packageVersion`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageRef {
    /// Upper-case ecosystem, e.g. `NPM`.
    pub ecosystem: Option<String>,
    /// Package name.
    pub name: Option<String>,
}

/// The `insight` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Insight {
    /// Known vulnerabilities.
    pub vulnerabilities: Option<Vec<Vulnerability>>,
    /// Direct dependencies.
    pub dependencies: Option<Vec<Dependency>>,
    /// Declared licenses.
    pub licenses: Option<LicenseSet>,
    /// Source repositories with their scorecards.
    pub project_insights: Option<Vec<ProjectInsight>>,
}

/// `{ "value": "..." }` wrapper used for ids and aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValueRef {
    /// Wrapped string.
    pub value: Option<String>,
}

/// One advisory affecting the package version.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vulnerability {
    /// Advisory id, e.g. `GHSA-rv95-896h-c2vc`.
    pub id: Option<ValueRef>,
    /// One-line summary.
    pub summary: Option<String>,
    /// Other ids for the same advisory (CVE, ...).
    pub aliases: Option<Vec<ValueRef>>,
    /// Severity ratings.
    pub severities: Option<Vec<Severity>>,
    /// Advisory publication timestamp.
    pub published_at: Option<String>,
}

impl Vulnerability {
    /// Advisory id, if present.
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().and_then(|id| id.value.as_deref())
    }

    /// Alias values, skipping entries without a value.
    pub fn alias_values(&self) -> Vec<&str> {
        self.aliases
            .iter()
            .flatten()
            .filter_map(|a| a.value.as_deref())
            .collect()
    }

    /// First severity entry, if any.
    pub fn primary_severity(&self) -> Option<&Severity> {
        self.severities.as_ref().and_then(|s| s.first())
    }
}

/// Severity rating of an advisory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Severity {
    /// Scoring scheme, e.g. `TYPE_CVSS_V3`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Vector string, e.g. `CVSS:3.1/AV:N/...`.
    pub score: Option<String>,
    /// Risk bucket, e.g. `RISK_MEDIUM`.
    pub risk: Option<String>,
}

impl Severity {
    /// Human label for the risk bucket: `RISK_MEDIUM` → `Medium`.
    pub fn risk_label(&self) -> Option<String> {
        let risk = self.risk.as_deref()?;
        let bare = risk.strip_prefix("RISK_").unwrap_or(risk);
        let mut chars = bare.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
    }
}

/// A direct dependency.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Dependency {
    /// Dependency package.
    pub package: Option<DependencyPackage>,
    /// Resolved version.
    pub version: Option<String>,
}

impl Dependency {
    /// Dependency name, if present.
    pub fn name(&self) -> Option<&str> {
        self.package.as_ref().and_then(|p| p.name.as_deref())
    }
}

/// Package reference inside a dependency.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DependencyPackage {
    /// Package name.
    pub name: Option<String>,
}

/// `licenses` wrapper.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LicenseSet {
    /// Declared licenses in backend order.
    pub licenses: Option<Vec<License>>,
}

/// One declared license.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct License {
    /// SPDX id, e.g. `MIT`.
    pub license_id: Option<String>,
}

/// Repository facts and scorecard for one source project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectInsight {
    /// Repository facts.
    pub project: Option<Project>,
    /// OpenSSF scorecard.
    pub scorecard: Option<Scorecard>,
}

/// Source repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Hosting kind, e.g. `GITHUB`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Repository name, e.g. `expressjs/express`.
    pub name: Option<String>,
    /// Repository URL.
    pub url: Option<String>,
    /// Star count.
    #[serde(deserialize_with = "lenient_count")]
    pub stars: Option<u64>,
    /// Fork count.
    #[serde(deserialize_with = "lenient_count")]
    pub forks: Option<u64>,
    /// Issue counts.
    pub issues: Option<Issues>,
}

/// Issue counts of a repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Issues {
    /// Open issues.
    #[serde(deserialize_with = "lenient_count")]
    pub open: Option<u64>,
}

/// OpenSSF scorecard of a repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scorecard {
    /// Overall score out of 10.
    pub score: Option<f64>,
    /// Individual checks.
    pub checks: Option<Vec<ScorecardCheck>>,
}

impl Scorecard {
    /// Checks in backend order, empty when absent.
    pub fn checks(&self) -> &[ScorecardCheck] {
        self.checks.as_deref().unwrap_or(&[])
    }

    /// Number of checks with a perfect score.
    pub fn passed_checks(&self) -> usize {
        self.checks()
            .iter()
            .filter(|c| c.status() == CheckStatus::Pass)
            .count()
    }

    /// Overall score, 0 when absent.
    pub fn overall(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    /// Colour band of the overall score.
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall())
    }
}

/// One scorecard check.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScorecardCheck {
    /// Check name, e.g. `Code-Review`.
    pub name: Option<String>,
    /// Score out of 10, -1 when the check could not run.
    #[serde(deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    /// Why the check scored as it did.
    pub reason: Option<String>,
}

impl ScorecardCheck {
    /// Pass, unknown or fail, from the score.
    pub fn status(&self) -> CheckStatus {
        match self.score {
            Some(score) if score == 10.0 => CheckStatus::Pass,
            Some(score) if score == -1.0 => CheckStatus::Unknown,
            _ => CheckStatus::Fail,
        }
    }
}

/// Outcome of a single scorecard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Score 10.
    Pass,
    /// Score -1 (check could not run).
    Unknown,
    /// Anything else, including a missing score.
    Fail,
}

/// Colour band for an overall scorecard score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 8 and above.
    Good,
    /// 5 up to 8.
    Fair,
    /// Below 5.
    Poor,
}

impl ScoreBand {
    /// Band for an overall score.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::Good
        } else if score >= 5.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

impl PackageInsight {
    /// Vulnerabilities, empty when absent.
    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        self.insight
            .as_ref()
            .and_then(|i| i.vulnerabilities.as_deref())
            .unwrap_or(&[])
    }

    /// Direct dependencies, empty when absent.
    pub fn dependencies(&self) -> &[Dependency] {
        self.insight
            .as_ref()
            .and_then(|i| i.dependencies.as_deref())
            .unwrap_or(&[])
    }

    /// Declared licenses, empty when absent.
    pub fn licenses(&self) -> &[License] {
        self.insight
            .as_ref()
            .and_then(|i| i.licenses.as_ref())
            .and_then(|l| l.licenses.as_deref())
            .unwrap_or(&[])
    }

    /// The first license id, if the backend reported one.
    pub fn primary_license(&self) -> Option<&str> {
        self.licenses().first().and_then(|l| l.license_id.as_deref())
    }

    /// The first project insight. Only this one is displayed.
    pub fn primary_project(&self) -> Option<&ProjectInsight> {
        self.insight
            .as_ref()
            .and_then(|i| i.project_insights.as_ref())
            .and_then(|p| p.first())
    }

    /// Scorecard of the primary project.
    pub fn scorecard(&self) -> Option<&Scorecard> {
        self.primary_project().and_then(|p| p.scorecard.as_ref())
    }

    /// Overall scorecard score of the primary project.
    pub fn security_score(&self) -> Option<f64> {
        self.scorecard().and_then(|s| s.score)
    }
}

/// Accept counts as JSON numbers or numeric strings (`"66020"`).
///
/// Anything unparseable becomes `None` rather than a deserialization error.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(serde_json::Value::String(s)) => parse_leading_digits(&s),
        _ => None,
    })
}

/// Accept check scores as JSON numbers or numeric strings.
///
/// Fractional scores are kept; anything else becomes `None`.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parse the leading run of ASCII digits, ignoring surrounding whitespace.
fn parse_leading_digits(s: &str) -> Option<u64> {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
