//! Page sections.
//!
//! Each builder turns part of a [`PackageInsight`] into a [`Card`]: a title
//! plus pre-styled lines. Layout and borders are the page's job.

use super::format::{
    format_count, format_published, format_score, truncate_to_width, wrap_words,
};
use super::styles::PageStyles;
use crate::model::{
    CheckStatus, PackageIdentifier, PackageInsight, SanitizedDisplayIdentifier, ScoreBand,
    UserMessage,
};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

/// Shown under the message on the failure page.
pub const PERSISTENT_FAILURE_HINT: &str =
    "If this problem persists, please try again later or contact support.";

/// A titled block of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub lines: Vec<Line<'static>>,
}

impl Card {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    /// Rows this card occupies including its border.
    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX - 2)
            .saturating_add(2)
    }
}

/// One of the four summary figures under the header.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: Span<'static>,
}

/// Options that shape the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOptions {
    /// Inner width available to card text.
    pub width: usize,
    pub dependency_preview: usize,
    pub scorecard_preview: usize,
    pub show_all_dependencies: bool,
}

// ===== Header =====

pub fn header_lines(id: &PackageIdentifier, styles: &PageStyles) -> Vec<Line<'static>> {
    let display = SanitizedDisplayIdentifier::new(id.name(), id.version());
    vec![
        Line::from(vec![
            Span::styled(id.name().to_string(), styles.title),
            Span::raw("  "),
            Span::styled(format!(" {} ", id.version()), styles.badge.add_modifier(Modifier::REVERSED)),
        ]),
        Line::from(vec![
            Span::styled("Ecosystem: ", styles.muted),
            Span::styled(id.ecosystem().to_uppercase(), styles.badge),
        ]),
        Line::styled(display.description(), styles.muted),
    ]
}

pub fn stat_cards(insight: &PackageInsight, styles: &PageStyles) -> [StatCard; 4] {
    let vulnerabilities = insight.vulnerabilities().len();
    [
        StatCard {
            label: "Vulnerabilities",
            value: Span::styled(
                vulnerabilities.to_string(),
                styles.for_vulnerability_count(vulnerabilities),
            ),
        },
        StatCard {
            label: "Direct Dependencies",
            value: Span::styled(insight.dependencies().len().to_string(), styles.badge),
        },
        StatCard {
            label: "License",
            value: Span::styled(
                insight.primary_license().unwrap_or("Unknown").to_string(),
                styles.badge,
            ),
        },
        StatCard {
            label: "Security Score",
            value: match insight.security_score() {
                Some(score) => Span::styled(
                    format_score(score),
                    styles.for_band(ScoreBand::from_score(score)),
                ),
                None => Span::styled("N/A", styles.muted),
            },
        },
    ]
}

// ===== Left column =====

pub fn vulnerabilities_card(
    insight: &PackageInsight,
    styles: &PageStyles,
    options: &CardOptions,
) -> Card {
    let vulnerabilities = insight.vulnerabilities();
    let mut card = Card::new(format!("Vulnerabilities ({})", vulnerabilities.len()));

    if vulnerabilities.is_empty() {
        card.push(Line::styled("No known vulnerabilities.", styles.muted));
        return card;
    }

    for (i, vuln) in vulnerabilities.iter().enumerate() {
        if i > 0 {
            card.push(Line::default());
        }

        let mut heading = vec![
            Span::styled("● ", styles.error),
            Span::styled(vuln.id_str().unwrap_or("Unknown").to_string(), styles.identifier),
        ];
        if let Some(risk) = vuln.primary_severity().and_then(|s| s.risk_label()) {
            heading.push(Span::raw("  "));
            heading.push(Span::styled(format!("[{}]", risk), styles.error));
        }
        card.push(Line::from(heading));

        if let Some(summary) = vuln.summary.as_deref() {
            card.push(format!(
                "  {}",
                truncate_to_width(summary, options.width.saturating_sub(2))
            ));
        }

        let aliases = vuln.alias_values();
        if !aliases.is_empty() {
            card.push(Line::from(vec![
                Span::styled("  Aliases: ", styles.muted),
                Span::raw(truncate_to_width(
                    &aliases.join(", "),
                    options.width.saturating_sub(11),
                )),
            ]));
        }

        if let Some(kind) = vuln.primary_severity().and_then(|s| s.kind.as_deref()) {
            card.push(Line::from(vec![
                Span::styled("  Severity: ", styles.muted),
                Span::raw(kind.to_string()),
            ]));
        }

        if let Some(published) = vuln.published_at.as_deref() {
            card.push(Line::from(vec![
                Span::styled("  Published: ", styles.muted),
                Span::raw(format_published(published)),
            ]));
        }
    }

    card
}

pub fn dependencies_card(
    insight: &PackageInsight,
    styles: &PageStyles,
    options: &CardOptions,
) -> Card {
    let dependencies = insight.dependencies();
    let mut card = Card::new(format!("Dependencies ({})", dependencies.len()));

    if dependencies.is_empty() {
        card.push(Line::styled("No dependencies found.", styles.muted));
        return card;
    }

    let shown = if options.show_all_dependencies {
        dependencies.len()
    } else {
        dependencies.len().min(options.dependency_preview)
    };

    let name_width = dependencies[..shown]
        .iter()
        .map(|d| d.name().unwrap_or("Unknown").len())
        .max()
        .unwrap_or(0);

    for dep in &dependencies[..shown] {
        card.push(Line::from(vec![
            Span::raw(format!(
                "• {:<width$}  ",
                dep.name().unwrap_or("Unknown"),
                width = name_width
            )),
            Span::styled(dep.version.as_deref().unwrap_or("unknown").to_string(), styles.muted),
        ]));
    }

    if dependencies.len() > options.dependency_preview {
        let toggle = if options.show_all_dependencies {
            "Show Less".to_string()
        } else {
            format!("Show {} More", dependencies.len() - options.dependency_preview)
        };
        card.push(Line::default());
        card.push(Line::from(vec![
            Span::styled("[d] ", styles.muted),
            Span::styled(toggle, styles.label),
        ]));
    }

    card
}

pub fn license_card(insight: &PackageInsight, styles: &PageStyles) -> Card {
    let mut card = Card::new("License");
    let licenses = insight.licenses();

    if licenses.is_empty() {
        card.push(Line::styled("No license information available.", styles.muted));
        return card;
    }

    for license in licenses {
        let id = license.license_id.as_deref().unwrap_or("Unknown");
        card.push(Line::styled(format!(" {} ", id), styles.badge.add_modifier(Modifier::REVERSED)));
        card.push(Line::from(vec![
            Span::raw("This package is distributed under the "),
            Span::styled(id.to_string(), styles.label),
            Span::raw(" license."),
        ]));
    }

    card
}

// ===== Right column =====

pub fn scorecard_card(insight: &PackageInsight, styles: &PageStyles, options: &CardOptions) -> Card {
    let mut card = Card::new("Security Scorecard");

    let Some(scorecard) = insight.scorecard() else {
        card.push(Line::styled("No scorecard data available.", styles.muted));
        return card;
    };

    card.push(Line::from(vec![
        Span::styled("OSSF Score ", styles.muted),
        Span::styled(
            format!("{}/10", format_score(scorecard.overall())),
            styles.for_band(scorecard.band()).add_modifier(Modifier::BOLD),
        ),
    ]));
    card.push(Line::styled(
        format!(
            "{}/{} checks passed",
            scorecard.passed_checks(),
            scorecard.checks().len()
        ),
        styles.label,
    ));

    let checks = scorecard.checks();
    if checks.is_empty() {
        return card;
    }

    card.push(Line::default());
    for check in checks.iter().take(options.scorecard_preview) {
        let (marker, status) = match check.status() {
            CheckStatus::Pass => ("✓", "pass"),
            CheckStatus::Unknown => ("?", "unknown"),
            CheckStatus::Fail => ("✗", "fail"),
        };
        let style = styles.for_check(check.status());
        card.push(Line::from(vec![
            Span::styled(format!("{} ", marker), style),
            Span::raw(check.name.as_deref().unwrap_or("Unknown").to_string()),
            Span::styled(format!("  ({})", status), style),
        ]));
        if let Some(reason) = check.reason.as_deref() {
            card.push(Line::styled(
                format!("  {}", truncate_to_width(reason, options.width.saturating_sub(2))),
                styles.muted,
            ));
        }
    }

    if checks.len() > options.scorecard_preview {
        card.push(Line::styled(
            format!(
                "Showing {} of {} checks",
                options.scorecard_preview,
                checks.len()
            ),
            styles.muted,
        ));
    }

    card
}

/// `None` when the response has no project.
pub fn repository_card(insight: &PackageInsight, styles: &PageStyles) -> Option<Card> {
    let project = insight.primary_project()?.project.as_ref()?;

    let mut card = Card::new(match project.name.as_deref() {
        Some(name) => format!("Repository: {}", name),
        None => "Repository".to_string(),
    });

    let figure = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), styles.muted),
            Span::styled(value, styles.badge),
        ])
    };

    card.push(figure("Stars", format_count(project.stars.unwrap_or(0))));
    card.push(figure("Forks", format_count(project.forks.unwrap_or(0))));
    card.push(figure(
        "Open Issues",
        format_count(project.issues.as_ref().and_then(|i| i.open).unwrap_or(0)),
    ));
    if let Some(url) = project.url.as_deref() {
        card.push(Line::from(vec![
            Span::styled(format!("{:<12}", "URL"), styles.muted),
            Span::styled(url.to_string(), styles.identifier.add_modifier(Modifier::UNDERLINED)),
        ]));
    }

    Some(card)
}

/// `None` when the response carries no publish date.
pub fn published_card(insight: &PackageInsight) -> Option<Card> {
    let raw = insight.package_published_at.as_deref()?;
    let mut card = Card::new("Published");
    card.push(format_published(raw));
    Some(card)
}

// ===== Failure =====

pub fn failure_card(message: UserMessage, styles: &PageStyles, options: &CardOptions) -> Card {
    let mut card = Card::new("Error");
    card.push(Line::styled("Unable to Load Package", styles.error));
    card.push(Line::default());
    for line in wrap_words(message.as_str(), options.width) {
        card.push(line);
    }
    card.push(Line::default());
    for line in wrap_words(PERSISTENT_FAILURE_HINT, options.width) {
        card.push(Line::styled(line, styles.muted));
    }
    card
}
