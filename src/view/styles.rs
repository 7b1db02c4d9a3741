//! Page styling configuration.
//!
//! One place for every colour the page uses, so `--no-color` / `NO_COLOR`
//! can switch them all off together.

use crate::model::{CheckStatus, ScoreBand};
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colour output is enabled.
///
/// Resolved from the `no_color` setting, which already folds in the
/// `--no-color` flag, the `NO_COLOR` environment variable and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colours off when `no_color` is set.
    pub fn from_no_color(no_color: bool) -> Self {
        Self { enabled: !no_color }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ===== PageStyles =====

/// Styles for the package page.
///
/// With colours disabled every style keeps its modifiers (bold, dim) but
/// drops the foreground colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStyles {
    /// Package name.
    pub title: Style,
    /// Version and license badges.
    pub badge: Style,
    /// Card titles and emphasised values.
    pub label: Style,
    /// Secondary text.
    pub muted: Style,
    /// Card borders.
    pub border: Style,
    /// Advisory ids and links.
    pub identifier: Style,
    /// Failure heading.
    pub error: Style,
    good: Style,
    fair: Style,
    poor: Style,
}

impl PageStyles {
    /// Styles honouring `config`; plain when colours are off.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let color = |c: Color| {
            if config.colors_enabled() {
                Style::default().fg(c)
            } else {
                Style::default()
            }
        };

        Self {
            title: color(Color::White).add_modifier(Modifier::BOLD),
            badge: color(Color::Cyan).add_modifier(Modifier::BOLD),
            label: color(Color::Cyan).add_modifier(Modifier::BOLD),
            muted: color(Color::Gray).add_modifier(Modifier::DIM),
            border: color(Color::DarkGray),
            identifier: color(Color::Yellow),
            error: color(Color::Red).add_modifier(Modifier::BOLD),
            good: color(Color::Green),
            fair: color(Color::Yellow),
            poor: color(Color::Red),
        }
    }

    /// Colour for an overall scorecard score.
    pub fn for_band(&self, band: ScoreBand) -> Style {
        match band {
            ScoreBand::Good => self.good,
            ScoreBand::Fair => self.fair,
            ScoreBand::Poor => self.poor,
        }
    }

    /// Colour for a single scorecard check.
    pub fn for_check(&self, status: CheckStatus) -> Style {
        match status {
            CheckStatus::Pass => self.good,
            CheckStatus::Unknown => self.muted,
            CheckStatus::Fail => self.poor,
        }
    }

    /// Colour for a vulnerability count: anything above zero is bad news.
    pub fn for_vulnerability_count(&self, count: usize) -> Style {
        if count == 0 {
            self.good
        } else {
            self.poor
        }
    }
}

impl Default for PageStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====
