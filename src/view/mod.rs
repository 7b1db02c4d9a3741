//! TUI rendering and terminal management (impure shell)

mod cards;
mod format;
mod page;
mod styles;

pub use cards::PERSISTENT_FAILURE_HINT;
pub use format::{format_count, format_published, format_score};
pub use page::{buffer_to_string, page_height, render_page, PageOptions, PageViewport};
pub use styles::{ColorConfig, PageStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::integration::{self, PageOutcome};
use crate::model::SanitizedDisplayIdentifier;
use crate::source::DataSource;
use crate::state::{handle_action, AppState, PageMetrics};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// The package a run displays, exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Ecosystem as typed.
    pub ecosystem: String,
    /// Package name as typed.
    pub name: String,
    /// Version as typed.
    pub version: String,
}

impl PageRequest {
    /// Request for the given raw identifiers.
    pub fn new(
        ecosystem: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Validate, fetch and check this request against `source`.
    pub fn load(&self, source: &dyn DataSource) -> PageOutcome {
        integration::load_page(source, &self.ecosystem, &self.name, &self.version)
    }

    /// Sanitized terminal window title.
    pub fn title(&self) -> String {
        integration::page_title(&self.name, &self.version)
    }

    /// Sanitized one-line description.
    pub fn description(&self) -> String {
        integration::page_description(&self.name, &self.version)
    }
}

/// Display settings carried from the resolved configuration into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    /// Whether colours are used.
    pub colors: ColorConfig,
    /// Dependencies listed before expansion.
    pub dependency_preview: usize,
    /// Scorecard checks listed.
    pub scorecard_preview: usize,
}

impl ViewSettings {
    /// Settings from the resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            colors: ColorConfig::from_no_color(config.no_color),
            dependency_preview: config.dependency_preview,
            scorecard_preview: config.scorecard_preview,
        }
    }

    fn page_options(&self, show_all_dependencies: bool) -> PageOptions {
        PageOptions {
            styles: PageStyles::with_color_config(self.colors),
            dependency_preview: self.dependency_preview,
            scorecard_preview: self.scorecard_preview,
            show_all_dependencies,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&ResolvedConfig::default())
    }
}

const KEY_HINTS: &str = " j/k scroll  PgUp/PgDn page  g/G top/bottom  d dependencies  q quit";

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    settings: ViewSettings,
    /// Geometry of the last drawn frame, used to resolve relative scrolls
    last_metrics: PageMetrics,
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already initialised terminal.
    pub fn with_terminal(terminal: Terminal<B>, app_state: AppState, settings: ViewSettings) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            settings,
            last_metrics: PageMetrics {
                content_height: 0,
                viewport_height: 0,
                dependency_preview: settings.dependency_preview,
            },
        }
    }

    /// Current application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws only after input or a resize.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        while !self.app_state.should_quit {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    self.handle_key(key);
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!("Handling resize to {}x{}", width, height);
                    self.draw()?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Handle one keyboard event. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Release events would double every keypress on some platforms
        if key.kind == KeyEventKind::Release {
            return self.app_state.should_quit;
        }

        if let Some(action) = self.key_bindings.get(key) {
            debug!(?action, "Key action");
            handle_action(&mut self.app_state, action, self.last_metrics);
        }

        self.app_state.should_quit
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let options = self
            .settings
            .page_options(self.app_state.show_all_dependencies);
        let state = &mut self.app_state;
        let metrics = &mut self.last_metrics;

        self.terminal.draw(|frame| {
            let [body, footer] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

            let page = render_page(state.outcome(), &options, body.width);
            let content_height = usize::from(page.area.height);
            let viewport_height = usize::from(body.height);
            state.clamp_scroll(content_height, viewport_height);

            *metrics = PageMetrics {
                content_height,
                viewport_height,
                dependency_preview: options.dependency_preview,
            };

            frame.render_widget(PageViewport::new(&page, state.scroll_offset), body);
            frame.render_widget(
                footer_line(&options.styles, state.scroll_offset, content_height, viewport_height),
                footer,
            );
        })?;

        Ok(())
    }
}

/// Key hints followed by the visible line range.
fn footer_line(
    styles: &PageStyles,
    scroll: usize,
    content_height: usize,
    viewport_height: usize,
) -> Paragraph<'static> {
    let last_visible = (scroll + viewport_height).min(content_height);
    let position = format!("{}-{}/{} ", scroll + 1, last_visible, content_height);
    Paragraph::new(Line::from(vec![
        Span::styled(KEY_HINTS, styles.muted),
        Span::raw("  "),
        Span::styled(position, styles.label),
    ]))
}

/// Draw a placeholder while the data source is working.
pub fn draw_loading<B: Backend>(
    terminal: &mut Terminal<B>,
    request: &PageRequest,
    settings: &ViewSettings,
) -> Result<(), TuiError> {
    let styles = PageStyles::with_color_config(settings.colors);
    let display = SanitizedDisplayIdentifier::new(&request.name, &request.version);
    let lines = vec![
        Line::styled(
            format!("Loading {}@{}...", display.name(), display.version()),
            styles.muted,
        ),
        Line::styled(request.description(), styles.muted),
    ];
    terminal.draw(|frame| {
        frame.render_widget(Paragraph::new(lines.clone()), frame.area());
    })?;
    Ok(())
}

/// Render the page for `request` as plain text, `width` columns wide.
///
/// Used by `--plain`: no terminal setup, no colours, the full page height.
pub fn render_plain(outcome: &PageOutcome, settings: &ViewSettings, width: u16) -> String {
    let options = settings.page_options(false);
    buffer_to_string(&render_page(outcome, &options, width))
}

/// Initialize the terminal, load the page and run the TUI until quit.
///
/// The loading placeholder is on screen while the data source works.
/// The terminal is restored on every exit path.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_page(
    source: &dyn DataSource,
    request: &PageRequest,
    settings: ViewSettings,
) -> Result<(), TuiError> {
    let result = setup_terminal(&request.title()).and_then(|mut terminal| {
        draw_loading(&mut terminal, request, &settings)?;
        let outcome = request.load(source);
        TuiApp::with_terminal(terminal, AppState::new(outcome), settings).run()
    });

    // Always restore terminal state
    restore_terminal()?;

    result
}

fn setup_terminal(title: &str) -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(SetTitle(title))?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserMessage;
    use crate::source::MockSource;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn express_app(width: u16, height: u16) -> TuiApp<TestBackend> {
        let outcome = PageRequest::new("npm", "express", "4.10.5").load(&MockSource::instant());
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        TuiApp::with_terminal(terminal, AppState::new(outcome), ViewSettings::default())
    }

    fn screen(app: &TuiApp<TestBackend>) -> String {
        buffer_to_string(app.terminal().backend().buffer())
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn first_frame_shows_header_and_footer() {
        let mut app = express_app(100, 30);
        app.draw().unwrap();

        let text = screen(&app);
        assert!(text.starts_with("express"), "{}", text);
        assert!(text.contains("q quit"), "{}", text);
    }

    #[test]
    fn scrolling_moves_window() {
        let mut app = express_app(100, 20);
        app.draw().unwrap();

        app.handle_key(key(KeyCode::Char('j')));
        app.draw().unwrap();

        assert_eq!(app.app_state().scroll_offset, 1);
        assert!(screen(&app).starts_with("Ecosystem: NPM"));
    }

    #[test]
    fn end_then_home() {
        let mut app = express_app(100, 20);
        app.draw().unwrap();

        app.handle_key(key(KeyCode::End));
        let bottom = app.app_state().scroll_offset;
        assert!(bottom > 0);

        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.app_state().scroll_offset, 0);
    }

    #[test]
    fn toggle_then_collapse_at_bottom_clamps_scroll() {
        let mut app = express_app(100, 20);
        app.draw().unwrap();

        app.handle_key(key(KeyCode::Char('d')));
        app.draw().unwrap();
        assert!(app.app_state().show_all_dependencies);

        app.handle_key(key(KeyCode::End));
        let expanded_bottom = app.app_state().scroll_offset;

        app.handle_key(key(KeyCode::Char('d')));
        app.draw().unwrap();
        assert!(!app.app_state().show_all_dependencies);
        assert_eq!(app.app_state().scroll_offset, expanded_bottom - 14);
    }

    #[test]
    fn quit_keys_end_the_loop() {
        let mut app = express_app(80, 20);
        assert!(!app.handle_key(key(KeyCode::Char('x'))));
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = express_app(80, 20);
        app.draw().unwrap();
        let mut release = key(KeyCode::Char('j'));
        release.kind = KeyEventKind::Release;

        app.handle_key(release);
        assert_eq!(app.app_state().scroll_offset, 0);
    }

    #[test]
    fn failure_frame_shows_message() {
        let outcome = PageOutcome::Failed {
            message: UserMessage::RateLimited,
        };
        let terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let mut app = TuiApp::with_terminal(terminal, AppState::new(outcome), ViewSettings::default());
        app.draw().unwrap();

        let text = screen(&app);
        assert!(text.contains("Unable to Load Package"));
        assert!(text.contains(UserMessage::RateLimited.as_str()));
    }

    #[test]
    fn loading_frame_uses_sanitized_name() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let request = PageRequest::new("npm", "<script>", "1.0.0");
        draw_loading(&mut terminal, &request, &ViewSettings::default()).unwrap();

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.starts_with("Loading script@1.0.0..."), "{}", text);
        assert!(text.contains("Security information for script 1.0.0"), "{}", text);
        assert!(!text.contains('<'));
    }

    #[test]
    fn plain_render_is_full_height() {
        let outcome = PageRequest::new("npm", "express", "4.10.5").load(&MockSource::instant());
        let settings = ViewSettings::default();
        let text = render_plain(&outcome, &settings, 100);
        assert_eq!(
            text.lines().count(),
            page_height(&outcome, &settings.page_options(false), 100)
        );
    }
}
