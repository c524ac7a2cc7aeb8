use crossterm::tty::IsTty;
use ratatui::{
    Terminal, TerminalOptions, Viewport,
    prelude::*,
    widgets::{Gauge, Paragraph},
};
use std::io::{self, Stdout};

/// Receives one update per processed item of a bulk operation.
///
/// Purely observational: implementations must not fail the operation.
pub trait Progress {
    fn start(&mut self, title: &str, total: usize);
    fn advance(&mut self, item: &str);
    fn finish(&mut self);
}

/// Emits progress as `debug` events only.
#[derive(Debug, Default)]
pub struct LogProgress {
    title: String,
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn start(&mut self, title: &str, total: usize) {
        self.title = title.to_string();
        self.total = total;
        self.done = 0;
        tracing::debug!(task = %self.title, total, "started");
    }

    fn advance(&mut self, item: &str) {
        self.done += 1;
        tracing::debug!(task = %self.title, done = self.done, total = self.total, item);
    }

    fn finish(&mut self) {
        tracing::debug!(task = %self.title, done = self.done, "finished");
    }
}

/// Two-line inline gauge drawn below the cursor with ratatui.
pub struct GaugeProgress {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    title: String,
    total: usize,
    done: usize,
}

impl GaugeProgress {
    fn new() -> Self {
        Self {
            terminal: None,
            title: String::new(),
            total: 0,
            done: 0,
        }
    }

    fn draw(&mut self, item: &str) {
        let Some(terminal) = self.terminal.as_mut() else {
            return;
        };
        let ratio = if self.total == 0 {
            1.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        };
        let label = format!("{}/{}", self.done, self.total);
        let title = self.title.as_str();
        let result = terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1)])
                .split(frame.area());
            frame.render_widget(Paragraph::new(format!("{title}  {item}")), rows[0]);
            frame.render_widget(
                Gauge::default()
                    .gauge_style(Style::default().fg(Color::Green))
                    .ratio(ratio)
                    .label(label),
                rows[1],
            );
        });
        if let Err(e) = result {
            // Drawing is best effort; stop trying after the first failure.
            tracing::debug!(error = %e, "progress gauge disabled");
            self.terminal = None;
        }
    }
}

impl Progress for GaugeProgress {
    fn start(&mut self, title: &str, total: usize) {
        self.title = title.to_string();
        self.total = total;
        self.done = 0;
        self.terminal = Terminal::with_options(
            CrosstermBackend::new(io::stdout()),
            TerminalOptions {
                viewport: Viewport::Inline(2),
            },
        )
        .map_err(|e| tracing::debug!(error = %e, "cannot open progress gauge"))
        .ok();
        self.draw("");
    }

    fn advance(&mut self, item: &str) {
        self.done += 1;
        self.draw(item);
        tracing::debug!(task = %self.title, done = self.done, total = self.total, item);
    }

    fn finish(&mut self) {
        if self.terminal.take().is_some() {
            println!();
        }
    }
}

/// Gauge on an interactive stdout, log events otherwise.
pub fn for_terminal(quiet: bool) -> Box<dyn Progress> {
    if !quiet && io::stdout().is_tty() {
        Box::new(GaugeProgress::new())
    } else {
        Box::new(LogProgress::default())
    }
}
