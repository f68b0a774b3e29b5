//! Terminal styling for command output, built on anstyle.

use std::io::IsTerminal;

use anstyle::{AnsiColor, Color, Effects, Style};

/// Renders styled text, or plain text when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Color is on for terminals unless `--no-color` or `NO_COLOR` says otherwise.
    pub fn detect(no_color: bool) -> Self {
        let enabled = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Self { enabled }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(self, text: &str, style: Style) -> String {
        if self.enabled {
            format!("{}{}{}", style.render(), text, style.render_reset())
        } else {
            text.to_string()
        }
    }

    pub fn bold(self, text: &str) -> String {
        self.paint(text, Style::new().effects(Effects::BOLD))
    }

    pub fn heading(self, text: &str) -> String {
        self.paint(text, Style::new().effects(Effects::BOLD | Effects::UNDERLINE))
    }

    pub fn dimmed(self, text: &str) -> String {
        self.paint(text, Style::new().effects(Effects::DIMMED))
    }

    pub fn cyan(self, text: &str) -> String {
        self.paint(text, fg(AnsiColor::Cyan))
    }

    pub fn green(self, text: &str) -> String {
        self.paint(text, fg(AnsiColor::Green))
    }

    pub fn yellow(self, text: &str) -> String {
        self.paint(text, fg(AnsiColor::Yellow))
    }
}

fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}
