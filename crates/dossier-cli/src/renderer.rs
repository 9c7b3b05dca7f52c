//! Terminal rendering of the markdown produced by the core display types.
//!
//! Rich output colors headings, status lines and monitoring checklist
//! entries; plain output prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// How a single line of output is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Heading,
    Failure,
    CompletedStep,
    LockedStep,
    Borrowed,
    Text,
}

impl LineKind {
    fn of(line: &str) -> Self {
        if line.starts_with('#') {
            LineKind::Heading
        } else if line.starts_with("Error:") {
            LineKind::Failure
        } else if line.starts_with("- ✓") {
            LineKind::CompletedStep
        } else if line.starts_with("- ○") {
            LineKind::LockedStep
        } else if line.contains('⇢') {
            LineKind::Borrowed
        } else {
            LineKind::Text
        }
    }

    /// ANSI color code, or `None` for lines left to termimad.
    fn ansi(self) -> Option<u8> {
        match self {
            LineKind::Heading => Some(34),
            LineKind::Failure => Some(31),
            LineKind::CompletedStep => Some(32),
            LineKind::LockedStep => Some(90),
            LineKind::Borrowed => Some(33),
            LineKind::Text => None,
        }
    }
}

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                match LineKind::of(line).ansi() {
                    Some(code) => println!("\x1b[{code}m{line}\x1b[0m"),
                    None => {
                        self.skin.print_inline(line);
                        println!();
                    }
                }
            }
        } else {
            print!("{}", markdown);
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
