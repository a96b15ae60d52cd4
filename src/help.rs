use crate::registry::{FlagGroup, FlagRegistry};

pub const DEFAULT_HELP_INDENT: usize = 26;
pub const DEFAULT_HELP_WIDTH: usize = 100;
pub const MIN_TEXT_WIDTH: usize = 20;

/// Column geometry of rendered help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Column where descriptions and their continuation lines start.
    pub indent: usize,
    /// Total line width, indentation included.
    pub width: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            indent: DEFAULT_HELP_INDENT,
            width: DEFAULT_HELP_WIDTH,
        }
    }
}

impl HelpLayout {
    #[must_use]
    pub fn text_width(&self) -> usize {
        self.width.saturating_sub(self.indent).max(MIN_TEXT_WIDTH)
    }
}

/// Renders every registered flag, grouped by functional area.
#[must_use]
pub fn render_help(registry: &FlagRegistry, layout: HelpLayout) -> String {
    let mut out = String::new();
    let mut current: Option<FlagGroup> = None;
    let padding = " ".repeat(layout.indent);

    for entry in registry.entries() {
        if current != Some(entry.group()) {
            current = Some(entry.group());
            out.push_str(entry.group().title());
            out.push_str(":\n\n");
        }

        let label = format!(" --{}:", entry.long_name());
        let mut lines = wrap_words(entry.description(), layout.text_width()).into_iter();
        if label.len() < layout.indent {
            out.push_str(&format!("{label:<width$}", width = layout.indent));
            out.push_str(lines.next().as_deref().unwrap_or_default());
        } else {
            out.push_str(&label);
        }
        out.push('\n');
        for line in lines {
            out.push_str(&padding);
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Greedy word wrap. Words wider than `width` get a line of their own.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
