//! Transcript rendering.

use std::io::Write;

use vesta_core::{Message, Role};

fn label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "vesta",
        Role::System => "system",
    }
}

/// Formats one entry as `label › content`, indenting continuation lines.
pub fn render_message(msg: &Message) -> String {
    let prefix = format!("{:>6} › ", label(msg.role));
    let indent = " ".repeat(prefix.chars().count());
    let mut out = String::new();
    for (i, line) in msg.content.split('\n').enumerate() {
        if i == 0 {
            out.push_str(&prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

/// Tracks how much of the transcript has been printed.
///
/// Each call to [`TranscriptView::show_new`] prints only entries appended
/// since the previous call, so the newest entry always ends up at the bottom
/// of the terminal.
#[derive(Debug, Default)]
pub struct TranscriptView {
    rendered: usize,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_new<W: Write>(&mut self, transcript: &[Message], out: &mut W) -> std::io::Result<()> {
        for msg in transcript.iter().skip(self.rendered) {
            writeln!(out, "{}", render_message(msg))?;
        }
        self.rendered = transcript.len();
        out.flush()
    }
}
