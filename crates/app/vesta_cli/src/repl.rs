//! Interactive chat loop.
//!
//! Enter submits the pending input. A line ending in `\` keeps composing: the
//! backslash becomes a newline and the next line is appended. `/quit` on an
//! empty buffer ends the session, as does end of input.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use vesta_core::{ChatSession, ChatTransport};

use crate::Result;
use crate::render::TranscriptView;

const PROMPT: &str = "> ";
const CONTINUATION_PROMPT: &str = ". ";
const LOADING: &str = "Loading...";
const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Runs a chat session until the input is exhausted or the user quits.
///
/// Returns the finished session so callers can inspect the transcript.
pub async fn run<R, W, T>(mut input: R, out: &mut W, transport: &T) -> Result<ChatSession>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    T: ChatTransport + ?Sized,
{
    let mut session = ChatSession::new();
    let mut view = TranscriptView::new();
    let mut buf = Vec::new();

    writeln!(out, "VESTA")?;
    view.show_new(session.transcript(), out)?;

    loop {
        let prompt = if session.pending_input().is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        };
        write!(out, "{prompt}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            writeln!(out)?;
            break;
        }
        let line = decode_line(&buf);

        if session.pending_input().is_empty() && QUIT_COMMANDS.contains(&line.trim()) {
            break;
        }

        if let Some(partial) = line.strip_suffix('\\') {
            session.push_input(partial);
            session.push_input("\n");
            continue;
        }
        session.push_input(&line);

        let Some(messages) = session.begin_submit() else {
            // Nothing visible is pending; drop it so the next line starts clean.
            session.set_input("");
            continue;
        };
        view.show_new(session.transcript(), out)?;
        writeln!(out, "{LOADING}")?;
        out.flush()?;

        let outcome = transport.send_transcript(&messages).await;
        session.finish_submit(outcome);
        view.show_new(session.transcript(), out)?;
    }

    log::debug!(
        "session ended with {} messages",
        session.transcript().len()
    );
    Ok(session)
}

/// Strips the line terminator; invalid UTF-8 is replaced rather than rejected.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let line = String::from_utf8_lossy(raw);
    if let std::borrow::Cow::Owned(_) = line {
        log::warn!("input line was not valid UTF-8; invalid bytes replaced");
    }
    line.into_owned()
}
