//! Interactive console session

use std::io::{BufRead, Write};

use chat_core::{ChatBot, ChatLogEntry};
use chat_server::ChatLogStore;

/// Drop trailing `!` and `.` so "hello!" and "hello" read the same
pub fn normalize_input(line: &str) -> &str {
    line.trim().trim_end_matches(['!', '.']).trim_end()
}

/// Run a session until EOF or the quit word
///
/// The quit word is answered before the session ends. When `log` is set
/// every exchange is appended to it; a failed write is reported and the
/// session goes on. Returns the number of exchanges.
pub fn run_session<R: BufRead, W: Write>(
    bot: &ChatBot,
    log: Option<&ChatLogStore>,
    mut input: R,
    out: &mut W,
) -> std::io::Result<usize> {
    writeln!(out, "{}", bot.welcome())?;

    let mut exchanges = 0;
    let mut line = String::new();
    loop {
        write!(out, "{}", bot.prompt())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(out)?;
            break;
        }

        let text = normalize_input(&line);
        if text.is_empty() {
            continue;
        }

        let reply = bot.reply(text);
        writeln!(out, "{reply}")?;
        exchanges += 1;

        if let Some(store) = log {
            if let Err(e) = store.append(&ChatLogEntry::new(text, reply.as_str())) {
                tracing::warn!(error = %e, "Failed to log exchange");
            }
        }

        if bot.is_quit(text) {
            break;
        }
    }

    Ok(exchanges)
}
