/*!
batch.rs - parsing of the `do-what-it-says` batch file.

Format: one `command,argument` record per line. Only the first two
comma-separated fields are used. Fields are taken as written (only a
trailing `\r` is removed), so a whitespace-only command is dispatched and
rejected like any other unknown command. Lines with an empty command and
lines naming the batch command itself are dropped.
*/

use super::command::Command;
use super::dispatch::Invocation;

/// Turn batch file text into the invocations to dispatch, in file order.
pub fn parse_batch(text: &str) -> Vec<Invocation> {
    text.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Invocation> {
    let mut fields = line.trim_end_matches('\r').split(',');
    let command = fields.next()?;
    if command.is_empty() {
        return None;
    }
    let command = Command::parse(command);
    // No recursion into the batch command itself.
    if command == Command::DoWhatItSays {
        return None;
    }
    let argument = fields.next().map(unquote).unwrap_or("");
    Some(Invocation::new(command, argument))
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
