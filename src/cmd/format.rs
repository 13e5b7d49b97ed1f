/*!
format.rs

Terminal formatting for `liri` output.

Every formatter returns a `String`; callers print it and append the very
same string to the log file, so the log mirrors what the user saw
(including ANSI colour codes when colour is on).

Public API Summary:
  - StyleOptions::detect() / StyleOptions::plain()
  - color(role, text, &StyleOptions) -> String
  - posts_block(&[Post], &StyleOptions) -> String
  - track_block(&Track, &StyleOptions) -> String
  - movie_block(&Movie, &StyleOptions) -> String
  - invocation_entry(command, argument, &StyleOptions) -> String
  - failure_marker(&StyleOptions) -> String
  - help_text(&StyleOptions) -> String
*/

use std::io::IsTerminal;

use super::command::Command;
use crate::services::{Movie, Post, Track};

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    /// Colour unless `NO_COLOR` is set or stdout is not a terminal.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        if no_color || !std::io::stdout().is_terminal() {
            return Self::plain();
        }
        StyleOptions { use_color: true }
    }

    pub fn plain() -> Self {
        StyleOptions { use_color: false }
    }
}

/* -------------------------------------------------------------------------- */
/* Color                                                                      */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    /// Field labels.
    Label,
    /// The headline value (song / movie title).
    Highlight,
    /// Command names in the help block.
    Command,
    /// Placeholder arguments in the help block.
    Argument,
    Error,
    /// Generic failure marker.
    Failure,
    /// Invocation header in the log.
    Banner,
    Underline,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Label => "38;2;0;0;77",
        Role::Highlight => "1;107;30",
        Role::Command => "1;32",
        Role::Argument => "1;34",
        Role::Error => "1;31",
        Role::Failure => "4;31",
        Role::Banner => "97;46",
        Role::Underline => "4",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/* -------------------------------------------------------------------------- */
/* Blocks                                                                     */
/* -------------------------------------------------------------------------- */

/// Label column width (labels are padded so values line up).
const LABEL_WIDTH: usize = 24;

fn field(label: &str, value: impl AsRef<str>, style: &StyleOptions) -> String {
    let padded = format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH);
    format!("{}{}\n", color(Role::Label, padded, style), value.as_ref())
}

/// Each post as a blank-line separated timestamp followed by its text.
pub fn posts_block(posts: &[Post], style: &StyleOptions) -> String {
    let mut out = String::new();
    for p in posts {
        out.push_str("\n\n");
        out.push_str(&color(Role::Label, &p.created_at, style));
        out.push('\n');
        out.push_str(&p.text);
    }
    out
}

pub fn track_block(track: &Track, style: &StyleOptions) -> String {
    let preview = track.preview_url.as_deref().unwrap_or("N/A");
    let mut out = String::from("\n\n");
    out.push_str(&field(
        "Song Title",
        color(Role::Highlight, &track.name, style),
        style,
    ));
    out.push_str(&field("Artists", track.artists.join(" "), style));
    out.push_str(&field("Album", &track.album, style));
    out.push_str(&field(
        "Preview URL",
        color(Role::Underline, preview, style),
        style,
    ));
    out
}

pub fn movie_block(movie: &Movie, style: &StyleOptions) -> String {
    let mut out = String::from("\n\n");
    out.push_str(&field(
        "Movie Title",
        color(Role::Highlight, &movie.title, style),
        style,
    ));
    out.push_str(&field("Year", &movie.year, style));
    out.push_str(&field("IMDB Rating", &movie.imdb_rating, style));
    out.push_str(&field(
        "Rotten Tomatoes Rating",
        movie.rotten_tomatoes().unwrap_or("N/A"),
        style,
    ));
    out.push_str(&field("Country where produced", &movie.country, style));
    out.push_str(&field("Language", &movie.language, style));
    out.push_str(&field("Plot", &movie.plot, style));
    out.push_str(&field("Actors", &movie.actors, style));
    out
}

/// Log entry written once per process run, before dispatching.
pub fn invocation_entry(command: &str, argument: &str, style: &StyleOptions) -> String {
    color(
        Role::Banner,
        format!("\n\nCommand:\t{command}\nOther args:\t{argument}"),
        style,
    )
}

pub const FAILURE_TEXT: &str = "This command failed";

pub fn failure_marker(style: &StyleOptions) -> String {
    color(Role::Failure, format!("\n{FAILURE_TEXT}"), style)
}

pub fn help_text(style: &StyleOptions) -> String {
    let mut lines =
        vec!["Please specify a command to run.  Valid commands are the following:".to_string()];
    for c in Command::variants() {
        let mut line = color(Role::Command, c.name(), style);
        if let Some(hint) = c.argument_hint() {
            line.push(' ');
            line.push_str(&color(Role::Argument, hint, style));
        }
        line.push_str(" - ");
        line.push_str(c.description());
        lines.push(line);
    }
    lines.join("\n")
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Rating;

    #[test]
    fn plain_style_emits_no_escapes() {
        let s = color(Role::Error, "boom", &StyleOptions::plain());
        assert_eq!(s, "boom");
    }

    #[test]
    fn colored_style_wraps_text() {
        let s = color(Role::Error, "boom", &StyleOptions { use_color: true });
        assert!(s.starts_with("\x1b[1;31m"));
        assert!(s.ends_with("boom\x1b[0m"));
    }

    #[test]
    fn posts_in_order_with_timestamps() {
        let posts = vec![
            Post {
                created_at: "t1".into(),
                text: "hello".into(),
            },
            Post {
                created_at: "t2".into(),
                text: "world".into(),
            },
        ];
        let out = posts_block(&posts, &StyleOptions::plain());
        assert_eq!(out, "\n\nt1\nhello\n\nt2\nworld");
    }

    #[test]
    fn no_posts_is_empty_block() {
        assert_eq!(posts_block(&[], &StyleOptions::plain()), "");
    }

    #[test]
    fn track_fields_aligned() {
        let t = Track {
            name: "The Sign".into(),
            artists: vec!["Ace".into(), "of".into(), "Base".into()],
            album: "Happy Nation".into(),
            preview_url: None,
        };
        let out = track_block(&t, &StyleOptions::plain());
        assert!(out.starts_with("\n\n"));
        assert!(out.contains("Song Title:             The Sign\n"));
        assert!(out.contains("Artists:                Ace of Base\n"));
        assert!(out.contains("Album:                  Happy Nation\n"));
        assert!(out.contains("Preview URL:            N/A\n"));
    }

    #[test]
    fn movie_block_uses_keyed_rating() {
        let m = Movie {
            title: "Up".into(),
            year: "2009".into(),
            imdb_rating: "8.3".into(),
            ratings: vec![Rating {
                source: "Rotten Tomatoes".into(),
                value: "98%".into(),
            }],
            country: "USA".into(),
            language: "English".into(),
            plot: "Balloons.".into(),
            actors: "Ed Asner".into(),
        };
        let out = movie_block(&m, &StyleOptions::plain());
        assert!(out.contains("Movie Title:            Up\n"));
        assert!(out.contains("Rotten Tomatoes Rating: 98%\n"));
        assert!(out.contains("Country where produced: USA\n"));
        assert!(out.ends_with("Actors:                 Ed Asner\n"));
    }

    #[test]
    fn invocation_entry_shape() {
        let e = invocation_entry("movie-this", "Blade+Runner", &StyleOptions::plain());
        assert_eq!(e, "\n\nCommand:\tmovie-this\nOther args:\tBlade+Runner");
    }

    #[test]
    fn help_lists_every_command() {
        let h = help_text(&StyleOptions::plain());
        for c in Command::variants() {
            assert!(h.contains(c.name()), "help is missing {c}");
        }
    }

    #[test]
    fn failure_marker_plain() {
        assert_eq!(
            failure_marker(&StyleOptions::plain()),
            "\nThis command failed"
        );
    }
}
