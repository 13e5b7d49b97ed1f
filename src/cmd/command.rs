/*!
Command enum for the dispatcher.

Variants:
  my-tweets / spotify-this-song / movie-this  (external lookups)
  do-what-it-says                             (batch replay)
  display-log                                 (print the log file)
  Empty / Unknown                             (error paths)

Helpers:
  - variants()
  - parse()        exact match, used for batch lines
  - from_str_ci()  case-folded, used for the process arguments
  - takes_argument()
*/

use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    MyTweets,
    SpotifyThisSong,
    MovieThis,
    DoWhatItSays,
    DisplayLog,
    /// No command given.
    Empty,
    /// Anything else, kept verbatim for diagnostics.
    Unknown(String),
}

impl Command {
    const RECOGNIZED: &'static [Command] = &[
        Command::MyTweets,
        Command::SpotifyThisSong,
        Command::MovieThis,
        Command::DoWhatItSays,
        Command::DisplayLog,
    ];

    /// Recognized commands in help order.
    pub fn variants() -> &'static [Command] {
        Self::RECOGNIZED
    }

    /// Exact, case-sensitive match.
    pub fn parse(s: &str) -> Self {
        match s {
            "" => Command::Empty,
            "my-tweets" => Command::MyTweets,
            "spotify-this-song" => Command::SpotifyThisSong,
            "movie-this" => Command::MovieThis,
            "do-what-it-says" => Command::DoWhatItSays,
            "display-log" => Command::DisplayLog,
            other => Command::Unknown(other.to_string()),
        }
    }

    pub fn from_str_ci(s: &str) -> Self {
        Self::parse(&s.to_lowercase())
    }

    pub fn name(&self) -> &str {
        match self {
            Command::MyTweets => "my-tweets",
            Command::SpotifyThisSong => "spotify-this-song",
            Command::MovieThis => "movie-this",
            Command::DoWhatItSays => "do-what-it-says",
            Command::DisplayLog => "display-log",
            Command::Empty => "",
            Command::Unknown(s) => s.as_str(),
        }
    }

    /// One-line help description.
    pub fn description(&self) -> &'static str {
        match self {
            Command::MyTweets => "displays up to 20 of the latest tweets",
            Command::SpotifyThisSong => "displays info about the track",
            Command::MovieThis => "displays info about the movie",
            Command::DoWhatItSays => "runs the commands listed in the batch file",
            Command::DisplayLog => "prints the log file",
            Command::Empty | Command::Unknown(_) => "",
        }
    }

    /// Placeholder shown after the name in help, if the command takes one.
    pub fn argument_hint(&self) -> Option<&'static str> {
        match self {
            Command::SpotifyThisSong => Some("<track name>"),
            Command::MovieThis => Some("<movie name>"),
            _ => None,
        }
    }

    pub fn takes_argument(&self) -> bool {
        matches!(self, Command::SpotifyThisSong | Command::MovieThis)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Command::Empty | Command::Unknown(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn parse_exact() {
        assert_eq!(Command::parse("movie-this"), Command::MovieThis);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(
            Command::parse("Movie-This"),
            Command::Unknown("Movie-This".into()),
            "batch lines are not case-folded"
        );
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Command::from_str_ci("MY-TWEETS"), Command::MyTweets);
        assert_eq!(Command::from_str_ci("Display-Log"), Command::DisplayLog);
        assert_eq!(
            Command::from_str_ci("Frobnicate"),
            Command::Unknown("frobnicate".into())
        );
    }

    #[test]
    fn names_round_trip() {
        for c in Command::variants() {
            assert_eq!(&Command::parse(c.name()), c);
            assert!(c.is_recognized());
        }
        assert!(!Command::Empty.is_recognized());
    }

    #[test]
    fn argument_flags() {
        for c in Command::variants() {
            assert_eq!(c.takes_argument(), c.argument_hint().is_some());
        }
        assert!(Command::MovieThis.takes_argument());
        assert!(Command::SpotifyThisSong.takes_argument());
        assert!(!Command::DisplayLog.takes_argument());
    }
}
