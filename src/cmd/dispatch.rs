/*!
`dispatch.rs`

Maps one `Invocation` (command + free-text argument) to its behavior:

  my-tweets          fetch recent posts, print + log them
  spotify-this-song  search one track (fallback query when no argument)
  movie-this         look up one movie (fallback title when no argument)
  do-what-it-says    replay the batch file, one concurrent task per line
  display-log        print the log file (never writes to it)
  "" / anything else help text + failure marker

The dispatcher never fails: each branch recovers locally by printing a
message and (in most branches) appending the generic failure marker.

Batch tasks run concurrently; their print/log side effects interleave in
whatever order the lookups complete.
*/

use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::batch::parse_batch;
use super::command::Command;
use super::format::{
    Role, StyleOptions, color, failure_marker, help_text, invocation_entry, movie_block,
    posts_block, track_block,
};
use crate::services::{MovieLookup, Services};
use crate::utils::{Console, LogFile};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const FALLBACK_SONG: &str = "The+Sign+by+Ace+of+Base";
pub const FALLBACK_MOVIE: &str = "Mr. Nobody";

/// One command to run. Built from the process arguments or a batch line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub argument: String,
}

impl Invocation {
    pub fn new(command: Command, argument: impl Into<String>) -> Self {
        Self {
            command,
            argument: argument.into(),
        }
    }

    /// From raw process arguments: first word (case-folded) is the command,
    /// the rest are joined with `+`.
    pub fn from_args(words: &[String]) -> Self {
        match words.split_first() {
            Some((command, rest)) => Self::new(Command::from_str_ci(command), rest.join("+")),
            None => Self::new(Command::Empty, ""),
        }
    }
}

pub struct Dispatcher {
    services: Services,
    console: Arc<dyn Console>,
    log: LogFile,
    batch_file: PathBuf,
    style: StyleOptions,
}

impl Dispatcher {
    pub fn new(
        services: Services,
        console: Arc<dyn Console>,
        log: LogFile,
        batch_file: impl Into<PathBuf>,
        style: StyleOptions,
    ) -> Self {
        Self {
            services,
            console,
            log,
            batch_file: batch_file.into(),
            style,
        }
    }

    /// Record the top-level invocation in the log file.
    pub async fn log_invocation(&self, inv: &Invocation) {
        self.log
            .append(&invocation_entry(
                inv.command.name(),
                &inv.argument,
                &self.style,
            ))
            .await;
    }

    /// Run one invocation to completion (including any batch children).
    pub fn dispatch(self: &Arc<Self>, inv: Invocation) -> BoxFuture<'static, ()> {
        let this = Arc::clone(self);
        Box::pin(async move { this.run(inv).await })
    }

    async fn run(self: Arc<Self>, inv: Invocation) {
        tracing::debug!(
            command = %inv.command,
            argument = %inv.argument,
            recognized = inv.command.is_recognized(),
            "dispatch"
        );
        if !inv.argument.is_empty() && !inv.command.takes_argument() {
            tracing::debug!(command = %inv.command, "argument ignored");
        }
        match inv.command {
            Command::MyTweets => self.my_tweets().await,
            Command::SpotifyThisSong => self.spotify_this_song(&inv.argument).await,
            Command::MovieThis => self.movie_this(&inv.argument).await,
            Command::DoWhatItSays => self.do_what_it_says().await,
            Command::DisplayLog => self.display_log().await,
            Command::Empty => self.invalid("No command specified.").await,
            Command::Unknown(name) => {
                tracing::debug!(%name, "unrecognized command");
                self.invalid("Invalid command specified.").await
            }
        }
    }

    /// Print and log the same text.
    async fn emit(&self, text: &str) {
        self.console.print(text);
        self.log.append(text).await;
    }

    fn print_error(&self, text: &str) {
        self.console.print(&color(Role::Error, text, &self.style));
    }

    async fn log_failure(&self) {
        self.log.append(&failure_marker(&self.style)).await;
    }

    async fn my_tweets(&self) {
        match self.services.feed.recent_posts().await {
            Ok(posts) => {
                tracing::info!(count = posts.len(), "posts fetched");
                self.emit(&posts_block(&posts, &self.style)).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "timeline fetch failed");
                self.print_error("Error retrieving tweets.  Sorry.");
                self.log_failure().await;
            }
        }
    }

    async fn spotify_this_song(&self, argument: &str) {
        let query = if argument.is_empty() {
            FALLBACK_SONG
        } else {
            argument
        };
        match self.services.music.search_track(query).await {
            Ok(Some(track)) => self.emit(&track_block(&track, &self.style)).await,
            Ok(None) => {
                self.print_error("No song returned based on your input.  Please try again.");
                self.log_failure().await;
            }
            Err(e) => {
                // Console only: this path has never written a failure marker.
                tracing::warn!(error = %e, "track search failed");
                self.console.print(&format!("ERROR: {e}"));
            }
        }
    }

    async fn movie_this(&self, argument: &str) {
        let title = if argument.is_empty() {
            FALLBACK_MOVIE
        } else {
            argument
        };
        match self.services.movies.lookup(title).await {
            Ok(MovieLookup::Found(movie)) => self.emit(&movie_block(&movie, &self.style)).await,
            Ok(MovieLookup::NotFound) => {
                self.print_error("No movie returned based on your input.  Please try again");
                self.log_failure().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "movie lookup failed");
                self.print_error("Failure to retrieve movie data from server.");
                self.log_failure().await;
            }
        }
    }

    async fn do_what_it_says(self: &Arc<Self>) {
        let text = match tokio::fs::read_to_string(&self.batch_file).await {
            Ok(t) => t,
            Err(e) => {
                self.print_error(&format!(
                    "Error reading info from file {}: {e}",
                    self.batch_file.display()
                ));
                self.log_failure().await;
                return;
            }
        };

        let invocations = parse_batch(&text);
        tracing::info!(count = invocations.len(), "replaying batch file");

        let mut tasks = JoinSet::new();
        for inv in invocations {
            tasks.spawn(self.dispatch(inv));
        }
        while let Some(res) = tasks.join_next().await {
            if let Err(e) = res {
                tracing::error!(error = %e, "batch task aborted");
            }
        }
    }

    async fn display_log(&self) {
        match self.log.read().await {
            Ok(contents) => self.console.print(&contents),
            Err(e) => self.print_error(&format!(
                "Error reading info from file {}: {e}",
                self.log.path().display()
            )),
        }
    }

    async fn invalid(&self, headline: &str) {
        self.print_error(headline);
        self.console.print(&help_text(&self.style));
        self.log_failure().await;
    }
}
