//! `watchlist`, a terminal front end for the movie collection.
//!
//! One subcommand per user action: `add`, `list`, `show`, `edit`, `toggle`,
//! `rm` and `stats`. Every invocation opens the collection file, runs a
//! single operation through [`watchlist_core`] and prints a report. The
//! collection file is resolved from `--file`, then the `WATCHLIST_FILE`
//! environment variable, then `movie_watchlist.json` in the working
//! directory.
//!
//! Diagnostics go to stderr so they never mix with command output; set
//! `RUST_LOG` to raise the verbosity.

mod commands;
mod output;

use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use watchlist_core::{
    FileStorage, Movie, MovieQuery, MovieStore, MovieUpdate, SortKey, WatchedFilter,
    DEFAULT_FILE_NAME,
};

#[derive(Parser)]
#[command(name = "watchlist", version, about = "Track and manage your movies")]
struct Cli {
    /// Collection file to operate on. Falls back to $WATCHLIST_FILE, then
    /// to movie_watchlist.json in the working directory.
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a movie to the watchlist
    Add {
        /// Movie title
        title: String,
        /// Release year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        /// Genre label
        #[arg(long, default_value = "")]
        genre: String,
        /// Rating from 0 to 10, 0 meaning unrated
        #[arg(long, default_value_t = 0.0, value_parser = parse_rating)]
        rating: f64,
        /// Mark the movie as already watched
        #[arg(long)]
        watched: bool,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Poster image URL
        #[arg(long)]
        poster_url: Option<String>,
    },
    /// List movies, filtered and sorted
    List {
        /// Keep only movies whose title, genre or notes contain this text
        #[arg(long, default_value = "")]
        search: String,
        /// Keep only watched or only unwatched movies
        #[arg(long, value_enum, default_value_t = WatchedArg::All)]
        watched: WatchedArg,
        /// Ordering of the listing
        #[arg(long, value_enum, default_value_t = SortArg::Added)]
        sort: SortArg,
    },
    /// Show every field of one movie
    Show {
        /// Movie id as printed by `list`
        id: String,
    },
    /// Change fields of an existing movie
    Edit {
        /// Movie id as printed by `list`
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New release year
        #[arg(long)]
        year: Option<i32>,
        /// New genre label
        #[arg(long)]
        genre: Option<String>,
        /// New rating from 0 to 10
        #[arg(long, value_parser = parse_rating)]
        rating: Option<f64>,
        /// Set the watched flag directly
        #[arg(long)]
        watched: Option<bool>,
        /// New notes, replacing the old ones
        #[arg(long)]
        notes: Option<String>,
        /// New poster image URL
        #[arg(long, conflicts_with = "clear_poster")]
        poster_url: Option<String>,
        /// Remove the stored poster URL
        #[arg(long)]
        clear_poster: bool,
    },
    /// Flip a movie between watched and unwatched
    Toggle {
        /// Movie id as printed by `list`
        id: String,
    },
    /// Delete a movie, asking for confirmation first
    Rm {
        /// Movie id as printed by `list`
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print collection totals
    Stats,
}

/// Watched-state filter accepted by `list --watched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WatchedArg {
    All,
    Watched,
    Unwatched,
}

impl From<WatchedArg> for WatchedFilter {
    fn from(arg: WatchedArg) -> Self {
        match arg {
            WatchedArg::All => WatchedFilter::All,
            WatchedArg::Watched => WatchedFilter::Watched,
            WatchedArg::Unwatched => WatchedFilter::Unwatched,
        }
    }
}

/// Ordering accepted by `list --sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Added,
    Title,
    Year,
    Rating,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Added => SortKey::Added,
            SortArg::Title => SortKey::Title,
            SortArg::Year => SortKey::Year,
            SortArg::Rating => SortKey::Rating,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = resolve_file(cli.file);
    tracing::debug!(file = %path.display(), "using collection file");
    let store = MovieStore::new(FileStorage::new(path));

    let report = match cli.command {
        Command::Add {
            title,
            year,
            genre,
            rating,
            watched,
            notes,
            poster_url,
        } => commands::add(
            &store,
            commands::AddArgs {
                title,
                year,
                genre,
                rating,
                watched,
                notes,
                poster_url,
            },
        )?,
        Command::List {
            search,
            watched,
            sort,
        } => commands::list(
            &store,
            MovieQuery {
                search,
                watched: watched.into(),
                sort: sort.into(),
            },
        )?,
        Command::Show { id } => commands::show(&store, &id)?,
        Command::Edit {
            id,
            title,
            year,
            genre,
            rating,
            watched,
            notes,
            poster_url,
            clear_poster,
        } => {
            let poster_url = if clear_poster {
                Some(None)
            } else {
                poster_url.map(Some)
            };
            let update = MovieUpdate {
                title,
                year,
                genre,
                rating,
                watched,
                notes,
                poster_url,
            };
            commands::edit(&store, &id, update)?
        }
        Command::Toggle { id } => commands::toggle(&store, &id)?,
        Command::Rm { id, yes } => commands::delete(&store, &id, yes, confirm_on_stdin)?,
        Command::Stats => commands::stats(&store)?,
    };
    println!("{report}");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchlist_cli=warn,watchlist_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// `--rating` must parse to a finite number: the collection is stored as
/// JSON, which has no NaN or infinity.
fn parse_rating(raw: &str) -> Result<f64, String> {
    let rating: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if !rating.is_finite() {
        return Err("rating must be a finite number".to_string());
    }
    Ok(rating)
}

/// The `--file` flag wins over the `WATCHLIST_FILE` environment variable,
/// which wins over the default file name.
fn resolve_file(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("WATCHLIST_FILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
}

/// Asks on the terminal before a delete goes through. Anything other than
/// an explicit yes keeps the movie.
fn confirm_on_stdin(movie: &Movie) -> bool {
    print!("Are you sure you want to delete \"{}\"? [y/N] ", movie.title);
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arguments_parse() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_file_prefers_the_flag() {
        let path = resolve_file(Some(PathBuf::from("/tmp/movies.json")));

        assert_eq!(path, PathBuf::from("/tmp/movies.json"));
    }

    #[test]
    fn resolve_file_falls_back_to_the_default_name() {
        // The fallback only applies when neither the flag nor the
        // environment variable is set; tests never set the variable.
        if std::env::var_os("WATCHLIST_FILE").is_none() {
            assert_eq!(resolve_file(None), PathBuf::from(DEFAULT_FILE_NAME));
        }
    }

    #[test]
    fn ratings_must_be_finite_numbers() {
        assert_eq!(parse_rating("8.5").unwrap(), 8.5);
        assert_eq!(parse_rating("0").unwrap(), 0.0);
        for bad in ["inf", "-inf", "nan", "infinity", "eight"] {
            assert!(parse_rating(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn non_finite_rating_flags_are_rejected_at_the_command_line() {
        let result = Cli::try_parse_from(["watchlist", "add", "Dune", "--rating", "inf"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["watchlist", "edit", "some-id", "--rating", "nan"]);
        assert!(result.is_err());
    }

    #[test]
    fn filter_and_sort_arguments_map_onto_query_types() {
        assert_eq!(WatchedFilter::from(WatchedArg::All), WatchedFilter::All);
        assert_eq!(
            WatchedFilter::from(WatchedArg::Watched),
            WatchedFilter::Watched
        );
        assert_eq!(
            WatchedFilter::from(WatchedArg::Unwatched),
            WatchedFilter::Unwatched
        );
        assert_eq!(SortKey::from(SortArg::Added), SortKey::Added);
        assert_eq!(SortKey::from(SortArg::Title), SortKey::Title);
        assert_eq!(SortKey::from(SortArg::Year), SortKey::Year);
        assert_eq!(SortKey::from(SortArg::Rating), SortKey::Rating);
    }
}
