//! Command-line client for the GECOS booking API.
//!
//! Shares the session core with the browser client: the same gateway
//! decorates requests, the same store persists the credential (here in a
//! JSON file), and `check` runs the same route guard the browser uses.

mod storage;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use session::{
    Admission, ApiConfig, ApiError, AppRoute, ConfigError, Credentials, Method, RouteIntent, SessionError,
    SessionStore, admit,
};
use session::types::{AvailabilityWindow, SubjectDraft};
use tracing_subscriber::EnvFilter;

use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

type Store = SessionStore<ReqwestTransport, FileStorage, ()>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid API base URL: {0}")]
    Config(#[from] ConfigError),
    #[error("the CLI needs an absolute API base URL, got `{0}`")]
    RelativeBaseUrl(String),
    #[error("no config directory available; pass --session-file or set GECOS_SESSION_FILE")]
    NoSessionFile,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not signed in; run `gecos login` first")]
    NotSignedIn,
    #[error("query parameter `{0}` must look like key=value")]
    InvalidQuery(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gecos", about = "GECOS room-booking API CLI")]
struct Cli {
    /// API base endpoint, e.g. `https://gecos.example.edu/api`.
    #[arg(long, env = "GECOS_API_URL")]
    api_url: Option<String>,

    /// Where the token and identity are kept between runs.
    #[arg(long, env = "GECOS_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange username and password for a token.
    Login {
        username: String,
        #[arg(long, env = "GECOS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke the token and forget the stored session.
    Logout,
    /// Print the stored identity.
    Whoami {
        /// Re-fetch the profile from the API first.
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// Evaluate the route guard for a client path.
    Check { path: String },
    Rooms(RoomsCommand),
    Reservations(ReservationsCommand),
    Subjects(SubjectsCommand),
    Users(UsersCommand),
    /// Send an arbitrary authenticated request.
    Request {
        method: Method,
        path: String,
        #[arg(long)]
        data: Option<String>,
        /// Query parameter as key=value; repeatable.
        #[arg(long = "query", short = 'q')]
        query: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct RoomsCommand {
    #[command(subcommand)]
    command: RoomsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoomsSubcommand {
    List {
        /// Filter as key=value; repeatable.
        #[arg(long = "filter", short = 'f')]
        filters: Vec<String>,
    },
    Show {
        id: u64,
    },
    Available {
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct ReservationsCommand {
    #[command(subcommand)]
    command: ReservationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReservationsSubcommand {
    List {
        #[arg(long)]
        room: Option<u64>,
    },
    Mine,
    Confirm {
        id: u64,
    },
    Cancel {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct SubjectsCommand {
    #[command(subcommand)]
    command: SubjectsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SubjectsSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        semester: Option<String>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Show { id: u64 },
    Delete { id: u64 },
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct RouteReport {
    path: String,
    route: Option<&'static str>,
    authenticated: bool,
    admission: &'static str,
    redirect: Option<&'static str>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let store = open_store(cli.api_url.as_deref(), cli.session_file)?;
    run(&store, cli.command).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn api_config(raw: Option<&str>) -> Result<ApiConfig, CliError> {
    let config = ApiConfig::from_env_value(raw)?;
    if config.base_url().starts_with('/') {
        return Err(CliError::RelativeBaseUrl(config.base_url().to_owned()));
    }
    Ok(config)
}

fn open_store(api_url: Option<&str>, session_file: Option<PathBuf>) -> Result<Store, CliError> {
    let config = api_config(api_url)?;
    let path = session_file.or_else(FileStorage::default_path).ok_or(CliError::NoSessionFile)?;
    tracing::debug!(base = config.base_url(), session_file = %path.display(), "opening session");
    Ok(SessionStore::hydrated(ReqwestTransport::new()?, config, FileStorage::new(path), ()))
}

async fn run(store: &Store, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            let identity = store.login(&Credentials::new(username, password)).await?;
            print_json(&identity)
        }
        Command::Logout => {
            store.logout().await;
            eprintln!("signed out");
            Ok(())
        }
        Command::Whoami { refresh } => {
            let identity = if refresh {
                store.refresh_identity().await?
            } else {
                store.identity().ok_or(CliError::NotSignedIn)?
            };
            print_json(&identity)
        }
        Command::Check { path } => print_json(&route_report(store, &path)),
        Command::Rooms(rooms) => run_rooms(store, rooms).await,
        Command::Reservations(reservations) => run_reservations(store, reservations).await,
        Command::Subjects(subjects) => run_subjects(store, subjects).await,
        Command::Users(users) => run_users(store, users).await,
        Command::Request { method, path, data, query } => {
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let query = parse_pairs(&query)?;
            let value = observed(store, store.gateway().request(method, &path, &query, body.as_ref()).await)?;
            print_json(&value)
        }
    }
}

async fn run_rooms(store: &Store, rooms: RoomsCommand) -> Result<(), CliError> {
    let gateway = store.gateway();
    match rooms.command {
        RoomsSubcommand::List { filters } => {
            let filters = parse_pairs(&filters)?;
            print_json(&observed(store, gateway.list_rooms(&filters).await)?)
        }
        RoomsSubcommand::Show { id } => print_json(&observed(store, gateway.room(id).await)?),
        RoomsSubcommand::Available { date, start, end } => {
            let window = AvailabilityWindow { date, start, end };
            print_json(&observed(store, gateway.available_rooms(&window).await)?)
        }
        RoomsSubcommand::Delete { id } => {
            observed(store, gateway.delete_room(id).await)?;
            eprintln!("deleted room {id}");
            Ok(())
        }
    }
}

async fn run_reservations(store: &Store, reservations: ReservationsCommand) -> Result<(), CliError> {
    let gateway = store.gateway();
    match reservations.command {
        ReservationsSubcommand::List { room } => {
            print_json(&observed(store, gateway.list_reservations(room).await)?)
        }
        ReservationsSubcommand::Mine => print_json(&observed(store, gateway.my_reservations().await)?),
        ReservationsSubcommand::Confirm { id } => {
            print_json(&observed(store, gateway.confirm_reservation(id).await)?)
        }
        ReservationsSubcommand::Cancel { id } => {
            print_json(&observed(store, gateway.cancel_reservation(id).await)?)
        }
    }
}

async fn run_subjects(store: &Store, subjects: SubjectsCommand) -> Result<(), CliError> {
    let gateway = store.gateway();
    match subjects.command {
        SubjectsSubcommand::List => print_json(&observed(store, gateway.list_subjects().await)?),
        SubjectsSubcommand::Create { name, code, semester } => {
            let draft = SubjectDraft { name, code, semester };
            print_json(&observed(store, gateway.create_subject(&draft).await)?)
        }
        SubjectsSubcommand::Delete { id } => {
            observed(store, gateway.delete_subject(id).await)?;
            eprintln!("deleted subject {id}");
            Ok(())
        }
    }
}

async fn run_users(store: &Store, users: UsersCommand) -> Result<(), CliError> {
    let gateway = store.gateway();
    match users.command {
        UsersSubcommand::List => print_json(&observed(store, gateway.list_users().await)?),
        UsersSubcommand::Show { id } => print_json(&observed(store, gateway.user(id).await)?),
        UsersSubcommand::Delete { id } => {
            observed(store, gateway.delete_user(id).await)?;
            eprintln!("deleted user {id}");
            Ok(())
        }
    }
}

/// A 401 anywhere means the stored token is dead.
fn observed<T>(store: &Store, result: Result<T, ApiError>) -> Result<T, CliError> {
    result.map_err(|err| {
        store.observe(&err);
        CliError::Api(err)
    })
}

fn route_report<T, S, E>(store: &SessionStore<T, S, E>, path: &str) -> RouteReport
where
    T: session::Transport,
    S: session::SessionStorage,
    E: session::SessionEvents,
{
    let session = store.snapshot();
    let admission = admit(&RouteIntent::for_path(path), &session);
    let (admission, redirect) = match admission {
        Admission::Allow => ("allow", None),
        Admission::Redirect(route) => ("redirect", Some(route.path())),
    };
    RouteReport {
        path: path.to_owned(),
        route: AppRoute::resolve(path).map(AppRoute::pattern),
        authenticated: session.is_authenticated(),
        admission,
        redirect,
    }
}

fn parse_pairs(raw: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_owned(), value.to_owned())),
            _ => Err(CliError::InvalidQuery(pair.clone())),
        })
        .collect()
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
