use super::*;
use clap::CommandFactory;
use session::storage as persisted;
use session::{HttpRequest, HttpResponse, Identity, MemoryStorage, Transport, TransportError};

struct Offline;

#[async_trait::async_trait(?Send)]
impl Transport for Offline {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError("offline".to_owned()))
    }
}

fn store_with(role: Option<&str>) -> SessionStore<Offline, MemoryStorage, ()> {
    let storage = MemoryStorage::new();
    if let Some(role) = role {
        let identity: Identity =
            serde_json::from_value(serde_json::json!({"id": 1, "username": "ana", "rol": role}))
                .expect("identity");
        persisted::save(&storage, "abc", &identity).expect("seed");
    }
    SessionStore::hydrated(Offline, ApiConfig::default(), storage, ())
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn request_parses_method_case_insensitively() {
    let cli = Cli::try_parse_from(["gecos", "request", "patch", "salones/3/", "--data", "{}", "-q", "a=b"])
        .expect("parse");
    match cli.command {
        Command::Request { method, path, data, query } => {
            assert_eq!(method, Method::Patch);
            assert_eq!(path, "salones/3/");
            assert_eq!(data.as_deref(), Some("{}"));
            assert_eq!(query, vec!["a=b".to_owned()]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn request_rejects_unknown_method() {
    assert!(Cli::try_parse_from(["gecos", "request", "TRACE", "salones/"]).is_err());
}

#[test]
fn login_takes_password_flag() {
    let cli = Cli::try_parse_from(["gecos", "login", "ana", "--password", "secret"]).expect("parse");
    assert!(matches!(cli.command, Command::Login { ref username, ref password } if username == "ana" && password == "secret"));
}

#[test]
fn nested_subcommands_parse() {
    let cli = Cli::try_parse_from(["gecos", "reservations", "list", "--room", "7"]).expect("parse");
    assert!(matches!(
        cli.command,
        Command::Reservations(ReservationsCommand { command: ReservationsSubcommand::List { room: Some(7) } })
    ));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn api_config_defaults_when_unset() {
    let config = api_config(None).expect("default");
    assert_eq!(config.base_url(), "http://localhost:8000/api/");
}

#[test]
fn api_config_rejects_relative_base() {
    assert!(matches!(api_config(Some("/api")), Err(CliError::RelativeBaseUrl(_))));
}

#[test]
fn api_config_rejects_bad_scheme() {
    assert!(matches!(api_config(Some("ftp://host/api")), Err(CliError::Config(_))));
}

// =============================================================================
// QUERY PAIRS
// =============================================================================

#[test]
fn pairs_split_on_first_equals() {
    let pairs = parse_pairs(&["tipo=aula".to_owned(), "q=a=b".to_owned(), "empty=".to_owned()]).expect("pairs");
    assert_eq!(
        pairs,
        vec![
            ("tipo".to_owned(), "aula".to_owned()),
            ("q".to_owned(), "a=b".to_owned()),
            ("empty".to_owned(), String::new()),
        ]
    );
}

#[test]
fn pairs_without_key_are_rejected() {
    assert!(matches!(parse_pairs(&["novalue".to_owned()]), Err(CliError::InvalidQuery(_))));
    assert!(matches!(parse_pairs(&["=x".to_owned()]), Err(CliError::InvalidQuery(_))));
}

// =============================================================================
// ROUTE CHECK
// =============================================================================

#[test]
fn guest_is_sent_to_login_from_protected_paths() {
    let report = route_report(&store_with(None), "/reservas");
    assert_eq!(
        report,
        RouteReport {
            path: "/reservas".to_owned(),
            route: Some("/reservas"),
            authenticated: false,
            admission: "redirect",
            redirect: Some("/login"),
        }
    );
}

#[test]
fn member_is_sent_to_landing_from_admin_paths() {
    let report = route_report(&store_with(Some("estudiante")), "/admin/usuarios");
    assert_eq!(report.admission, "redirect");
    assert_eq!(report.redirect, Some("/salones"));
}

#[test]
fn admin_is_admitted_to_admin_paths() {
    let report = route_report(&store_with(Some("admin")), "/admin/metricas");
    assert_eq!(report.admission, "allow");
    assert_eq!(report.redirect, None);
}

#[test]
fn detail_paths_resolve_to_their_pattern() {
    let report = route_report(&store_with(Some("docente")), "/aula/12");
    assert_eq!(report.route, Some("/aula/:id"));
    assert_eq!(report.admission, "allow");
}

#[test]
fn unknown_paths_are_open() {
    let report = route_report(&store_with(None), "/nowhere");
    assert_eq!(report.route, None);
    assert_eq!(report.admission, "allow");
}
