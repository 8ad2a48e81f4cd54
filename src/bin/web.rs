//! Single binary web server: index page, static files from /static, API via REST.
//! Run with: cargo run --bin web
//! Configuration comes from the environment (HOST, PORT, INACTIVITY_HOURS, TOURNAMENT_SEED).

use actix_files::Files;
use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use team_tournament_web::{
    advance_round, forms_from_csv, import_teams, record_set_score, register_team, remove_team,
    restart_tournament, simulate_active_rounds, start_tournament, MatchId, RegistrationForm,
    RegistryEvent, ServerConfig, TeamRef, Tournament, TournamentId,
};

/// Per-tournament entry: tournament data, its random source, and last activity time.
struct TournamentEntry {
    tournament: Tournament,
    rng: StdRng,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. The lock serializes every mutation.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct SetScoreBody {
    points_a: u32,
    points_b: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team identity.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    category: String,
    name: String,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `action` on one tournament under the write lock and reply with the updated tournament.
/// Touching a tournament refreshes its last_activity.
fn update_tournament<E, F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    E: Display,
    F: FnOnce(&mut Tournament, &mut StdRng) -> Result<(), E>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.tournament, &mut entry.rng) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, config: Data<ServerConfig>) -> HttpResponse {
    let mut tournament = Tournament::new();
    let id = tournament.id;
    tournament.observe_registry(move |event, teams| match event {
        RegistryEvent::Registered(team) => {
            log::info!("Tournament {}: registered {} ({} teams)", id, team, teams.len())
        }
        RegistryEvent::Removed(team) => {
            log::info!("Tournament {}: removed {} ({} teams)", id, team, teams.len())
        }
    });
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            rng,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found): pairings, scores, winners, champion.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    // Write lock: viewing a tournament refreshes last_activity so it is not cleaned up.
    update_tournament(&state, path.id, |_, _| Ok::<(), String>(()))
}

/// Registered teams in registration order.
#[get("/api/tournaments/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(entry.tournament.registry.snapshot()),
        None => no_tournament(),
    }
}

/// Register a team from a sign-up form (Registration only).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegistrationForm>,
) -> HttpResponse {
    let form = body.into_inner();
    update_tournament(&state, path.id, move |t, rng| {
        let team = form.into_team().map_err(|e| e.to_string())?;
        register_team(t, team, rng).map_err(|e| e.to_string())
    })
}

/// Register many teams from a CSV body; all or nothing.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    update_tournament(&state, path.id, |t, rng| {
        let forms = forms_from_csv(body.as_bytes())?;
        let count = import_teams(t, forms, rng)?;
        log::info!("Tournament {}: imported {} teams", t.id, count);
        Ok::<(), team_tournament_web::RegistrationError>(())
    })
}

/// Remove a team (Registration only).
#[delete("/api/tournaments/{id}/teams/{category}/{name}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    let team = TeamRef::new(path.category.clone(), path.name.clone());
    update_tournament(&state, path.id, |t, rng| remove_team(t, &team, rng).map(|_| ()))
}

/// Start the tournament (Registration -> GroupStage).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update_tournament(&state, path.id, start_tournament)
}

/// Record one set score on a match of an active round.
#[post("/api/tournaments/{id}/matches/{match_id}/sets")]
async fn api_record_set(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<SetScoreBody>,
) -> HttpResponse {
    update_tournament(&state, path.id, |t, _| {
        record_set_score(t, path.match_id, body.points_a, body.points_b)
    })
}

/// Advance every finished round (next round, category champion, or overall champion).
#[post("/api/tournaments/{id}/advance")]
async fn api_advance_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update_tournament(&state, path.id, advance_round)
}

/// Play out every pending match of the active rounds with random scores.
#[post("/api/tournaments/{id}/simulate")]
async fn api_simulate(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update_tournament(&state, path.id, |t, rng| simulate_active_rounds(t, rng).map(|_| ()))
}

/// Restart tournament: back to Registration with the same teams.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update_tournament(&state, path.id, restart_tournament)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);
    if let Some(seed) = config.seed {
        log::info!("Pairings seeded with {}", seed);
    }

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments past the inactivity timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_list_teams)
            .service(api_import_teams)
            .service(api_register_team)
            .service(api_remove_team)
            .service(api_start_tournament)
            .service(api_record_set)
            .service(api_advance_round)
            .service(api_simulate)
            .service(api_restart_tournament)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../static/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
