//! Single binary web server: league generation, lifecycle and game reporting via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), LEAGUE_POD_SIZE (3 or 4).

use actix_web::{
    get, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use pod_league::{
    complete_league, generate_league, league_progress, on_game_reported, publish_league,
    schedule_csv, GameId, League, LeagueError, LeagueId, LeagueProgress, LeagueStore, MemoryStore,
    NewLeague, Player, PlayerId, PodSize, ScheduledPod, SchedulingPolicy,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory leagues, pods and players.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct LeagueDetail {
    league: League,
    scheduled_pods: Vec<ScheduledPod>,
    progress: LeagueProgress,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    external_handle: Option<String>,
}

#[derive(Deserialize)]
struct ValidateBody {
    player_count: usize,
    games_per_player: u32,
}

#[derive(Deserialize)]
struct SuggestionsQuery {
    player_count: usize,
}

#[derive(Deserialize)]
struct ReportGameBody {
    /// Id of the created game record; generated when omitted.
    #[serde(default)]
    game_id: Option<GameId>,
    #[serde(default)]
    league_id: Option<LeagueId>,
    player_ids: Vec<PlayerId>,
}

/// Path segment: league id (e.g. /api/leagues/{id})
#[derive(Deserialize)]
struct LeaguePath {
    id: LeagueId,
}

fn error_response(e: LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LeagueError::LeagueNotFound(_) | LeagueError::ScheduledPodNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pod-league",
    })
}

/// Register a player that can be put on league rosters.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Player name must not be empty" }));
    }
    let mut player = Player::new(name);
    if let Some(handle) = body.external_handle.as_deref() {
        player = player.with_handle(handle);
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.insert_player(player.clone()) {
        Ok(()) => HttpResponse::Ok().json(player),
        Err(e) => error_response(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.list_players()),
        Err(_) => lock_error(),
    }
}

/// Check a (player count, games per player) pair without creating anything.
#[post("/api/leagues/validate")]
async fn api_validate(policy: Data<SchedulingPolicy>, body: Json<ValidateBody>) -> HttpResponse {
    HttpResponse::Ok().json(policy.validate(body.player_count, body.games_per_player))
}

/// Valid games-per-player values for a roster size.
#[get("/api/leagues/suggestions")]
async fn api_suggestions(
    policy: Data<SchedulingPolicy>,
    query: Query<SuggestionsQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(policy.suggested_games_per_player(query.player_count))
}

/// Create a league (Draft) with its scheduled pods.
#[post("/api/leagues")]
async fn api_create_league(
    state: AppState,
    policy: Data<SchedulingPolicy>,
    body: Json<NewLeague>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match generate_league(&mut *g, body.into_inner(), &policy) {
        Ok(generated) => HttpResponse::Ok().json(generated),
        Err(e) => error_response(e),
    }
}

#[get("/api/leagues")]
async fn api_list_leagues(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.list_leagues()),
        Err(_) => lock_error(),
    }
}

/// League with its scheduled pods and fulfillment progress (404 if not found).
#[get("/api/leagues/{id}")]
async fn api_get_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = match g.get_league(path.id) {
        Some(l) => l,
        None => return error_response(LeagueError::LeagueNotFound(path.id)),
    };
    let progress = match league_progress(&*g, path.id) {
        Ok(p) => p,
        Err(e) => return error_response(e),
    };
    HttpResponse::Ok().json(LeagueDetail {
        scheduled_pods: g.list_scheduled_pods(path.id),
        league,
        progress,
    })
}

/// Draft -> Active.
#[post("/api/leagues/{id}/publish")]
async fn api_publish_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match publish_league(&mut *g, path.id) {
        Ok(league) => HttpResponse::Ok().json(league),
        Err(e) => error_response(e),
    }
}

/// Active -> Completed (admin closes the season).
#[post("/api/leagues/{id}/complete")]
async fn api_complete_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match complete_league(&mut *g, path.id) {
        Ok(league) => HttpResponse::Ok().json(league),
        Err(e) => error_response(e),
    }
}

/// Download the schedule as CSV.
#[get("/api/leagues/{id}/schedule.csv")]
async fn api_schedule_csv(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = match g.get_league(path.id) {
        Some(l) => l,
        None => return error_response(LeagueError::LeagueNotFound(path.id)),
    };
    match schedule_csv(&league, &g.list_scheduled_pods(path.id), &g.list_players()) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// A game was played: link it to the matching pending scheduled pod, if any. Responds with the
/// pod or null.
#[post("/api/games/report")]
async fn api_report_game(state: AppState, body: Json<ReportGameBody>) -> HttpResponse {
    let body = body.into_inner();
    let game_id = body.game_id.unwrap_or_else(Uuid::new_v4);
    let players: HashSet<PlayerId> = body.player_ids.into_iter().collect();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match on_game_reported(&mut *g, body.league_id, game_id, &players) {
        Ok(matched) => HttpResponse::Ok().json(matched),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn policy_from_env() -> SchedulingPolicy {
    let pod_size = std::env::var("LEAGUE_POD_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .and_then(PodSize::from_players)
        .unwrap_or_default();
    SchedulingPolicy::with_pod_size(pod_size)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    let policy = policy_from_env();
    if policy.pod_size == PodSize::Three {
        log::warn!("Three-player pod mode enabled");
    }
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(MemoryStore::new()));
    let policy = Data::new(policy);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(policy.clone())
            .service(api_health)
            .service(api_add_player)
            .service(api_list_players)
            .service(api_validate)
            .service(api_suggestions)
            .service(api_create_league)
            .service(api_list_leagues)
            .service(api_schedule_csv)
            .service(api_get_league)
            .service(api_publish_league)
            .service(api_complete_league)
            .service(api_report_game)
    })
    .bind(bind)?
    .run()
    .await
}
