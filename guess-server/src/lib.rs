use std::sync::Arc;

use guess_types::{DateKey, ErrorResponse, GuessError, SelectDateRequest, SubmitGuessRequest};
use warp::Filter;
use warp::http::StatusCode;

use crate::session_manager::SessionManager;

pub mod config;
pub mod scoring_client;
pub mod session_manager;

const MAX_BODY_BYTES: u64 = 4 * 1024;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let session_manager_filter = warp::any().map(move || session_manager.clone());

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let session = warp::path!("api" / "session")
        .and(warp::get())
        .and(session_manager_filter.clone())
        .and_then(handle_session_request);

    let select_date = warp::path!("api" / "session" / "date")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(session_manager_filter.clone())
        .and_then(handle_select_date_request);

    let guess = warp::path!("api" / "guess")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(session_manager_filter.clone())
        .and_then(handle_guess_request);

    let history = warp::path!("api" / "history" / String)
        .and(warp::get())
        .and(session_manager_filter.clone())
        .and_then(handle_history_request);

    // CORS configuration for the local page
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(session)
        .or(select_date)
        .or(guess)
        .or(history)
        .with(cors)
        .with(warp::log("daily_guess"))
}

/// HTTP status that goes with each advisory error.
pub fn status_for(error: &GuessError) -> StatusCode {
    match error {
        GuessError::InvalidInput | GuessError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
        GuessError::DuplicateGuess { .. }
        | GuessError::GuessPending { .. }
        | GuessError::AlreadySolved => StatusCode::CONFLICT,
        GuessError::ScoringUnavailable { .. } => StatusCode::BAD_GATEWAY,
        GuessError::PersistenceUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_reply(error: GuessError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = status_for(&error);
    warp::reply::with_status(warp::reply::json(&ErrorResponse::from(error)), status)
}

async fn handle_session_request(
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let snapshot = session_manager.snapshot().await;
    Ok(warp::reply::with_status(
        warp::reply::json(&snapshot),
        StatusCode::OK,
    ))
}

async fn handle_select_date_request(
    request: SelectDateRequest,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let date_key = match request.date.parse::<DateKey>() {
        Ok(date_key) => date_key,
        Err(_) => {
            return Ok(error_reply(GuessError::InvalidDate {
                input: request.date,
            }));
        }
    };

    let snapshot = session_manager.select_date(date_key).await;
    Ok(warp::reply::with_status(
        warp::reply::json(&snapshot),
        StatusCode::OK,
    ))
}

async fn handle_guess_request(
    request: SubmitGuessRequest,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match session_manager.submit_guess(&request.word).await {
        Ok(accepted) => Ok(warp::reply::with_status(
            warp::reply::json(&accepted),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(GuessError::from(err))),
    }
}

async fn handle_history_request(
    date: String,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let date_key = match date.parse::<DateKey>() {
        Ok(date_key) => date_key,
        Err(_) => return Ok(error_reply(GuessError::InvalidDate { input: date })),
    };

    match session_manager.summary(date_key).await {
        Ok(summary) => Ok(warp::reply::with_status(
            warp::reply::json(&summary),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!("Failed to read history for {}: {:#}", date_key, err);
            Ok(error_reply(GuessError::PersistenceUnavailable {
                message: "Failed to read guess history".to_string(),
            }))
        }
    }
}
