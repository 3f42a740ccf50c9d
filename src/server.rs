use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use log::{error, info};
use serde::Serialize;
use std::net::SocketAddr;

use crate::data::{SchedulingInput, SchedulingOutput};
use crate::error::{Error, Result};
use crate::slots::{SLOT_LABELS, Weekday};
use crate::solver;

#[derive(Debug, Serialize)]
pub struct SlotCatalog {
    pub days: Vec<Weekday>,
    pub slots: Vec<&'static str>,
}

fn status_for(e: &Error) -> StatusCode {
    match e {
        Error::NoInstructorData | Error::InvalidConfig(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn solve_handler(
    Json(input): Json<SchedulingInput>,
) -> std::result::Result<Json<SchedulingOutput>, (StatusCode, String)> {
    match solver::solve(&input) {
        Ok(output) => Ok(Json(output)),
        Err(e) => {
            error!("Solve request failed: {}", e);
            Err((status_for(&e), e.to_string()))
        }
    }
}

async fn slots_handler() -> Json<SlotCatalog> {
    Json(SlotCatalog {
        days: Weekday::ALL.to_vec(),
        slots: SLOT_LABELS.to_vec(),
    })
}

pub fn app() -> Router {
    Router::new()
        .route("/v1/timetable/solve", post(solve_handler))
        .route("/v1/timetable/slots", get(slots_handler))
}

pub async fn run_server(bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app()).await?;
    Ok(())
}
