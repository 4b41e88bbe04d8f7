//! Liveness and readiness probes for the roster.
//!
//! Readiness answers for the store as well as the listener: the store lock
//! must be usable and the response reports how many users it holds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::UserStoreService;

/// Probe outcome reported in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Listening and the store is usable.
    Ready,
    /// Not yet bound.
    Starting,
    /// The store lock is poisoned.
    StoreUnavailable,
    /// Serving normally.
    Alive,
    /// Shutting down.
    Draining,
}

/// Body of both probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProbeReport {
    /// Probe outcome.
    pub status: ProbeStatus,
    /// Users currently stored, when the store could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
}

/// Listener flags plus a handle on the store being served.
#[derive(Debug)]
pub struct HealthState {
    roster: Arc<UserStoreService>,
    bound: AtomicBool,
    draining: AtomicBool,
}

impl HealthState {
    /// Health for a server about to serve `roster`.
    #[must_use]
    pub fn new(roster: Arc<UserStoreService>) -> Self {
        Self {
            roster,
            bound: AtomicBool::new(false),
            draining: AtomicBool::new(false),
        }
    }

    /// Record that the listener is bound.
    pub fn mark_ready(&self) {
        self.bound.store(true, Ordering::Release);
    }

    /// Record that the server is shutting down.
    pub fn mark_unhealthy(&self) {
        self.draining.store(true, Ordering::Release);
    }

    /// Readiness verdict.
    #[must_use]
    pub fn readiness(&self) -> ProbeReport {
        if !self.bound.load(Ordering::Acquire) {
            return ProbeReport {
                status: ProbeStatus::Starting,
                users: None,
            };
        }
        match self.roster.len() {
            Ok(users) => ProbeReport {
                status: ProbeStatus::Ready,
                users: Some(users),
            },
            Err(error) => {
                warn!(%error, "readiness probe cannot read the user store");
                ProbeReport {
                    status: ProbeStatus::StoreUnavailable,
                    users: None,
                }
            }
        }
    }

    /// Liveness verdict.
    #[must_use]
    pub fn liveness(&self) -> ProbeReport {
        let status = if self.draining.load(Ordering::Acquire) {
            ProbeStatus::Draining
        } else {
            ProbeStatus::Alive
        };
        ProbeReport {
            status,
            users: None,
        }
    }
}

fn respond(report: &ProbeReport) -> HttpResponse {
    let mut response = match report.status {
        ProbeStatus::Ready | ProbeStatus::Alive => HttpResponse::Ok(),
        ProbeStatus::Starting | ProbeStatus::StoreUnavailable | ProbeStatus::Draining => {
            HttpResponse::ServiceUnavailable()
        }
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Bound, with a usable store", body = ProbeReport),
        (status = 503, description = "Starting, or the store is unavailable", body = ProbeReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    respond(&state.readiness())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving", body = ProbeReport),
        (status = 503, description = "Draining", body = ProbeReport)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    respond(&state.liveness())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use crate::domain::{UserStore, default_users};

    #[fixture]
    fn health() -> web::Data<HealthState> {
        web::Data::new(HealthState::new(Arc::new(UserStoreService::new(
            UserStore::seeded(),
        ))))
    }

    async fn fetch(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Value) {
        let app =
            actix_test::init_service(App::new().app_data(state).service(ready).service(live))
                .await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("JSON body"))
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_waits_for_the_listener(health: web::Data<HealthState>) {
        let (status, body) = fetch(health, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"status": "starting"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_reports_the_seeded_roster(health: web::Data<HealthState>) {
        health.mark_ready();
        let (status, body) = fetch(health, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "ready", "users": default_users().len()})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_tracks_store_contents() {
        let roster = Arc::new(UserStoreService::default());
        let health = web::Data::new(HealthState::new(roster.clone()));
        health.mark_ready();
        assert_eq!(health.readiness().users, Some(0));

        roster.reseed(default_users()).expect("healthy lock");
        let (_, body) = fetch(health, "/health/ready").await;
        assert_eq!(body["users"], 3);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_while_draining(health: web::Data<HealthState>) {
        let (status, body) = fetch(health.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "alive"}));

        health.mark_unhealthy();
        let (status, body) = fetch(health, "/health/live").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"status": "draining"}));
    }
}
