//! Shared state and HTTP routing

use crate::academy::{api as academy_api, insights::Insights, store::AcademyStore};
use crate::auth::{api as auth_api, auth_middleware, SessionGate};
use crate::middleware::{rate_limit_middleware, request_logging, RateLimiter};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SessionGate>,
    pub academy: Arc<AcademyStore>,
    pub insights: Arc<dyn Insights>,
    pub seed_enabled: bool,
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "🎓 NovaZone Academy backend operational"
}

pub fn build_router(state: AppState, login_limiter: RateLimiter) -> Router {
    // Login gets its own limiter; registration and the rest are not throttled
    let auth_routes = Router::new()
        .route(
            "/api/auth/login",
            post(auth_api::login).route_layer(middleware::from_fn_with_state(
                login_limiter,
                rate_limit_middleware,
            )),
        )
        .route("/api/auth/register", post(auth_api::register));

    let mut public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/courses", get(academy_api::list_courses))
        .route("/api/teachers", get(academy_api::list_teachers))
        .route("/api/quiz/:course_id", get(academy_api::get_course_quiz))
        .route("/api/community/posts", get(academy_api::list_posts));

    if state.seed_enabled {
        public_routes = public_routes.route("/api/seed-data", post(academy_api::seed_data));
    }

    // Everything below requires a valid bearer token
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth_api::get_current_account))
        .route("/api/auth/logout", post(auth_api::logout))
        .route("/api/courses", post(academy_api::create_course))
        .route(
            "/api/courses/:course_id/enroll",
            post(academy_api::enroll_in_course),
        )
        .route(
            "/api/teachers/recommendations/:subject",
            get(academy_api::teacher_recommendations),
        )
        .route(
            "/api/teachers/profile",
            put(academy_api::update_teacher_profile),
        )
        // GET takes a student id, PUT a progress record id
        .route(
            "/api/progress/:id",
            get(academy_api::get_student_progress).put(academy_api::update_progress),
        )
        .route("/api/quiz/submit", post(academy_api::submit_quiz))
        .route("/api/community/posts", post(academy_api::create_post))
        .route(
            "/api/dashboard/student/:student_id",
            get(academy_api::student_dashboard),
        )
        .route(
            "/api/dashboard/teacher/:teacher_id",
            get(academy_api::teacher_dashboard),
        )
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
