pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::interests::handlers as interests;
use crate::mail::handlers as mail;
use crate::profile::{academics, experiences, projects, skills};
use crate::state::AppState;
use crate::users::{admin, handlers as users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Self-service: registration is the only unauthenticated write
        .route(
            "/api/v1/me",
            post(users::handle_register)
                .get(users::handle_get_me)
                .put(users::handle_update_me)
                .delete(users::handle_delete_me),
        )
        .route(
            "/api/v1/me/interesses",
            post(interests::handle_attach_own).get(interests::handle_list_own),
        )
        .route(
            "/api/v1/me/interesses/:id",
            axum::routing::delete(interests::handle_detach_own),
        )
        .route(
            "/api/v1/me/habilidades",
            post(skills::handle_create_own).get(skills::handle_list_own),
        )
        .route(
            "/api/v1/me/habilidades/:id",
            axum::routing::put(skills::handle_update_own).delete(skills::handle_delete_own),
        )
        .route(
            "/api/v1/me/formacoes-academicas",
            post(academics::handle_create_own).get(academics::handle_list_own),
        )
        .route(
            "/api/v1/me/formacoes-academicas/:id",
            axum::routing::put(academics::handle_update_own).delete(academics::handle_delete_own),
        )
        .route(
            "/api/v1/me/experiencias-profissionais",
            post(experiences::handle_create_own).get(experiences::handle_list_own),
        )
        .route(
            "/api/v1/me/experiencias-profissionais/:id",
            axum::routing::put(experiences::handle_update_own)
                .delete(experiences::handle_delete_own),
        )
        .route(
            "/api/v1/me/projetos",
            post(projects::handle_create_own).get(projects::handle_list_own),
        )
        .route(
            "/api/v1/me/projetos/:id",
            axum::routing::put(projects::handle_update_own).delete(projects::handle_delete_own),
        )
        // Admin: user management
        .route(
            "/api/v1/admin/users",
            get(admin::handle_list_users).post(admin::handle_create_user),
        )
        .route("/api/v1/admin/users/superuser", post(admin::handle_create_superuser))
        .route(
            "/api/v1/admin/users/send-email",
            post(mail::handle_send_email_to_selected),
        )
        .route(
            "/api/v1/admin/users/:user_id",
            get(admin::handle_get_user)
                .put(admin::handle_update_user)
                .delete(admin::handle_delete_user),
        )
        // Admin: per-user sub-resources
        .route(
            "/api/v1/admin/users/:user_id/interesses",
            post(interests::handle_admin_attach).get(interests::handle_admin_list_for_user),
        )
        .route(
            "/api/v1/admin/users/:user_id/interesses/:interesse_id",
            axum::routing::delete(interests::handle_admin_detach),
        )
        .route(
            "/api/v1/admin/users/:user_id/habilidades",
            post(skills::handle_admin_create).get(skills::handle_admin_list),
        )
        .route(
            "/api/v1/admin/users/:user_id/formacoes-academicas",
            post(academics::handle_admin_create).get(academics::handle_admin_list),
        )
        .route(
            "/api/v1/admin/users/:user_id/experiencias-profissionais",
            post(experiences::handle_admin_create).get(experiences::handle_admin_list),
        )
        .route(
            "/api/v1/admin/users/:user_id/projetos",
            post(projects::handle_admin_create).get(projects::handle_admin_list),
        )
        // Admin: global child records, ownership check bypassed
        .route(
            "/api/v1/admin/interesses/:id",
            get(interests::handle_admin_get)
                .put(interests::handle_admin_rename)
                .delete(interests::handle_admin_delete),
        )
        .route(
            "/api/v1/admin/habilidades/:id",
            get(skills::handle_admin_get)
                .put(skills::handle_admin_update)
                .delete(skills::handle_admin_delete),
        )
        .route(
            "/api/v1/admin/formacoes-academicas/:id",
            get(academics::handle_admin_get)
                .put(academics::handle_admin_update)
                .delete(academics::handle_admin_delete),
        )
        .route(
            "/api/v1/admin/experiencias-profissionais/:id",
            get(experiences::handle_admin_get)
                .put(experiences::handle_admin_update)
                .delete(experiences::handle_admin_delete),
        )
        .route(
            "/api/v1/admin/projetos/:id",
            get(projects::handle_admin_get)
                .put(projects::handle_admin_update)
                .delete(projects::handle_admin_delete),
        )
        // Bulk email broadcast with audience filters
        .route("/api/v1/send-email", post(mail::handle_send_email))
        .with_state(state)
}
