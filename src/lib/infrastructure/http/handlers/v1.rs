//! Version 1 of the API

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::{
        dispatcher::MailDispatcher, mail::TemplateRenderer, settings::SettingsManagement,
    },
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod mail;
pub mod settings;
pub mod uptime;

/// Routes of version 1 of the API
pub fn router<D, S, R>() -> Router<AppState<D, S, R>>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    Router::new()
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler::<D, S, R>))
        .route(
            "/tenants/:tenant_id/mail-settings",
            get(settings::get_settings::handler::<D, S, R>)
                .put(settings::update_settings::handler::<D, S, R>)
                .delete(settings::remove_settings::handler::<D, S, R>),
        )
        .route(
            "/tenants/:tenant_id/mail-settings/defaults",
            post(settings::ensure_defaults::handler::<D, S, R>),
        )
        .route(
            "/tenants/:tenant_id/mail",
            post(mail::send_mail::handler::<D, S, R>),
        )
}
