use std::{rc::Rc, time::Duration};

use actix_web::{http::StatusCode, web, HttpResponse, Resource};
use tracing::Instrument as _;

use crate::{
    help,
    http::{HookRoute, ARGS},
    notifier::{self, message, DispatchError, Note, NoteService},
    provider::{MalformedPayload, Provider},
};

/// Push payloads routinely exceed actix's default form limit.
const PAYLOAD_LIMIT: usize = 10 << 20;

/// Per-worker state shared by hook handlers.
pub struct Relay {
    pub notes: Rc<dyn NoteService>,
    pub push_timeout: Duration,
}

#[derive(Debug, serde::Deserialize)]
pub struct PushForm {
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PushHookError {
    #[error("form field `payload` is missing or empty")]
    MissingPayload,
    #[error(transparent)]
    Payload(#[from] MalformedPayload),
    #[error("failed to render notification")]
    Render(#[source] askama::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl actix_web::ResponseError for PushHookError {
    fn status_code(&self) -> StatusCode {
        match self {
            PushHookError::MissingPayload => StatusCode::BAD_REQUEST,
            PushHookError::Payload(_) => StatusCode::BAD_REQUEST,
            PushHookError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PushHookError::Dispatch(DispatchError::UpstreamUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PushHookError::Dispatch(DispatchError::DeviceNotFound(_)) => StatusCode::NOT_FOUND,
            PushHookError::Dispatch(DispatchError::AllDeliveriesFailed { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(hook_resource("/hook/push").route(web::post().to(github_push)))
        .service(hook_resource("/ghhook/push").route(web::post().to(github_push)))
        .service(hook_resource("/bbhook/push").route(web::post().to(bitbucket_push)))
        .route("/", web::get().to(help::index));
}

fn hook_resource(prefix: &str) -> Resource {
    web::resource(format!("{}/{{{}:.*}}", prefix, ARGS))
        .app_data(
            web::FormConfig::default()
                .limit(PAYLOAD_LIMIT)
                .error_handler(|err, _| {
                    tracing::warn!("Rejected form body: {}", err);
                    actix_web::error::ErrorBadRequest(err)
                }),
        )
}

async fn github_push(
    route: HookRoute,
    form: web::Form<PushForm>,
    relay: web::Data<Relay>,
) -> Result<HttpResponse, PushHookError> {
    push_hook(Provider::GitHub, route, form.into_inner(), &relay).await
}

async fn bitbucket_push(
    route: HookRoute,
    form: web::Form<PushForm>,
    relay: web::Data<Relay>,
) -> Result<HttpResponse, PushHookError> {
    push_hook(Provider::BitBucket, route, form.into_inner(), &relay).await
}

async fn push_hook(
    provider: Provider,
    route: HookRoute,
    form: PushForm,
    relay: &Relay,
) -> Result<HttpResponse, PushHookError> {
    let span = tracing::info_span!(
        "processing push hook",
        provider = provider.who(),
        device = ?route.device,
    );

    async move {
        if form.payload.is_empty() {
            return Err(PushHookError::MissingPayload);
        }

        let event = provider.normalize(form.payload.as_bytes()).map_err(|err| {
            tracing::warn!("Rejected payload: {}", err);
            err
        })?;
        let body = message::render(&event).map_err(|err| {
            tracing::error!("Failed to render notification: {}", err);
            PushHookError::Render(err)
        })?;
        let note = Note {
            title: provider.who(),
            body,
        };

        let report = notifier::dispatch(
            relay.notes.as_ref(),
            &route.key,
            route.device,
            &note,
            relay.push_timeout,
        )
        .await?;
        tracing::info!(
            attempted = report.attempted,
            delivered = report.delivered,
            "Forwarded {} commits pushed to {}/{}",
            event.commits.len(),
            event.repo_owner,
            event.repo_name,
        );

        Ok(HttpResponse::Ok().finish())
    }
    .instrument(span)
    .await
}
