mod bitbucket;
mod config;
mod event;
mod github;
mod help;
mod hooks;
mod http;
mod notifier;
mod provider;

use std::rc::Rc;

use actix_web::{middleware::Logger, App, HttpServer};
use color_eyre::eyre;

use crate::{config::Config, hooks::Relay, notifier::Pushbullet};

#[actix_web::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install()?;
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(tracing_subscriber::fmt().finish())?;

    let config = Config::from_env()?;
    let bind = (config.host.clone(), config.port());
    tracing::info!(
        pushbullet = config.pushbullet_url.as_str(),
        "Listening on {}:{}",
        bind.0,
        bind.1
    );

    HttpServer::new(move || {
        let push_timeout = config.push_timeout();
        let notes = Pushbullet::new(&config.pushbullet_url, push_timeout);
        App::new()
            .data(Relay {
                notes: Rc::new(notes),
                push_timeout,
            })
            .wrap(Logger::default())
            .configure(hooks::configure)
    })
    .bind(bind)?
    .run()
    .await
    .map_err(Into::into)
}
