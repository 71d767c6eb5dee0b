//! HTTP server rendering the HTML summary on every request.

use super::Host;
use super::common::{CommonArgs, Settings, error_chain, init_logging};
use crate::Result;
use crate::facts::{GitHubSource, aggregate_all};
use crate::reports::generate_html;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use clap::Parser;
use core::net::{IpAddr, Ipv4Addr};
use ohno::IntoAppError;
use std::io::{Write, stderr};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const LOG_TARGET: &str = "     serve";

/// Destination for request failures, written whatever the log level is.
pub type ErrorSink = Arc<Mutex<dyn Write + Send>>;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Port to listen on (default is the configured port, 3000 out of the box)
    #[arg(long, short = 'p', value_name = "PORT", env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(long, value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,
}

struct ServerState {
    settings: Settings,
    source: GitHubSource,
    errors: ErrorSink,
}

impl ServerState {
    fn fail(&self, message: &str) -> Response {
        log::error!(target: LOG_TARGET, "Unable to build the summary for '{}': {message}", self.settings.account);

        if let Ok(mut errors) = self.errors.lock() {
            let _ = writeln!(errors, "Error: {message}");
        }

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Serve the summary page until the process is stopped.
pub async fn serve<H: Host>(host: &mut H, args: &ServeArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let settings = Settings::from_args(&args.common)?;
    let port = args.port.unwrap_or(settings.port);

    let listener = TcpListener::bind((args.bind, port))
        .await
        .into_app_err_with(|| format!("binding to {}:{port}", args.bind))?;

    let local_addr = listener.local_addr().into_app_err("reading the bound address")?;
    log::info!(target: LOG_TARGET, "Listening on {local_addr}");
    let _ = writeln!(host.output(), "Server is listening on port {}", local_addr.port());

    serve_on(listener, settings, Arc::new(Mutex::new(stderr()))).await
}

/// Serve the summary page on an already bound listener, reporting failed requests to `errors`.
pub async fn serve_on(listener: TcpListener, settings: Settings, errors: ErrorSink) -> Result<()> {
    let app = router(settings, errors)?;
    axum::serve(listener, app).await.into_app_err("serving HTTP requests")
}

/// Routes of the summary server. Every request collects a fresh summary.
///
/// # Errors
///
/// Returns an error if the GitHub client cannot be created
pub fn router(settings: Settings, errors: ErrorSink) -> Result<Router> {
    let source = settings.data_source()?;
    let state = ServerState { settings, source, errors };
    Ok(Router::new().route("/", get(summary_page)).with_state(Arc::new(state)))
}

async fn summary_page(State(state): State<Arc<ServerState>>) -> Response {
    let result = match aggregate_all(&state.source, state.settings.page_size, None).await {
        Ok(result) => result,
        Err(e) => return state.fail(&error_chain(&e)),
    };

    let mut html = String::new();
    if let Err(e) = generate_html(&result, &mut html) {
        return state.fail(&e.to_string());
    }

    Html(html).into_response()
}
