// Minimal HTTP/1.1 listener exposing the admin routes
use crate::application::investments::fetch_investment;
use crate::application::report::{export_report, generate_report};
use crate::domain::error::AdminError;
use crate::state::AppState;
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

// Upper bound on the request line plus headers.
const MAX_HEAD_BYTES: u64 = 16 * 1024;

// Pause after a failed accept so fd exhaustion doesn't spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
        }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "Internal Server Error",
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len()
        );
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }
}

/// Dispatch one request to its handler.
pub async fn route(state: &AppState, method: &str, target: &str) -> HttpResponse {
    let path = target.split('?').next().unwrap_or(target);

    let matched = if path == "/generate-csv" {
        Route::GenerateCsv
    } else if let Some(id) = investment_id(path) {
        Route::Investment(id)
    } else {
        return HttpResponse::text(404, "Not Found");
    };

    if method != "GET" {
        return HttpResponse::text(405, "Method Not Allowed");
    }

    match matched {
        Route::GenerateCsv => generate_csv(state).await,
        Route::Investment(id) => get_investment(state, id).await,
    }
}

enum Route<'a> {
    GenerateCsv,
    Investment(&'a str),
}

fn investment_id(path: &str) -> Option<&str> {
    path.strip_prefix("/investments/")
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

async fn get_investment(state: &AppState, id: &str) -> HttpResponse {
    match fetch_investment(state, id).await {
        Ok(body) => HttpResponse {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        },
        Err(e) => {
            tracing::error!(%id, error = %e, "Failed to fetch investment");
            HttpResponse::text(500, "Internal Server Error")
        }
    }
}

async fn generate_csv(state: &AppState) -> HttpResponse {
    let result = async {
        let csv = generate_report(state).await?;
        export_report(state, &csv).await?;
        Ok::<_, AdminError>(csv)
    }
    .await;

    match result {
        Ok(csv) => HttpResponse {
            status: 200,
            content_type: "text/csv",
            body: csv,
        },
        Err(e) => {
            tracing::error!(error = %e, "Error generating CSV");
            HttpResponse::text(500, "Error generating CSV")
        }
    }
}

/// Accept connections on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    state: AppState,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), AdminError>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        continue;
                    }
                };
                let state = state.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(&state, stream).await {
                        tracing::warn!(%peer, error = %e, "connection error");
                    }
                });
            }
            _ = &mut shutdown => {
                tracing::info!("server shutting down");
                return Ok(());
            }
        }
    }
}

async fn handle_connection(state: &AppState, mut stream: TcpStream) -> Result<(), AdminError> {
    let deadline = state.config.header_read_timeout();
    let (method, target) = match tokio::time::timeout(deadline, read_head(&mut stream)).await {
        Ok(head) => head?,
        Err(_) => {
            tracing::debug!(timeout = ?deadline, "request head not received in time, dropping connection");
            return Ok(());
        }
    };

    let response = match (method, target) {
        (Some(method), Some(target)) => {
            tracing::debug!(%method, %target, "request");
            route(state, &method, &target).await
        }
        _ => HttpResponse::text(400, "Bad Request"),
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Read the request line and drain the headers, returning method and target.
async fn read_head(stream: &mut TcpStream) -> Result<(Option<String>, Option<String>), AdminError> {
    let mut reader = BufReader::new((&mut *stream).take(MAX_HEAD_BYTES));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // Headers are drained and ignored; request bodies are never read.
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    Ok((
        parts.next().map(str::to_string),
        parts.next().map(str::to_string),
    ))
}
