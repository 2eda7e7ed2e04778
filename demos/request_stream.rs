//! Pushes two mock HTTP requests through an observable and handles them.
//!
//! Prints each handled request, `complete`, then `unsubscribed` from the explicit
//! unsubscribe. Set `PUSH_OBSERVABLE_LOG_LEVEL=debug` for observer internals.

use std::error::Error;

use chrono::{DateTime, Utc};
use push_observable::logger::{log_arg, set_log_level, Logger};
use push_observable::observable::{HandlerSet, Observable, ObservableConfig, ObservableError};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Method {
    Post,
    Get,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Ok = 200,
    InternalServerError = 500,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct User {
    name: String,
    age: u32,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    is_deleted: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
struct Params {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
struct Request {
    method: Method,
    host: String,
    path: String,
    params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<User>,
}

fn mock_requests() -> Vec<Request> {
    let user = User {
        name: "User Name".into(),
        age: 26,
        roles: vec!["user".into(), "admin".into()],
        created_at: Utc::now(),
        is_deleted: false,
    };

    vec![
        Request {
            method: Method::Post,
            host: "service.example".into(),
            path: "user".into(),
            params: Params::default(),
            body: Some(user),
        },
        Request {
            method: Method::Get,
            host: "service.example".into(),
            path: "user".into(),
            params: Params {
                id: Some("3f5h67s4s".into()),
            },
            body: None,
        },
    ]
}

fn handle_request(logger: &Logger, request: &Request) -> Status {
    let payload = serde_json::to_value(request).unwrap_or_default();
    logger.info_with(vec![log_arg("handling request"), log_arg(payload)]);
    Status::Ok
}

fn handle_error(logger: &Logger, error: &ObservableError) -> Status {
    logger.error(format!("request stream failed: {error}"));
    Status::InternalServerError
}

fn main() -> Result<(), Box<dyn Error>> {
    if let Ok(level) = std::env::var("PUSH_OBSERVABLE_LOG_LEVEL") {
        set_log_level(level)?;
    }
    let logger = Logger::new("request-stream-demo");

    let requests: Observable<Request> =
        Observable::from(mock_requests()).with_config(ObservableConfig::from_env()?);

    let handlers = HandlerSet::new()
        .with_next({
            let logger = logger.clone();
            move |request: &Request| {
                let status = handle_request(&logger, request);
                logger.debug(format!("responded with {}", status as u16));
            }
        })
        .with_error({
            let logger = logger.clone();
            move |error: &ObservableError| {
                let status = handle_error(&logger, error);
                logger.debug(format!("responded with {}", status as u16));
            }
        })
        .with_complete({
            let logger = logger.clone();
            move || logger.info("complete")
        });

    let subscription = requests.subscribe(handlers);
    subscription.unsubscribe();

    Ok(())
}
