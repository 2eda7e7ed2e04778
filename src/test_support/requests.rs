#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Post,
    Get,
}

/// Trimmed request descriptor used as a stream payload in unit tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub host: String,
    pub path: String,
    pub id: Option<String>,
}

pub fn sample_requests() -> Vec<Request> {
    vec![
        Request {
            method: Method::Post,
            host: "service.example".into(),
            path: "user".into(),
            id: None,
        },
        Request {
            method: Method::Get,
            host: "service.example".into(),
            path: "user".into(),
            id: Some("3f5h67s4s".into()),
        },
    ]
}
