use serde::Serialize;
use utoipa::ToSchema;

/// One resource group in the API index.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointGroup {
    pub path: &'static str,
    pub methods: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiIndex {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointGroup>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    /// `postgres` or `memory`
    pub backend: &'static str,
    pub version: &'static str,
}

const ENDPOINTS: &[(&str, &[&str])] = &[
    ("/api/auth", &["POST /login", "POST /register", "GET /me", "PUT /me"]),
    (
        "/api/books",
        &[
            "GET",
            "POST",
            "GET /:id",
            "PUT /:id",
            "DELETE /:id",
            "POST /:id/checkout",
            "POST /:id/return",
            "GET /loans/me",
        ],
    ),
    (
        "/api/calendar",
        &[
            "GET /events",
            "POST /events",
            "GET /events/:id",
            "PUT /events/:id",
            "DELETE /events/:id",
        ],
    ),
    (
        "/api/feedback",
        &["GET", "POST", "GET /:id", "PUT /:id/status", "DELETE /:id"],
    ),
    (
        "/api/forms",
        &["GET", "POST", "GET /:id", "PUT /:id", "DELETE /:id", "GET /:id/download"],
    ),
    ("/api/staff", &["GET", "POST", "GET /:id", "PUT /:id", "DELETE /:id"]),
    ("/api/teachers", &["GET", "POST", "GET /:id", "PUT /:id", "DELETE /:id"]),
    ("/api/health", &["GET"]),
];

impl ApiIndex {
    pub fn current() -> Self {
        Self {
            message: "EduZone API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: ENDPOINTS
                .iter()
                .map(|(path, methods)| EndpointGroup {
                    path,
                    methods: methods.to_vec(),
                })
                .collect(),
        }
    }
}
