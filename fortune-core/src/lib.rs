//! Fortune core: model, service discovery trait, routing, request handling, HTTP server.

pub mod fortune;
pub mod http;
pub mod module;
pub mod router;
pub mod service_discovery;

pub use fortune::Fortune;
pub use module::Module;
pub use router::Router;
pub use service_discovery::ServiceDiscovery;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("route not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Request handler: request body bytes -> JSON response bytes.
pub type Handler = Box<dyn Fn(&[u8]) -> Result<Vec<u8>, CoreError> + Send + Sync>;

/// Core app: a router of handlers.
pub struct App {
    router: Router,
}

impl App {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Register a route. Path is exact (e.g. "api/fortunes/all"). Registering the same (method, path) twice is an error.
    pub fn register_route(
        &mut self,
        method: &str,
        path: &str,
        handler: Handler,
    ) -> Result<(), CoreError> {
        self.router.insert(method, path, handler)
    }

    /// Shorthand for register_route("GET", ..).
    pub fn get(&mut self, path: &str, handler: Handler) -> Result<(), CoreError> {
        self.register_route("GET", path, handler)
    }

    /// Register a module (e.g. the fortunes controller).
    pub fn register(&mut self, module: &mut dyn Module) -> Result<(), CoreError> {
        module.register_into(self)
    }

    /// Handle a request without HTTP: match route, call handler. Used by tests and by the HTTP layer.
    pub fn handle_request(
        &self,
        method: &str,
        path: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, CoreError> {
        let handler = self
            .router
            .lookup(method, path)
            .ok_or_else(|| CoreError::NotFound(format!("{} {}", method, path)))?;
        handler(body)
    }

    /// Run HTTP server (blocks until Ctrl-C).
    pub fn run(self, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        http::run(std::sync::Arc::new(self), host, port)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
