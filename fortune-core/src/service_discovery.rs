//! Service discovery trait: resolve(service_name) -> base URLs.

/// How to resolve services by name. Implementations: static config, registry clients, etc.
/// An empty list means the service is unknown or has no healthy instance.
pub trait ServiceDiscovery: Send + Sync {
    fn resolve(&self, service_name: &str) -> Vec<String>;
}
