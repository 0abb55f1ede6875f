//! StaticDiscovery: a fixed service table, for local runs and tests.

use std::collections::HashMap;

use fortune_core::ServiceDiscovery;

/// Service name -> instance base URLs, in registration order.
/// `resolve` returns every instance; the caller picks one.
#[derive(Clone, Debug, Default)]
pub struct StaticDiscovery {
    instances: HashMap<String, Vec<String>>,
}

impl StaticDiscovery {
    /// One instance per service.
    pub fn new(services: HashMap<String, String>) -> Self {
        Self {
            instances: services
                .into_iter()
                .map(|(name, url)| (name, vec![url]))
                .collect(),
        }
    }

    /// (name, url) pairs; a name given more than once gets several instances.
    pub fn from_slice(pairs: &[(&str, &str)]) -> Self {
        let mut instances: HashMap<String, Vec<String>> = HashMap::new();
        for (name, url) in pairs {
            instances
                .entry((*name).to_string())
                .or_default()
                .push((*url).to_string());
        }
        Self { instances }
    }
}

impl ServiceDiscovery for StaticDiscovery {
    fn resolve(&self, service_name: &str) -> Vec<String> {
        self.instances
            .get(service_name)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_are_instances_in_order() {
        let d = StaticDiscovery::from_slice(&[
            ("fortuneService", "http://10.0.0.1:5000"),
            ("other", "http://10.0.0.9:80"),
            ("fortuneService", "http://10.0.0.2:5000"),
        ]);
        assert_eq!(
            d.resolve("fortuneService"),
            vec!["http://10.0.0.1:5000", "http://10.0.0.2:5000"]
        );
        assert_eq!(d.resolve("other"), vec!["http://10.0.0.9:80"]);
    }

    #[test]
    fn unknown_service_resolves_to_nothing() {
        let d = StaticDiscovery::new(HashMap::from([(
            "fortuneService".to_string(),
            "http://127.0.0.1:5000".to_string(),
        )]));
        assert_eq!(d.resolve("fortuneService"), vec!["http://127.0.0.1:5000"]);
        assert!(d.resolve("FortuneService").is_empty());
    }
}
