//! Exact-match router: (METHOD, path) -> handler.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::{CoreError, Handler};

/// Keys are the upper-cased method and the path with leading/trailing '/' stripped,
/// so "get /api/fortunes/all/" and "GET api/fortunes/all" are the same route.
#[derive(Default)]
pub struct Router {
    routes: HashMap<(String, String), Handler>,
}

fn route_key(method: &str, path: &str) -> (String, String) {
    (method.to_uppercase(), path.trim_matches('/').to_owned())
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `CoreError::Validation` when the route is already taken.
    pub fn insert(&mut self, method: &str, path: &str, handler: Handler) -> Result<(), CoreError> {
        match self.routes.entry(route_key(method, path)) {
            Entry::Occupied(taken) => {
                let (method, path) = taken.key();
                Err(CoreError::Validation(format!(
                    "route already registered: {} {}",
                    method, path
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(handler);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, method: &str, path: &str) -> Option<&Handler> {
        self.routes.get(&route_key(method, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(body: &'static [u8]) -> Handler {
        Box::new(move |_: &[u8]| -> Result<Vec<u8>, CoreError> { Ok(body.to_vec()) })
    }

    #[test]
    fn method_is_case_insensitive_and_slashes_ignored() {
        let mut r = Router::new();
        r.insert("get", "/api/fortunes/all", reply(b"all")).unwrap();
        let h = r.lookup("GET", "api/fortunes/all/").unwrap();
        assert_eq!(h(b"").unwrap(), b"all");
        assert!(r.lookup("POST", "api/fortunes/all").is_none());
        assert!(r.lookup("GET", "api/fortunes").is_none());
    }

    #[test]
    fn same_route_twice_keeps_the_first_handler() {
        let mut r = Router::new();
        r.insert("GET", "api/fortunes/random", reply(b"first")).unwrap();
        let err = r
            .insert("get", "/api/fortunes/random", reply(b"second"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: route already registered: GET api/fortunes/random"
        );
        assert_eq!(r.len(), 1);
        let h = r.lookup("GET", "api/fortunes/random").unwrap();
        assert_eq!(h(b"").unwrap(), b"first");
    }
}
