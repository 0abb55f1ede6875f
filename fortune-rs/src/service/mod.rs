//! Fortune service: the provider side. FortunesController exposes a repository over HTTP.

mod repository;

pub use repository::{FortuneRepository, InMemoryFortuneRepository};

use std::sync::Arc;

use fortune_core::{App, CoreError, Module};

pub const ALL_FORTUNES_PATH: &str = "api/fortunes/all";
pub const RANDOM_FORTUNE_PATH: &str = "api/fortunes/random";

/// GET api/fortunes/all -> JSON array, GET api/fortunes/random -> JSON object
/// (404 when the repository is empty). Register via app.register(&mut controller).
pub struct FortunesController {
    repository: Arc<dyn FortuneRepository>,
}

impl FortunesController {
    pub fn new(repository: impl FortuneRepository + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

impl Module for FortunesController {
    fn register_into(&mut self, app: &mut App) -> Result<(), CoreError> {
        let repo = Arc::clone(&self.repository);
        app.get(
            ALL_FORTUNES_PATH,
            Box::new(move |_body: &[u8]| -> Result<Vec<u8>, CoreError> {
                tracing::debug!("all fortunes");
                let all = repo.all()?;
                Ok(serde_json::to_vec(&all)?)
            }),
        )?;
        let repo = Arc::clone(&self.repository);
        app.get(
            RANDOM_FORTUNE_PATH,
            Box::new(move |_body: &[u8]| -> Result<Vec<u8>, CoreError> {
                tracing::debug!("random fortune");
                let fortune = repo
                    .random()?
                    .ok_or_else(|| CoreError::NotFound("no fortunes available".into()))?;
                Ok(serde_json::to_vec(&fortune)?)
            }),
        )?;
        Ok(())
    }
}
