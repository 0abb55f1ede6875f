//! Fortune repository: where the service gets its fortunes from.

use fortune_core::{CoreError, Fortune};
use rand::seq::SliceRandom;

pub trait FortuneRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Fortune>, CoreError>;
    /// None when there is nothing to pick from.
    fn random(&self) -> Result<Option<Fortune>, CoreError>;
}

/// Fixed in-memory list. `default()` is seeded with a few fortunes.
#[derive(Clone, Debug)]
pub struct InMemoryFortuneRepository {
    fortunes: Vec<Fortune>,
}

impl InMemoryFortuneRepository {
    pub fn with_fortunes(fortunes: Vec<Fortune>) -> Self {
        Self { fortunes }
    }
}

impl Default for InMemoryFortuneRepository {
    fn default() -> Self {
        Self::with_fortunes(vec![
            Fortune::new(1000, "People are naturally attracted to you."),
            Fortune::new(1001, "You learn from your mistakes... You will learn a lot today."),
            Fortune::new(1002, "If you have something good in your life, don't let it go!"),
            Fortune::new(1003, "What ever you're goal is in life, embrace it visualize it, and for it will be yours."),
            Fortune::new(1004, "Your shoes will make you happy today."),
            Fortune::new(1005, "You cannot love life until you live the life you love."),
            Fortune::new(1006, "Be on the lookout for coming events; They cast their shadows beforehand."),
            Fortune::new(1007, "Land is always on the mind of a flying bird."),
            Fortune::new(1008, "The man or woman you desire feels the same about you."),
            Fortune::new(1009, "Meeting adversity well is the source of your strength."),
        ])
    }
}

impl FortuneRepository for InMemoryFortuneRepository {
    fn all(&self) -> Result<Vec<Fortune>, CoreError> {
        Ok(self.fortunes.clone())
    }

    fn random(&self) -> Result<Option<Fortune>, CoreError> {
        Ok(self.fortunes.choose(&mut rand::thread_rng()).cloned())
    }
}
