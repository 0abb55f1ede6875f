//! Module trait: anything that registers its routes into an App.

use crate::{App, CoreError};

pub trait Module {
    fn register_into(&mut self, app: &mut App) -> Result<(), CoreError>;
}
