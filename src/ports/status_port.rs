//! Status snapshot publication port trait.

use crate::domain::bot::BotStatus;
use crate::domain::error::BotError;

pub trait StatusPort {
    /// Overwrite the snapshot wholesale; only the latest state is retained.
    fn publish(&self, status: &BotStatus) -> Result<(), BotError>;
}
