use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::NormalizeController;

/// Dispatches the one-shot CLI commands. Long-running commands (`serve`,
/// `chat`) are driven directly from `main`.
pub struct Router<'a> {
    normalize_controller: NormalizeController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            normalize_controller: NormalizeController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Normalize { path } => self.normalize_controller.normalize(&path).await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
            Commands::Chat { .. } => unreachable!("chat command is handled separately in main"),
        }
    }
}
