use std::sync::Mutex;

use crate::domain::HeroId;
use crate::domain::ports::DeleteConfirmation;

/// Confirmation that answers with a fixed choice and records each prompt.
#[derive(Debug, Default)]
pub struct ScriptedConfirmation {
    accept: bool,
    prompts: Mutex<Vec<HeroId>>,
}

impl ScriptedConfirmation {
    /// Agree to every deletion.
    pub fn accepting() -> Self {
        Self {
            accept: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Decline every deletion.
    pub fn declining() -> Self {
        Self::default()
    }

    /// Heroes the user was asked about, in order.
    pub fn prompts(&self) -> Vec<HeroId> {
        match self.prompts.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("confirmation mutex"),
        }
    }
}

impl DeleteConfirmation for ScriptedConfirmation {
    fn confirm_delete(&self, id: HeroId) -> bool {
        match self.prompts.lock() {
            Ok(mut guard) => guard.push(id),
            Err(_) => panic!("confirmation mutex"),
        }
        self.accept
    }
}
