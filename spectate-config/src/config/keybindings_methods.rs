//! Keybinding management methods for `Config`.

use super::Config;
use crate::types::KeyBinding;
use std::collections::HashSet;

impl Config {
    /// Merge the family's default keybindings into the user's list.
    ///
    /// Only adds keybindings for actions that don't already exist in the
    /// user's config, so a user who rebinds `swap` loses every default `swap`
    /// key, not just one of them.
    pub fn merge_default_keybindings(&mut self) {
        let existing_actions: HashSet<String> = self
            .keybindings
            .iter()
            .map(|kb| kb.action.clone())
            .collect();

        let mut added_count = 0;
        for default_kb in crate::defaults::keybindings(self.family) {
            if !existing_actions.contains(&default_kb.action) {
                log::debug!(
                    "Adding default keybinding: {} -> {}",
                    default_kb.key,
                    default_kb.action
                );
                self.keybindings.push(default_kb);
                added_count += 1;
            }
        }

        if added_count > 0 {
            log::info!("Merged {} default keybinding(s) into config", added_count);
        }
    }

    /// Keybindings with family defaults filled in, without mutating `self`.
    pub fn effective_keybindings(&self) -> Vec<KeyBinding> {
        let mut merged = self.clone();
        merged.merge_default_keybindings();
        merged.keybindings
    }
}
