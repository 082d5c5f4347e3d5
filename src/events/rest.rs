use crate::character::Player;
use crate::core::constants::POTION_ITEM_NAME;
use crate::input::{validate_use_item, UseItemAction};
use crate::messages::MessageLog;

/// Optional potion use between encounters.
pub struct RestSystem;

impl RestSystem {
    pub fn process(player: &mut Player, action: Option<&UseItemAction>, log: &mut MessageLog) {
        let Some(action) = action else {
            log.info("You decided not to rest.");
            return;
        };

        if let Err(reason) = validate_use_item(action) {
            log.warning(reason);
            return;
        }
        if !action.item_name.trim().eq_ignore_ascii_case(POTION_ITEM_NAME) {
            log.warning(format!("Unknown item: '{}'", action.item_name.trim()));
            return;
        }

        if let Err(e) = player.use_potion(action.quantity, log) {
            log.warning(e.to_string());
        }
    }
}
