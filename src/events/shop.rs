use crate::character::Player;
use crate::core::config::GameConfig;
use crate::core::constants::POTION_ITEM_NAME;
use crate::input::{validate_shop, ShopAction, ShopActionKind, ShopItem, ShopState, WeaponInfo};
use crate::items::WeaponCatalog;
use crate::messages::MessageLog;

/// Shop stock and purchase handling.
pub struct ShopSystem;

impl ShopSystem {
    pub fn shop_state(config: &GameConfig, weapons: &WeaponCatalog) -> ShopState {
        let potion_price = config.items.potion.price;
        ShopState {
            items: vec![ShopItem {
                name: POTION_ITEM_NAME.to_string(),
                price: potion_price,
                description: format!("Restores {} HP", config.items.potion.heal_amount),
            }],
            weapons: weapons
                .iter()
                .map(|w| WeaponInfo {
                    name: w.name().to_string(),
                    hp: w.hp(),
                    ap: w.ap(),
                    dp: w.dp(),
                })
                .collect(),
            potion_price,
        }
    }

    /// Applies one shop action. Invalid actions and failed purchases leave the
    /// player unchanged and emit a single warning.
    pub fn process(
        player: &mut Player,
        action: &ShopAction,
        weapons: &WeaponCatalog,
        log: &mut MessageLog,
    ) {
        if let Err(reason) = validate_shop(action) {
            log.warning(reason);
            return;
        }

        match action.kind {
            ShopActionKind::BuyPotion => {
                if let Err(e) = player.buy_potion(action.quantity, log) {
                    log.warning(e.to_string());
                }
            }
            ShopActionKind::BuyWeapon => {
                let name = action.item_name.as_deref().unwrap_or_default();
                match weapons.create(name) {
                    Some(weapon) => player.equip_weapon(weapon, log),
                    None => log.warning(format!(
                        "Unknown weapon: '{}'. Available: {}",
                        name.trim(),
                        weapons.names().join(", ")
                    )),
                }
            }
            ShopActionKind::Exit => log.info("You left the shop."),
        }
    }
}
