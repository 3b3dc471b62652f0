//! Lenormand card correspondences.
//!
//! Each of the 36 decans maps to one card of the Lenormand deck, read in
//! zodiac order from Rider (first decan of Aries) to Cross (last decan of
//! Pisces).

use crate::western::zodiac::{Sign, SIGN_ORDER};
use std::collections::HashMap;

const CARDS_IN_DECAN_ORDER: [&str; 36] = [
    "Rider", "Clover", "Ship",
    "House", "Tree", "Clouds",
    "Snake", "Coffin", "Bouquet",
    "Scythe", "Whip", "Birds",
    "Child", "Fox", "Bear",
    "Stars", "Stork", "Dog",
    "Tower", "Garden", "Mountain",
    "Paths", "Mice", "Heart",
    "Ring", "Book", "Letter",
    "Man", "Woman", "Lily",
    "Sun", "Moon", "Key",
    "Fish", "Anchor", "Cross",
];

lazy_static::lazy_static! {
    static ref LENORMAND_CARDS: HashMap<(Sign, u8), &'static str> = {
        let mut cards = HashMap::with_capacity(36);
        for (sign_index, sign) in SIGN_ORDER.iter().enumerate() {
            for decan in 1..=3u8 {
                let card = CARDS_IN_DECAN_ORDER[sign_index * 3 + (decan as usize - 1)];
                cards.insert((*sign, decan), card);
            }
        }
        cards
    };
}

/// Card for a sign and decan (1..=3). Any other decan has no card.
pub fn lenormand_card(sign: Sign, decan: u8) -> Option<&'static str> {
    LENORMAND_CARDS.get(&(sign, decan)).copied()
}

/// Same as [`lenormand_card`] but keyed by sign name, case-insensitive.
pub fn lenormand_card_by_name(sign: &str, decan: u8) -> Option<&'static str> {
    sign.parse::<Sign>().ok().and_then(|s| lenormand_card(s, decan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cards() {
        assert_eq!(lenormand_card(Sign::Aries, 1), Some("Rider"));
        assert_eq!(lenormand_card(Sign::Aries, 2), Some("Clover"));
        assert_eq!(lenormand_card(Sign::Aries, 3), Some("Ship"));
        assert_eq!(lenormand_card(Sign::Taurus, 1), Some("House"));
        assert_eq!(lenormand_card(Sign::Taurus, 3), Some("Clouds"));
        assert_eq!(lenormand_card(Sign::Aquarius, 2), Some("Moon"));
        assert_eq!(lenormand_card(Sign::Pisces, 1), Some("Fish"));
        assert_eq!(lenormand_card(Sign::Pisces, 3), Some("Cross"));
    }

    #[test]
    fn test_unknown_combinations() {
        assert_eq!(lenormand_card(Sign::Aries, 0), None);
        assert_eq!(lenormand_card(Sign::Aries, 4), None);
        assert_eq!(lenormand_card_by_name("InvalidSign", 1), None);
        assert_eq!(lenormand_card_by_name("libra", 3), Some("Mountain"));
    }
}
