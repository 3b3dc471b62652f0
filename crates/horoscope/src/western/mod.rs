pub mod lenormand;
pub mod zodiac;

pub use lenormand::{lenormand_card, lenormand_card_by_name};
pub use zodiac::{
    decompose_longitude, get_decan_index, normalize_degrees, ParseSignError, Sign, SignPlacement,
    SIGN_ORDER,
};
