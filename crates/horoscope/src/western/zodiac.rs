//! Zodiac signs and decans.
//!
//! The ecliptic is divided into 12 signs of 30 degrees, each split into 3
//! decans of 10 degrees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SIGN_SPAN: f64 = 30.0;
pub const DECAN_SPAN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Zodiac order, starting at 0° Aries.
pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    pub fn from_index(index: usize) -> Sign {
        SIGN_ORDER[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sign: {0}")]
pub struct ParseSignError(pub String);

impl FromStr for Sign {
    type Err = ParseSignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SIGN_ORDER
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSignError(s.to_string()))
    }
}

/// A longitude split into sign, decan and degree within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPlacement {
    pub sign: Sign,
    pub decan: u8,
    pub degree_in_sign: f64,
    pub longitude: f64,
}

/// Wrap any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Given degree in sign (0–29.999...), returns decan index 1, 2, or 3.
pub fn get_decan_index(degree_in_sign: f64) -> u8 {
    if degree_in_sign < DECAN_SPAN {
        1
    } else if degree_in_sign < 2.0 * DECAN_SPAN {
        2
    } else {
        3
    }
}

/// Decompose an ecliptic longitude into sign, decan and degree in sign.
pub fn decompose_longitude(longitude: f64) -> SignPlacement {
    let lon = normalize_degrees(longitude);
    let sign_index = ((lon / SIGN_SPAN).floor() as usize).min(11);
    let degree_in_sign = lon - sign_index as f64 * SIGN_SPAN;

    SignPlacement {
        sign: Sign::from_index(sign_index),
        decan: get_decan_index(degree_in_sign),
        degree_in_sign,
        longitude: lon,
    }
}
