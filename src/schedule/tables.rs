// Best-time tables for each platform.
//
// These are fixed engagement rules of thumb, not measured from our own
// accounts. Hours are local time on a 24-hour clock.

use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Social platforms we schedule posts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    LinkedIn,
    X,
    Facebook,
    TikTok,
}

/// A weekday and hour that tends to perform well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingSlot {
    pub weekday: Weekday,
    pub hour: u32,
}

const INSTAGRAM_DAYS: &[Weekday] = &[Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
const INSTAGRAM_HOURS: &[u32] = &[11, 13, 19];

const LINKEDIN_DAYS: &[Weekday] = &[Weekday::Tue, Weekday::Wed, Weekday::Thu];
const LINKEDIN_HOURS: &[u32] = &[8, 12, 17];

const X_DAYS: &[Weekday] = &[
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
const X_HOURS: &[u32] = &[9, 12];

const FACEBOOK_DAYS: &[Weekday] = &[Weekday::Wed, Weekday::Thu, Weekday::Fri];
const FACEBOOK_HOURS: &[u32] = &[9, 13];

const TIKTOK_DAYS: &[Weekday] = &[Weekday::Tue, Weekday::Thu, Weekday::Fri];
const TIKTOK_HOURS: &[u32] = &[14, 19, 21];

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::X,
        Platform::Facebook,
        Platform::TikTok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::LinkedIn => "linkedin",
            Platform::X => "x",
            Platform::Facebook => "facebook",
            Platform::TikTok => "tiktok",
        }
    }

    pub fn best_days(&self) -> &'static [Weekday] {
        match self {
            Platform::Instagram => INSTAGRAM_DAYS,
            Platform::LinkedIn => LINKEDIN_DAYS,
            Platform::X => X_DAYS,
            Platform::Facebook => FACEBOOK_DAYS,
            Platform::TikTok => TIKTOK_DAYS,
        }
    }

    pub fn best_hours(&self) -> &'static [u32] {
        match self {
            Platform::Instagram => INSTAGRAM_HOURS,
            Platform::LinkedIn => LINKEDIN_HOURS,
            Platform::X => X_HOURS,
            Platform::Facebook => FACEBOOK_HOURS,
            Platform::TikTok => TIKTOK_HOURS,
        }
    }

    /// Every (day, hour) slot in the table, in day then hour order.
    pub fn best_slots(&self) -> Vec<PostingSlot> {
        self.best_days()
            .iter()
            .flat_map(|&weekday| {
                self.best_hours()
                    .iter()
                    .map(move |&hour| PostingSlot { weekday, hour })
            })
            .collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" | "ig" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::LinkedIn),
            "x" | "twitter" => Ok(Platform::X),
            "facebook" | "fb" => Ok(Platform::Facebook),
            "tiktok" => Ok(Platform::TikTok),
            other => anyhow::bail!(
                "Unknown platform '{other}'. Expected one of: instagram, linkedin, x, facebook, tiktok"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Twitter".parse::<Platform>().unwrap(), Platform::X);
        assert_eq!("IG".parse::<Platform>().unwrap(), Platform::Instagram);
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_as_str_round_trips() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(Platform::Instagram.best_slots().len(), 12);
        assert_eq!(Platform::LinkedIn.best_slots().len(), 9);
        assert_eq!(Platform::X.best_slots().len(), 10);
        assert_eq!(Platform::Facebook.best_slots().len(), 6);
        assert_eq!(Platform::TikTok.best_slots().len(), 9);
    }

    #[test]
    fn test_hours_are_valid() {
        for platform in Platform::ALL {
            assert!(platform.best_hours().iter().all(|&h| h < 24));
            assert!(platform.best_hours().windows(2).all(|w| w[0] < w[1]));
        }
    }
}
