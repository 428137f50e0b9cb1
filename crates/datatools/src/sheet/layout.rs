//! Row placement in the fixed workbook grids. Decathlon groups share one
//! 30-row block per group on the address sheet; the two youth tracks and the
//! four kids tracks sit at fixed offsets.

use tracing::warn;

pub const ADDRESS_SHEET: &str = "Adressen";
pub const KIDS_SHEET: &str = "Kinder+Jugend";

/// Which fixed grid a group's rows land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupClass {
    /// `"Gruppe N"`, one 30-row block per group number.
    Decathlon(u32),
    /// `"Gruppe J5K"`, the youth pentathlon track.
    YouthPentathlon,
    /// `"Gruppe J7K"`, the youth heptathlon track.
    YouthHeptathlon,
    /// One of the four kids tracks on the kids sheet.
    Kids(KidsTrack),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KidsTrack {
    U4U6,
    U8,
    U10,
    U12,
}

impl KidsTrack {
    fn row_offset(self) -> u32 {
        match self {
            Self::U4U6 => 3,
            Self::U8 => 33,
            Self::U10 => 63,
            Self::U12 => 123,
        }
    }
}

impl GroupClass {
    /// Classifies a group by its name. `J5K`/`J7K` are reserved youth codes
    /// and never parse as numbered decathlon groups.
    pub fn classify(group_name: &str) -> Option<Self> {
        if group_name.contains("J5K") {
            return Some(Self::YouthPentathlon);
        }
        if group_name.contains("J7K") {
            return Some(Self::YouthHeptathlon);
        }
        if group_name.contains("Gruppe") {
            let number = group_name
                .split_whitespace()
                .nth(1)
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n >= 1);
            return match number {
                Some(number) => Some(Self::Decathlon(number)),
                None => {
                    warn!("group '{group_name}' has no usable group number");
                    None
                }
            };
        }

        match group_name {
            "U4/U6" | "U4" | "U6" => Some(Self::Kids(KidsTrack::U4U6)),
            "U8" => Some(Self::Kids(KidsTrack::U8)),
            "U10" => Some(Self::Kids(KidsTrack::U10)),
            "U12" => Some(Self::Kids(KidsTrack::U12)),
            _ => {
                warn!("group '{group_name}' matches no sheet layout");
                None
            }
        }
    }

    /// Absolute sheet row for the athlete at `ordinal` within the group.
    pub fn row(&self, ordinal: u32) -> u32 {
        match self {
            Self::Decathlon(number) => (number - 1) * 30 + ordinal + 3,
            Self::YouthPentathlon => 243 + ordinal,
            Self::YouthHeptathlon => 273 + ordinal,
            Self::Kids(track) => track.row_offset() + ordinal,
        }
    }

    pub fn sheet(&self) -> &'static str {
        match self {
            Self::Kids(_) => KIDS_SHEET,
            _ => ADDRESS_SHEET,
        }
    }

    /// Kids rosters are ordered by gender before row assignment.
    pub fn sorts_by_gender(&self) -> bool {
        matches!(self, Self::Kids(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decathlon_row_formula() {
        let class = GroupClass::classify("Gruppe 1").unwrap();
        assert_eq!(class.row(0), 3);

        let class = GroupClass::classify("Gruppe 2").unwrap();
        assert_eq!(class.row(5), 35);
    }

    #[test]
    fn test_youth_codes_are_not_numbered_groups() {
        assert_eq!(
            GroupClass::classify("Gruppe J5K"),
            Some(GroupClass::YouthPentathlon)
        );
        assert_eq!(
            GroupClass::classify("Gruppe J7K"),
            Some(GroupClass::YouthHeptathlon)
        );
    }

    #[test]
    fn test_youth_rows_use_fixed_offsets() {
        assert_eq!(GroupClass::YouthPentathlon.row(2), 245);
        assert_eq!(GroupClass::YouthHeptathlon.row(0), 273);
    }

    #[test]
    fn test_kids_tracks() {
        assert_eq!(
            GroupClass::classify("U4/U6"),
            Some(GroupClass::Kids(KidsTrack::U4U6))
        );
        assert_eq!(GroupClass::Kids(KidsTrack::U4U6).row(1), 4);
        assert_eq!(GroupClass::Kids(KidsTrack::U8).row(0), 33);
        assert_eq!(GroupClass::Kids(KidsTrack::U10).row(0), 63);
        assert_eq!(GroupClass::Kids(KidsTrack::U12).row(0), 123);
        assert_eq!(GroupClass::Kids(KidsTrack::U12).sheet(), KIDS_SHEET);
    }

    #[test]
    fn test_unknown_group_has_no_layout() {
        assert_eq!(GroupClass::classify("Gruppe x"), None);
        assert_eq!(GroupClass::classify("Irgendwas"), None);
    }
}
