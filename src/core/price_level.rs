use crate::quantity::PencePerKilowattHour;

/// Price tier of a half-hour, used only to pick the visual marker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PriceLevel {
    Negative,
    Cheap,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl From<PencePerKilowattHour> for PriceLevel {
    /// Upper bounds are exclusive except for [`PriceLevel::Expensive`], which includes 28p.
    fn from(rate: PencePerKilowattHour) -> Self {
        let pence = rate.0;
        if pence < 0.0 {
            Self::Negative
        } else if pence < 10.0 {
            Self::Cheap
        } else if pence < 23.0 {
            Self::Moderate
        } else if pence <= 28.0 {
            Self::Expensive
        } else {
            Self::VeryExpensive
        }
    }
}

impl PriceLevel {
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Negative => "\u{1F535}",
            Self::Cheap => "\u{1F7E2}",
            Self::Moderate => "\u{1F7E1}",
            Self::Expensive => "\u{1F534}",
            Self::VeryExpensive => "\u{26AB}",
        }
    }
}
