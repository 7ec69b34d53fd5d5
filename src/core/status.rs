//! Status domains and their badge colours

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Colour class of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Red,
    Yellow,
    Blue,
    /// Fallback for values outside a known domain
    Neutral,
}

impl BadgeColor {
    /// CSS utility classes used by the storefront's tables
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeColor::Green => "bg-green-500/20 text-green-700",
            BadgeColor::Red => "bg-red-500/20 text-red-700",
            BadgeColor::Yellow => "bg-yellow-500/20 text-yellow-700",
            BadgeColor::Blue => "bg-blue-500/20 text-blue-700",
            BadgeColor::Neutral => "bg-gray-500/20 text-gray-700",
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, BadgeColor::Neutral)
    }
}

/// Badge for an `active` flag
pub fn active_badge(active: bool) -> (&'static str, BadgeColor) {
    if active {
        ("Active", BadgeColor::Green)
    } else {
        ("Inactive", BadgeColor::Neutral)
    }
}

/// Declares a closed set of status strings with a colour per value.
///
/// Stored records keep the raw string, so parsing is fallible and unknown
/// values are rendered with [`BadgeColor::Neutral`].
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => ($text:literal, $color:expr) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in selector order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Every value as stored
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            pub fn badge(&self) -> BadgeColor {
                match self {
                    $( $name::$variant => $color, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(format!(
                        "'{}' is not one of {:?}",
                        other,
                        $name::VALUES
                    )),
                }
            }
        }
    };
}

status_enum!(
    /// Outcome of a customer payment
    PaymentStatus {
        Success => ("Success", BadgeColor::Green),
        Failure => ("Failure", BadgeColor::Red),
        Declined => ("Declined", BadgeColor::Yellow),
    }
);

status_enum!(
    /// Progress of a refund
    RefundStatus {
        Initiated => ("Initiated", BadgeColor::Blue),
        Completed => ("Completed", BadgeColor::Green),
        Failed => ("Failed", BadgeColor::Red),
    }
);

status_enum!(
    /// Fulfilment state of a delivery
    DeliveryStatus {
        Pending => ("Pending", BadgeColor::Yellow),
        Dispatched => ("Dispatched", BadgeColor::Blue),
        Delivered => ("Delivered", BadgeColor::Green),
        Cancelled => ("Cancelled", BadgeColor::Red),
    }
);

/// Status domains that render as coloured badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDomain {
    Payment,
    Refund,
    Delivery,
}

impl StatusDomain {
    pub const ALL: &'static [StatusDomain] =
        &[StatusDomain::Payment, StatusDomain::Refund, StatusDomain::Delivery];

    /// Values accepted by this domain
    pub fn values(&self) -> &'static [&'static str] {
        match self {
            StatusDomain::Payment => PaymentStatus::VALUES,
            StatusDomain::Refund => RefundStatus::VALUES,
            StatusDomain::Delivery => DeliveryStatus::VALUES,
        }
    }

    /// Badge colour for a stored status string; unknown values are neutral
    pub fn badge(&self, status: &str) -> BadgeColor {
        let color = match self {
            StatusDomain::Payment => status.parse::<PaymentStatus>().map(|s| s.badge()),
            StatusDomain::Refund => status.parse::<RefundStatus>().map(|s| s.badge()),
            StatusDomain::Delivery => status.parse::<DeliveryStatus>().map(|s| s.badge()),
        };
        color.unwrap_or(BadgeColor::Neutral)
    }
}

/// Kinds of basket decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationType {
    Ribbon,
    #[serde(rename = "Paper Wrap")]
    PaperWrap,
    Floral,
    Custom,
}

impl DecorationType {
    pub const VALUES: &'static [&'static str] = &["Ribbon", "Paper Wrap", "Floral", "Custom"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecorationType::Ribbon => "Ribbon",
            DecorationType::PaperWrap => "Paper Wrap",
            DecorationType::Floral => "Floral",
            DecorationType::Custom => "Custom",
        }
    }
}

impl FromStr for DecorationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ribbon" => Ok(DecorationType::Ribbon),
            "Paper Wrap" => Ok(DecorationType::PaperWrap),
            "Floral" => Ok(DecorationType::Floral),
            "Custom" => Ok(DecorationType::Custom),
            other => Err(format!("'{}' is not a decoration type", other)),
        }
    }
}
