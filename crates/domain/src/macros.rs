//! Macro for implementing Display and FromStr for goal enumerations
//!
//! Every closed enumeration of the goal model (level, type, status, risk,
//! trend) is stored as a lowercase string by the backend. This macro keeps the
//! string mapping in one place so the validation boundary and the serialized
//! output never drift apart.
//!
//! # Example
//!
//! ```rust
//! use goalpulse_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ReviewOutcome {
//!     Confirmed,
//!     Adjusted,
//! }
//!
//! impl_domain_status_conversions!(ReviewOutcome {
//!     Confirmed => "confirmed",
//!     Adjusted => "adjusted",
//! });
//!
//! assert_eq!("ADJUSTED".parse::<ReviewOutcome>(), Ok(ReviewOutcome::Adjusted));
//! ```

/// Implements Display and FromStr traits for goal enumerations
///
/// - Display writes the canonical lowercase string
/// - FromStr parses case-insensitively and trims surrounding whitespace
/// - The FromStr error names the enum and the rejected input
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string form
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
