use std::fmt;

/// Declares an enum stored as a TEXT column: string codes for SQL binding,
/// serde and `FromStr`, plus the translation key for its label.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const CODES: &'static [&'static str] = &[$($code),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label_key(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($code => Ok($name::$variant),)+
                    other => Err($crate::models::ParseEnumError::new(stringify!($name), other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::models::ParseEnumError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl $crate::models::Labelled for $name {
            fn code(&self) -> &'static str {
                self.as_str()
            }

            fn label_key(&self) -> &'static str {
                $name::label_key(*self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Enumerations shown in the UI: stored code plus translation key.
pub trait Labelled {
    fn code(&self) -> &'static str;
    fn label_key(&self) -> &'static str;
}

/// A TEXT column held a value outside its enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

text_enum! {
    /// Shared by complaints and announcements.
    pub enum Priority {
        Low = "low" => "priority.low",
        Normal = "normal" => "priority.normal",
        High = "high" => "priority.high",
        Urgent = "urgent" => "priority.urgent",
    }
}

/// Case-insensitive substring match used by every list search box.
/// A blank needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `all` (or blank) disables an equality filter.
pub fn parse_filter<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(v) => v.parse().ok(),
    }
}

pub mod announcement;
pub mod audit;
pub mod complaint;
pub mod dashboard;
pub mod decision;
pub mod meeting;
pub mod profile;
pub mod role;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_enum_round_trips_codes() {
        for p in Priority::ALL {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), *p);
        }
        assert_eq!(Priority::Urgent.label_key(), "priority.urgent");
        assert!("critical".parse::<Priority>().is_err());
    }

    #[test]
    fn contains_ci_ignores_case_and_blank_needles() {
        assert!(contains_ci("Mesyuarat Agung", "agung"));
        assert!(contains_ci("anything", "  "));
        assert!(!contains_ci("Mesyuarat", "rapat"));
    }

    #[test]
    fn all_disables_filter() {
        assert_eq!(parse_filter::<Priority>(Some("all")), None);
        assert_eq!(parse_filter::<Priority>(None), None);
        assert_eq!(parse_filter::<Priority>(Some("high")), Some(Priority::High));
    }
}
