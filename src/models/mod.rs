//! Domain entities of the hiring pipeline.
//!
//! Status-like fields are closed enums that serialize to the exact strings
//! clients send and receive (`"Under Review"`, `"hiringManager"`, ...). The
//! same strings are what the Postgres store writes into `TEXT` columns.

/// Declares a string-backed enum with serde names, `as_str`, `Display` and
/// a `FromStr` that rejects unknown values as a bad request.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(crate::error::Error::BadRequest(format!(
                        "Invalid {} value '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

pub mod application;
pub mod candidate;
pub mod interview;
pub mod message;
pub mod position;
pub mod purchase_order;
pub mod user;

#[cfg(test)]
mod tests {
    use super::application::ApplicationStatus;
    use super::user::Role;

    #[test]
    fn string_enums_round_trip_through_text() {
        for status in ApplicationStatus::ALL {
            let parsed: ApplicationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
        assert_eq!(
            serde_json::to_value(ApplicationStatus::UnderReview).unwrap(),
            serde_json::json!("Under Review")
        );
        assert_eq!(
            serde_json::from_value::<Role>(serde_json::json!("hiringManager")).unwrap(),
            Role::HiringManager
        );
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = "Promoted".parse::<ApplicationStatus>().unwrap_err();
        assert!(err.to_string().contains("Promoted"));
    }
}
