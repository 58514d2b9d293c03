//! Strongly-typed identifiers.
//!
//! Every entity in the domain is keyed by its own identifier newtype so that,
//! say, a rental id can never be passed where a car id is expected. The
//! [`define_id!`] macro generates these newtypes; bounded contexts invoke it
//! for each of their entities.

/// Defines a strongly-typed identifier newtype over [`uuid::Uuid`].
///
/// Generated identifiers:
/// - reject the nil UUID in every fallible constructor (`from_uuid`, `FromStr`),
///   failing with [`DomainError::InvalidId`](crate::DomainError::InvalidId)
/// - generate fresh values via UUIDv7 (time-ordered); prefer passing ids
///   explicitly in tests for determinism
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $t:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(::uuid::Uuid);

        impl $t {
            /// Create a new identifier with a freshly generated value.
            pub fn new() -> Self {
                Self(::uuid::Uuid::now_v7())
            }

            /// Wrap an existing UUID. Fails for the nil UUID - an identifier
            /// must always point at something.
            pub fn from_uuid(uuid: ::uuid::Uuid) -> $crate::DomainResult<Self> {
                if uuid.is_nil() {
                    return Err($crate::DomainError::invalid_id(concat!(
                        stringify!($t),
                        ": nil UUID"
                    )));
                }
                Ok(Self(uuid))
            }

            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for ::uuid::Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = ::uuid::Uuid::parse_str(s).map_err(|e| {
                    $crate::DomainError::invalid_id(format!(
                        "{}: {}",
                        stringify!($t),
                        e
                    ))
                })?;
                Self::from_uuid(uuid)
            }
        }
    };
}

crate::define_id!(
    /// Identifier of a domain event.
    EventId
);
