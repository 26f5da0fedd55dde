//! Enumerated labels persisted as lowercase strings.

/// Declares a closed label enum with storage conversions.
///
/// The generated type renders to and parses from its lowercase storage
/// form. Parsing trims and lowercases input before matching.
macro_rules! storage_label {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Returns the canonical storage representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = $crate::records::domain::ParseLabelError;

            fn try_from(value: &str) -> Result<Self, $crate::records::domain::ParseLabelError> {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err($crate::records::domain::ParseLabelError::new($kind, value)),
                }
            }
        }
    };
}

pub(super) use storage_label;
