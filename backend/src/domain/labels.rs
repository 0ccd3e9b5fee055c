//! Closed sets of display labels shared with clients.

/// Declare a fieldless enum whose variants map one-to-one onto wire labels.
///
/// Generates `ALL`, `as_str`, `parse_label` (reporting failures against the
/// given field name), `Display`, and `FromStr`.
macro_rules! labelled_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident ($field:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[doc = concat!("Label `", $label, "`.")]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire label of this variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Parse a trimmed wire label, reporting failures against the
            /// owning field.
            pub fn parse_label(
                raw: &str,
            ) -> Result<Self, $crate::domain::validation::FieldError> {
                let trimmed = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == trimmed)
                    .ok_or_else(|| {
                        $crate::domain::validation::FieldError::unknown_value($field, trimmed)
                    })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::validation::FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_label(s)
            }
        }
    };
}

pub(crate) use labelled_enum;

#[cfg(test)]
mod tests {
    use crate::domain::validation::FieldError;

    labelled_enum! {
        pub enum Shade ("shade") {
            Light => "light",
            Dark => "Dark Mode",
        }
    }

    #[test]
    fn parses_trimmed_labels() {
        assert_eq!(" Dark Mode ".parse::<Shade>(), Ok(Shade::Dark));
    }

    #[test]
    fn reports_unknown_labels_against_the_field() {
        assert_eq!(
            Shade::parse_label("dim"),
            Err(FieldError::unknown_value("shade", "dim"))
        );
    }

    #[test]
    fn displays_the_wire_label() {
        assert_eq!(Shade::Light.to_string(), "light");
        assert_eq!(Shade::ALL.len(), 2);
    }
}
