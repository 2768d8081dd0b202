//! Utility macros shared by the model types.

/// Declares a closed enum whose variants have a fixed wire name.
///
/// Generates `name()`, `from_name()` and an `ALL` table. Lookups are exact
/// and case-sensitive; unknown names resolve to `None` so callers can degrade
/// field-by-field instead of failing the whole record.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Returns the wire name of this value.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            /// Resolves a wire name.
            pub fn from_name(name: &str) -> Option<$name> {
                match name {
                    $( $wire => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use wire_enum;
