//! Macros for declaring state enumerations.

/// Declare a state enum and its `State` implementation in one go.
///
/// The generated enum derives everything the engine needs to compare,
/// hash, log and snapshot states. Variants listed under `idle:` report
/// `is_idle() == true`.
///
/// # Example
///
/// ```
/// use concordat::state_enum;
/// use concordat::core::State;
///
/// state_enum! {
///     pub enum Valve {
///         Closed,
///         Open,
///     }
///     idle: [Closed]
/// }
///
/// assert_eq!(Valve::Open.name(), "Open");
/// assert!(Valve::Closed.is_idle());
/// assert_eq!(Valve::Open.to_string(), "Open");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(idle: [$($idle:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_idle(&self) -> bool {
                match self {
                    $($(Self::$idle => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
