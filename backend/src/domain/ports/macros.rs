//! `define_port_error!` builds the error enums shared by every port.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor.
//! Field constructors take `impl Into<T>` so callers can pass `&str` for
//! `String` fields; unit variants get a zero-argument constructor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $( define_port_error!(@constructor $variant $( { $($field : $ty),* } )?); )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum LedgerError {
            Query { message: String } => "ledger query failed: {message}",
            Conflict { slug: String, attempts: u32 } => "slug {slug} taken after {attempts} attempts",
            Missing => "ledger entry missing",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = LedgerError::query("timeout");
        assert_eq!(err, LedgerError::Query { message: "timeout".to_owned() });
        assert_eq!(err.to_string(), "ledger query failed: timeout");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = LedgerError::conflict("foo", 3_u32);
        assert_eq!(err.to_string(), "slug foo taken after 3 attempts");
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerError::missing(), LedgerError::Missing);
        assert_eq!(LedgerError::missing().to_string(), "ledger entry missing");
    }
}
