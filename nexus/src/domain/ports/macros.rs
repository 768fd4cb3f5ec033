//! Helper macro for declaring port error enums with `impl Into` constructors.
//!
//! Doc comments on variants and fields are forwarded; each generated
//! constructor is documented with the variant it builds.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( {
                    $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
                } )? => $message:expr
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
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor shapes generated by `define_port_error!`.
    define_port_error! {
        pub enum LedgerSampleError {
            Offline => "ledger offline",
            Missing { key: String } => "missing key {key}",
            Truncated {
                /// Entry that was cut short.
                key: String,
                bytes: u64,
            } => "key {key} truncated at {bytes} bytes",
        }
    }

    #[test]
    fn unit_variants_get_snake_case_constructors() {
        assert_eq!(LedgerSampleError::offline(), LedgerSampleError::Offline);
        assert_eq!(LedgerSampleError::offline().to_string(), "ledger offline");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = LedgerSampleError::missing("networkNexus_user");
        assert_eq!(err.to_string(), "missing key networkNexus_user");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = LedgerSampleError::truncated("networkNexus_allUsers", 12_u64);
        assert_eq!(
            err,
            LedgerSampleError::Truncated {
                key: "networkNexus_allUsers".to_owned(),
                bytes: 12,
            }
        );
    }
}
