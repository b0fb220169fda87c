//! `define_port_error!` generates a port error enum with a thiserror
//! `Display` and one snake_case constructor per variant.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
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
    define_port_error! {
        pub enum ParcelPortError {
            Lost { tracking_number: String } => "parcel {tracking_number} lost",
            Retries { attempts: u32 } => "gave up after {attempts} attempts",
            Damaged { tracking_number: String, severity: u8 } =>
                "parcel {tracking_number} damaged (severity {severity})",
            Closed => "depot closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(ParcelPortError::lost("TRK001").to_string(), "parcel TRK001 lost");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        assert_eq!(
            ParcelPortError::retries(3_u32).to_string(),
            "gave up after 3 attempts"
        );
    }

    #[test]
    fn constructors_support_mixed_and_unit_variants() {
        assert_eq!(
            ParcelPortError::damaged("TRK002", 2_u8).to_string(),
            "parcel TRK002 damaged (severity 2)"
        );
        assert_eq!(ParcelPortError::closed(), ParcelPortError::Closed);
    }
}
