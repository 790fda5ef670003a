//! Macro for declaring port error enums with snake_case constructors.

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
    //! Constructor coverage for generated port errors.
    use uuid::Uuid;

    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "sample connection failed: {message}",
            AlreadyOpen { pvz_id: Uuid } => "reception already open for {pvz_id}",
            Exhausted => "nothing left",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::connection("pool closed");
        assert_eq!(err.to_string(), "sample connection failed: pool closed");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let pvz_id = Uuid::nil();
        let err = SamplePortError::already_open(pvz_id);
        assert_eq!(err, SamplePortError::AlreadyOpen { pvz_id });
        assert_eq!(
            err.to_string(),
            "reception already open for 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::exhausted().to_string(), "nothing left");
    }
}
