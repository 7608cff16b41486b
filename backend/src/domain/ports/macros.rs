//! `define_port_error!`: typed port errors with `Into`-friendly constructors.
//!
//! Each variant gets a snake_case constructor, so adapters write
//! `UserPersistenceError::query(err.to_string())` instead of building the
//! struct variant by hand.

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
    use super::super::{CredentialHasherError, ExerciseRepositoryError, UserPersistenceError};
    use rstest::rstest;

    define_port_error! {
        pub enum StoreOutage {
            Timeout { store: String, seconds: u32 } => "{store} timed out after {seconds}s",
        }
    }

    #[rstest]
    #[case(UserPersistenceError::query("boom"), "user repository query failed: boom")]
    #[case(UserPersistenceError::duplicate_email(), "email already registered")]
    #[case(UserPersistenceError::duplicate_username(), "username already registered")]
    fn user_errors_render_their_messages(
        #[case] error: UserPersistenceError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        let owned = ExerciseRepositoryError::connection(String::from("refused"));
        assert_eq!(owned, ExerciseRepositoryError::connection("refused"));
        assert_eq!(
            CredentialHasherError::malformed_verifier("bad phc").to_string(),
            "stored password verifier is malformed: bad phc"
        );
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let error = StoreOutage::timeout("exercises", 5_u32);
        assert_eq!(error.to_string(), "exercises timed out after 5s");
    }
}
