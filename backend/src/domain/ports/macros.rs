//! `define_port_error!`: error enums for driven ports.
//!
//! Adapter failures are reported as text, so every variant holds exactly one
//! field. The macro derives `thiserror::Error` from the per-variant message
//! and adds a snake_case constructor taking `impl Into<FieldType>`, which
//! lets adapters write `IncidentRepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : $ty:ty } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: $ty },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ArchiveError {
            BucketMissing { bucket: String } => "archive bucket `{bucket}` does not exist",
            Timeout { after_ms: u64 } => "archive write timed out after {after_ms}ms",
            WriteFailed { message: String } => "archive write failed: {message}",
        }
    }

    #[test]
    fn constructor_names_follow_variants() {
        assert_eq!(
            ArchiveError::bucket_missing("incidents-2026"),
            ArchiveError::BucketMissing {
                bucket: "incidents-2026".to_owned()
            }
        );
        assert_eq!(
            ArchiveError::write_failed(String::from("disk full")).to_string(),
            "archive write failed: disk full"
        );
    }

    #[test]
    fn non_string_fields_convert_through_into() {
        let err = ArchiveError::timeout(250_u32);
        assert_eq!(err, ArchiveError::Timeout { after_ms: 250 });
        assert_eq!(err.to_string(), "archive write timed out after 250ms");
    }
}
