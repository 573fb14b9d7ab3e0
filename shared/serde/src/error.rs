use thiserror::Error;

/// Errors that can occur while reading serialized data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader reached the end of its buffer before the value was complete
    #[error("Buffer underrun: attempted to read bit {bit_index} of a {buffer_bits}-bit buffer")]
    BufferUnderrun { bit_index: usize, buffer_bits: usize },

    /// A value was read successfully but is not valid for the target type
    #[error("Invalid value while reading {type_name}: {detail}")]
    InvalidValue {
        type_name: &'static str,
        detail: String,
    },
}
