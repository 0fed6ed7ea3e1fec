use crate::ChunkId;

macro_rules! variants {
    ($(
        $(#[$attrs:meta])*
        $constructor:ident -> $variant:ident $({
            $($field:ident : $field_ty:ty),*
        })?
    );*) => {
        struct Private;

        #[allow(private_interfaces)]
        pub enum RiffcodecError {$(
            $(#[$attrs])*
            $variant {
                _private: Private,

                #[cfg(debug_assertions)]
                location: &'static std::panic::Location<'static>,

                $($($field : $field_ty),*)?
            }
        ),*}

        impl RiffcodecError {
            $(
                $(#[$attrs])*
                #[track_caller]
                pub fn $constructor(
                    $($($field : $field_ty),*)?
                ) -> Self {
                    Self::$variant {
                        _private: Private,

                        #[cfg(debug_assertions)]
                        location: std::panic::Location::caller(),

                        $($($field),*)?
                    }
                }
            )*

            #[cfg(debug_assertions)]
            fn location(&self) -> &'static std::panic::Location<'static> {
                match self {
                    $(Self::$variant { location, .. } => location),*
                }
            }
        }
    };
}

variants! {
    /// The stream ended before the fixed prefix of `chunk` could be read.
    short_read -> ShortRead { chunk: ChunkId };

    /// A magic tag did not match. `expected` identifies which check failed.
    invalid_tag -> InvalidTag { expected: ChunkId, found: ChunkId };

    /// The format chunk declares a sample width other than 8, 16 or 32 bits.
    unsupported_bit_depth -> UnsupportedBitDepth { bits: u16 };

    /// Reading the interleaved sample frames failed, including a stream that ends
    /// in the middle of a frame.
    sample_read_failure -> SampleReadFailure { error: std::io::Error };

    /// The stream is well formed byte-wise but describes something that cannot be
    /// decoded.
    invalid_data -> InvalidData { reason: &'static str };

    /// A provided value violates a precondition of the operation.
    invalid_input -> InvalidInput { reason: &'static str };

    /// An io operation returned an error that could not be represented by another variant of
    /// this enum
    io -> Io { error: std::io::Error }
}

pub type RiffcodecResult<T> = Result<T, RiffcodecError>;

impl RiffcodecError {
    /// Maps a failed fixed-size read of `chunk` to either [`RiffcodecError::ShortRead`] or
    /// [`RiffcodecError::Io`].
    #[track_caller]
    pub fn from_chunk_read(chunk: ChunkId, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::short_read(chunk),
            _ => Self::io(error),
        }
    }
}

impl std::error::Error for RiffcodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SampleReadFailure { error, .. } | Self::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiffcodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShortRead { chunk, .. } => write!(f, "short read in \"{chunk}\" chunk"),
            Self::InvalidTag {
                expected, found, ..
            } => write!(f, "invalid tag: expected \"{expected}\", found \"{found}\""),
            Self::UnsupportedBitDepth { bits, .. } => {
                write!(f, "unsupported sample width: {bits} bits")
            }
            Self::SampleReadFailure { error, .. } => write!(f, "failed to read samples: {error}"),
            Self::InvalidData { reason, .. } => write!(f, "invalid data: {reason}"),
            Self::InvalidInput { reason, .. } => write!(f, "invalid input: {reason}"),
            Self::Io { error, .. } => write!(f, "io error: {error}"),
        }
    }
}

impl std::fmt::Debug for RiffcodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "riffcodec error: \"{self}\"")?;

        #[cfg(debug_assertions)]
        write!(f, " at {}", self.location())?;

        Ok(())
    }
}

impl From<std::convert::Infallible> for RiffcodecError {
    fn from(error: std::convert::Infallible) -> Self {
        match error {}
    }
}

impl From<std::io::Error> for RiffcodecError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        Self::io(error)
    }
}

impl From<RiffcodecError> for std::io::Error {
    fn from(error: RiffcodecError) -> Self {
        use std::io::ErrorKind;

        let kind = match error {
            RiffcodecError::ShortRead { .. } => ErrorKind::UnexpectedEof,
            RiffcodecError::InvalidTag { .. } | RiffcodecError::InvalidData { .. } => {
                ErrorKind::InvalidData
            }
            RiffcodecError::UnsupportedBitDepth { .. } => ErrorKind::Unsupported,
            RiffcodecError::InvalidInput { .. } => ErrorKind::InvalidInput,
            RiffcodecError::SampleReadFailure { error, .. } | RiffcodecError::Io { error, .. } => {
                return error
            }
        };

        let msg = format!("riffcodec error: {}", error);
        Self::new(kind, msg)
    }
}
