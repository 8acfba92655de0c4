// error.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while loading a splash animation
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error (file missing or unreadable).
    Io(io::Error),
    /// Signature is not `GIF`.
    MalformedHeader,
    /// GIF version not supported (87a or 89a only).
    UnsupportedVersion([u8; 3]),
    /// Invalid top-level block code.
    InvalidBlockCode,
    /// [GraphicControl](block/struct.GraphicControl.html) block has invalid
    /// length.
    MalformedGraphicControlExtension,
    /// File ends with incomplete block.
    UnexpectedEndOfFile,
    /// LZW minimum code size out of range.
    InvalidCodeSize,
    /// Image larger than specified by
    /// [max_image_sz](struct.Decoder.html#method.max_image_sz).
    TooLargeImage,
    /// Compressed LZW data invalid or corrupt
    InvalidLzwData,
}

/// Broad classification of an [Error](enum.Error.html)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Stream could not be opened or read
    OpenFailure,
    /// Stream is not a GIF
    FormatMismatch,
    /// Stream is a GIF, but truncated or malformed
    CorruptStream,
}

/// Result type for splash loading
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error
    pub fn kind(&self) -> ErrorKind {
        use self::Error::*;
        match self {
            Io(_) => ErrorKind::OpenFailure,
            MalformedHeader | UnsupportedVersion(_) => {
                ErrorKind::FormatMismatch
            }
            _ => ErrorKind::CorruptStream,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
