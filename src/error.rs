//! Crate error types

use std::fmt;

/// Errors surfaced by curve construction, point arithmetic, and the cipher.
///
/// Every variant indicates bad input or a configuration/logic error, never a
/// transient condition. Nothing here is retried; the caller decides whether
/// to abort or re-prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed curve parameters (range violation or singular curve).
    Configuration(String),
    /// The generator handed to the cipher is not a valid curve point.
    InvalidGenerator,
    /// An argument point failed the curve-membership check.
    InvalidPoint,
    /// No curve point exists at the requested abscissa.
    NotOnCurve,
    /// Square root requested for a quadratic non-residue.
    NotAResidue,
    /// Modular inverse requested for a non-invertible element.
    NoInverse,
    /// Order search exhausted the group without reaching the identity.
    OrderNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(s) => write!(f, "invalid curve configuration: {}", s),
            Error::InvalidGenerator => write!(f, "generator is not a valid curve point"),
            Error::InvalidPoint => write!(f, "point is not on the curve"),
            Error::NotOnCurve => write!(f, "no curve point exists at this x-coordinate"),
            Error::NotAResidue => write!(f, "value is not a quadratic residue"),
            Error::NoInverse => write!(f, "element has no modular inverse"),
            Error::OrderNotFound => write!(f, "no multiple of the point reached the identity"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
