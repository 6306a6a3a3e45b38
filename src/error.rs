use std::error;
use std::fmt;




/**
 * Error to represent invalid grid descriptions or configuration data. Misuse
 * of a fill patch (calling it before a successful define, passing
 * inconsistent layouts, or an out-of-range time coefficient) is a programming
 * error and panics instead.
 */
#[derive(Debug)]
pub enum Error {
    OverlappingBoxes(String, String),
    UnknownGeometry(i32),
    InvalidConfig(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            OverlappingBoxes(a, b) => write!(fmt, "layout boxes {} and {} overlap", a, b),
            UnknownGeometry(tag) => write!(fmt, "unknown geometry tag: {}", tag),
            InvalidConfig(message) => write!(fmt, "invalid configuration: {}", message),
            Io(e) => write!(fmt, "i/o error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
