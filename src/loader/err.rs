//! Errors raised while reading an instance file.

use std::num::{ParseFloatError, ParseIntError};

use crate::models::InstanceError;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    UnexpectedEof,
    ParseInt(ParseIntError),
    ParseFloat(ParseFloatError),
    BadGrade(String),
    TrailingToken(String),
    MissingDepot,
    Instance(InstanceError),
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseIntError> for LoadError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl From<ParseFloatError> for LoadError {
    fn from(e: ParseFloatError) -> Self {
        Self::ParseFloat(e)
    }
}

impl From<InstanceError> for LoadError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            UnexpectedEof => write!(f, "unexpected end of file while parsing instance"),
            ParseInt(e) => write!(f, "parse-int error: {e}"),
            ParseFloat(e) => write!(f, "parse-float error: {e}"),
            BadGrade(tok) => write!(f, "'{tok}' is neither a grade letter nor '-'"),
            TrailingToken(tok) => write!(f, "unexpected token '{tok}' after the last node"),
            MissingDepot => write!(f, "no node with id 1 (the depot)"),
            Instance(e) => write!(f, "instance error: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::ParseInt(e) => Some(e),
            LoadError::ParseFloat(e) => Some(e),
            LoadError::Instance(e) => Some(e),
            _ => None,
        }
    }
}
