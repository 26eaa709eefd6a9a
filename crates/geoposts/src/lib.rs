use std::{error::Error, fmt};

pub mod client;
pub mod columns;
pub mod database;
pub mod import;
pub mod latlong;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    Other(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "the requested item does not exist"),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl Error for RequestError {}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            database::DatabaseError::Other(why) => Self::Other(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;

pub fn not_found_to_none<O>(
    result: database::Result<O>,
) -> database::Result<Option<O>> {
    if let Err(database::DatabaseError::NotFound) = result {
        Ok(None)
    } else {
        result.map(Some)
    }
}
