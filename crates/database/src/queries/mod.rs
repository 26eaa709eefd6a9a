use geoposts::database::DatabaseError;

pub mod connection;
pub mod latlong;
pub mod post;
pub mod user;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

/// Quotes an identifier for both Postgres and SQLite.
pub(crate) fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_identifier("post_id"), "\"post_id\"");
        assert_eq!(quote_identifier("Lat \"deg\""), "\"Lat \"\"deg\"\"\"");
    }

    #[test]
    fn missing_rows_become_not_found() {
        assert!(matches!(
            convert_error(sqlx::Error::RowNotFound),
            DatabaseError::NotFound
        ));
        assert!(matches!(
            convert_error(sqlx::Error::PoolClosed),
            DatabaseError::Other(_)
        ));
    }
}
