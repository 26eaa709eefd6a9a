use axum::{
    extract::{OriginalUri, Query, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use geoposts::{import::ImportError, latlong::SourceError, RequestError};
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};

pub type RouteResult<O> = Result<O, RouteErrorResponse>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_information: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
            detailed_information: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("unknown error");
        self.with_message(message)
    }

    pub fn with_detailed_information(mut self, message: impl Into<String>) -> Self {
        self.detailed_information = Some(message.into());
        self
    }

    fn with_optional_detail(self, detail: Option<String>) -> Self {
        match detail {
            Some(detail) => self.with_detailed_information(detail),
            None => self,
        }
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NotFound => Self::new(StatusCode::NOT_FOUND)
                .with_message("The requested item does not exist."),
            RequestError::Other(other) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_message(format!("{}", other))
            }
        }
    }
}

impl From<ImportError> for RouteErrorResponse {
    fn from(value: ImportError) -> Self {
        let status_code = if value.is_mapping_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status_code)
            .with_message(value.to_string())
            .with_optional_detail(value.detail())
    }
}

impl From<SourceError> for RouteErrorResponse {
    fn from(value: SourceError) -> Self {
        ImportError::from(value).into()
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use geoposts::{columns::ColumnMappingError, database::DatabaseError};

    use super::*;

    #[test]
    fn too_few_columns_is_a_bad_request() {
        let response = RouteErrorResponse::from(SourceError::from(
            ColumnMappingError::TooFewColumns { found: 1 },
        ));
        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.message.as_deref(),
            Some("latlongdata must have at least 3 columns, found 1")
        );
    }

    #[test]
    fn other_failures_are_server_errors() {
        let response = RouteErrorResponse::from(SourceError::Unavailable(
            DatabaseError::NotFound,
        ));
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.message.as_deref(),
            Some("latlongdata table not found or DB error")
        );
        assert_eq!(
            response.detailed_information.as_deref(),
            Some("no matching row")
        );
    }

    #[test]
    fn status_code_is_not_serialized() {
        let body = serde_json::to_value(
            RouteErrorResponse::new(StatusCode::BAD_REQUEST).with_message("nope"),
        )
        .unwrap();
        assert_eq!(body, serde_json::json!({ "message": "nope" }));
    }
}
