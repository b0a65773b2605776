pub mod friendship;
pub mod health;
pub mod profile;

pub mod error {
    use friends_common::request_io::OutputErrorResponse;

    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, HttpResponseBuilder};
    use std::fmt;

    #[derive(Debug)]
    pub enum HttpErrorResponse {
        // 400
        IncorrectlyFormed(String),
        ConflictWithExisting(String),

        // 404
        DoesNotExist(String),
        ForeignKeyDoesNotExist(String),

        // 500
        InternalError(String),
    }

    impl std::error::Error for HttpErrorResponse {}

    impl fmt::Display for HttpErrorResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let resp: OutputErrorResponse = self.into();
            write!(f, "{}: {}", resp.err_type, resp.err_message)
        }
    }

    impl From<&HttpErrorResponse> for OutputErrorResponse {
        fn from(resp: &HttpErrorResponse) -> Self {
            match resp {
                HttpErrorResponse::IncorrectlyFormed(msg) => OutputErrorResponse {
                    err_type: String::from("incorrectly_formed"),
                    err_message: format!("Incorrectly formed request: {msg}"),
                },
                HttpErrorResponse::ConflictWithExisting(msg) => OutputErrorResponse {
                    err_type: String::from("conflict_with_existing"),
                    err_message: format!("Conflict with existing data: {msg}"),
                },
                HttpErrorResponse::DoesNotExist(msg) => OutputErrorResponse {
                    err_type: String::from("does_not_exist"),
                    err_message: format!("Does not exist: {msg}"),
                },
                HttpErrorResponse::ForeignKeyDoesNotExist(msg) => OutputErrorResponse {
                    err_type: String::from("foreign_key_does_not_exist"),
                    err_message: format!("Foreign key does not exist: {msg}"),
                },
                HttpErrorResponse::InternalError(msg) => OutputErrorResponse {
                    err_type: String::from("internal_error"),
                    err_message: format!("Internal error: {msg}"),
                },
            }
        }
    }

    impl actix_web::error::ResponseError for HttpErrorResponse {
        fn error_response(&self) -> HttpResponse {
            HttpResponseBuilder::new(self.status_code()).json(OutputErrorResponse::from(self))
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                HttpErrorResponse::IncorrectlyFormed(_)
                | HttpErrorResponse::ConflictWithExisting(_) => StatusCode::BAD_REQUEST,
                HttpErrorResponse::DoesNotExist(_)
                | HttpErrorResponse::ForeignKeyDoesNotExist(_) => StatusCode::NOT_FOUND,
                HttpErrorResponse::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }
}
