//! Response status codes.

/// Outcome codes returned to clients, mirroring the HTTP status space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum StatusCode {
    /// The operation succeeded.
    Ok = 200,
    /// The operation created a resource.
    Created = 201,
    /// The frame was malformed or a required field was missing.
    BadRequest = 400,
    /// The credential token could not be verified.
    Unauthorized = 401,
    /// The caller is not permitted to act on the resource.
    Forbidden = 403,
    /// A referenced user, album, or image does not exist.
    NotFound = 404,
    /// An unexpected failure, collaborator error, or dispatch miss.
    InternalError = 500,
}

impl StatusCode {
    /// Returns the wire code of this status.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Returns the status for a wire code, if one is defined.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            201 => Some(StatusCode::Created),
            400 => Some(StatusCode::BadRequest),
            401 => Some(StatusCode::Unauthorized),
            403 => Some(StatusCode::Forbidden),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalError),
            _ => None,
        }
    }

    /// Returns true for the success statuses.
    pub const fn is_success(self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_http() {
        assert_eq!(StatusCode::Ok.code(), 200);
        assert_eq!(StatusCode::Unauthorized.code(), 401);
        assert_eq!(StatusCode::InternalError.code(), 500);
    }

    #[test]
    fn success_classification() {
        assert!(StatusCode::Ok.is_success());
        assert!(StatusCode::Created.is_success());
        assert!(!StatusCode::NotFound.is_success());
    }

    #[test]
    fn from_code_round_trips() {
        for status in [
            StatusCode::Ok,
            StatusCode::Created,
            StatusCode::BadRequest,
            StatusCode::Unauthorized,
            StatusCode::Forbidden,
            StatusCode::NotFound,
            StatusCode::InternalError,
        ] {
            assert_eq!(StatusCode::from_code(status.code()), Some(status));
        }
        assert_eq!(StatusCode::from_code(418), None);
    }
}
