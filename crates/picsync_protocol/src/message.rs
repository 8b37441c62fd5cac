//! Request and response messages.

use crate::error::{FrameError, FrameResult};
use crate::ops::OpCode;
use crate::status::StatusCode;
use ciborium::value::Value;
use picsync_model::UserId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn value_null() -> Value {
    Value::Null
}

/// A client request.
///
/// `user_id` never crosses the wire: whatever a client might claim is
/// discarded at decode time, and the trusted id is attached exactly once by
/// the authentication gate after the credential token verifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Wire code of the requested operation.
    op: u16,
    /// Opaque credential token, verified by the identity provider.
    token: String,
    /// Operation-specific arguments (a field-tagged map).
    #[serde(default = "value_null")]
    args: Value,
    /// Operation-specific ordered payload items.
    #[serde(default)]
    payload: Vec<Value>,
    #[serde(skip)]
    user_id: Option<UserId>,
}

impl Request {
    /// Creates a request with no arguments and an empty payload.
    pub fn new(op: OpCode, token: impl Into<String>) -> Self {
        Self {
            op: op.code(),
            token: token.into(),
            args: Value::Null,
            payload: Vec::new(),
            user_id: None,
        }
    }

    /// Sets the arguments from any serializable value.
    pub fn with_args<T: Serialize>(mut self, args: &T) -> FrameResult<Self> {
        self.args = Value::serialized(args).map_err(|e| FrameError::Encode(e.to_string()))?;
        Ok(self)
    }

    /// Sets the payload from a slice of serializable items.
    pub fn with_payload<T: Serialize>(mut self, items: &[T]) -> FrameResult<Self> {
        self.payload = items
            .iter()
            .map(|item| Value::serialized(item).map_err(|e| FrameError::Encode(e.to_string())))
            .collect::<FrameResult<Vec<Value>>>()?;
        Ok(self)
    }

    /// Returns the raw operation code.
    pub fn op(&self) -> u16 {
        self.op
    }

    /// Returns the operation, if the code is one this protocol defines.
    pub fn opcode(&self) -> Option<OpCode> {
        OpCode::from_code(self.op)
    }

    /// Returns the opaque credential token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Deserializes the arguments into an operation-specific type.
    pub fn args_as<T: DeserializeOwned>(&self) -> FrameResult<T> {
        self.args
            .deserialized()
            .map_err(|e| FrameError::malformed(e.to_string()))
    }

    /// Deserializes every payload item into an operation-specific type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> FrameResult<Vec<T>> {
        self.payload
            .iter()
            .map(|item| item.deserialized().map_err(|e| FrameError::malformed(e.to_string())))
            .collect()
    }

    /// Returns the number of payload items.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Attaches the verified user id. Only the authentication gate calls
    /// this, exactly once per request.
    pub fn authenticate(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
    }

    /// Returns the verified user id, if the gate has run.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Encodes the request into a frame body.
    pub fn encode(&self) -> FrameResult<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes)
            .map_err(|e| FrameError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    /// Decodes a request from a frame body.
    pub fn decode(bytes: &[u8]) -> FrameResult<Self> {
        ciborium::de::from_reader(bytes).map_err(|e| FrameError::malformed(e.to_string()))
    }
}

/// A server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Wire code of the outcome.
    status: u16,
    /// Operation-specific result body; `Null` on no-content responses.
    #[serde(default = "value_null")]
    payload: Value,
}

impl Response {
    /// Creates a response with no payload.
    ///
    /// Error responses are always built this way: they carry no detail
    /// beyond the status code.
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            status: status.code(),
            payload: Value::Null,
        }
    }

    /// Creates a response carrying a serializable payload.
    pub fn with_payload<T: Serialize>(status: StatusCode, payload: &T) -> FrameResult<Self> {
        Ok(Self {
            status: status.code(),
            payload: Value::serialized(payload).map_err(|e| FrameError::Encode(e.to_string()))?,
        })
    }

    /// Returns the raw status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the status, if the code is one this protocol defines.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_code(self.status)
    }

    /// Returns true if the payload is absent.
    pub fn is_empty(&self) -> bool {
        matches!(self.payload, Value::Null)
    }

    /// Deserializes the payload into an operation-specific type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> FrameResult<T> {
        self.payload
            .deserialized()
            .map_err(|e| FrameError::malformed(e.to_string()))
    }

    /// Encodes the response into a frame body.
    pub fn encode(&self) -> FrameResult<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes)
            .map_err(|e| FrameError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    /// Decodes a response from a frame body.
    pub fn decode(bytes: &[u8]) -> FrameResult<Self> {
        ciborium::de::from_reader(bytes).map_err(|e| FrameError::malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SyncArgs {
        albums: BTreeMap<String, i64>,
    }

    #[test]
    fn request_round_trip() {
        let mut albums = BTreeMap::new();
        albums.insert("a1".to_string(), 100i64);
        let request = Request::new(OpCode::SyncAlbumDetails, "tok")
            .with_args(&SyncArgs { albums })
            .unwrap();

        let bytes = request.encode().unwrap();
        let decoded = Request::decode(&bytes).unwrap();

        assert_eq!(decoded, request);
        assert_eq!(decoded.opcode(), Some(OpCode::SyncAlbumDetails));
        assert_eq!(decoded.token(), "tok");
        let args: SyncArgs = decoded.args_as().unwrap();
        assert_eq!(args.albums.get("a1"), Some(&100));
    }

    #[test]
    fn request_defaults_args_and_payload() {
        let bytes = Request::new(OpCode::CreateAccount, "tok").encode().unwrap();
        let decoded = Request::decode(&bytes).unwrap();
        assert!(decoded.args_as::<SyncArgs>().is_err());
        assert_eq!(decoded.payload_len(), 0);
    }

    #[test]
    fn user_id_does_not_cross_the_wire() {
        let mut request = Request::new(OpCode::UserAuth, "tok");
        request.authenticate("u1".to_string());

        let bytes = request.encode().unwrap();
        let decoded = Request::decode(&bytes).unwrap();
        assert_eq!(decoded.user_id(), None);
    }

    #[test]
    fn garbage_body_is_malformed() {
        let result = Request::decode(&[0xff, 0x00, 0x13, 0x37]);
        assert!(matches!(result, Err(FrameError::Malformed(_))));
    }

    #[test]
    fn response_round_trip() {
        let response = Response::with_payload(StatusCode::Ok, &vec!["i1", "i2"]).unwrap();
        let bytes = response.encode().unwrap();
        let decoded = Response::decode(&bytes).unwrap();

        assert_eq!(decoded.status_code(), Some(StatusCode::Ok));
        let ids: Vec<String> = decoded.payload_as().unwrap();
        assert_eq!(ids, vec!["i1", "i2"]);
    }

    #[test]
    fn error_responses_carry_no_payload() {
        let response = Response::from_status(StatusCode::Unauthorized);
        assert!(response.is_empty());

        let decoded = Response::decode(&response.encode().unwrap()).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.status_code(), Some(StatusCode::Unauthorized));
    }
}
