use crate::error::Error;
use crate::store::StoreError;

pub fn map_error(e: StoreError) -> Error {
    use StoreError::*;
    match e {
        Http(err) => Error::BackendUnavailable(err.to_string()),
        KeyNotFound(key) => Error::NotFound(key),
        NodeExist(key) => Error::Conflict(key),
        Api { code, message } => Error::BackendUnavailable(format!("etcd error {code}: {message}")),
        Json(err) => Error::Decode(err.to_string()),
        Unavailable(msg) => Error::BackendUnavailable(msg),
    }
}
