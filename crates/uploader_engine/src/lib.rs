//! Uploader engine: file encoding, the bucket HTTP API and effect execution.
mod api;
mod encode;
mod engine;
mod types;

pub use api::{BucketApi, ClientSettings, ReqwestBucketApi};
pub use encode::{encode_bytes, encode_file, EncodedFile};
pub use engine::{Clock, EngineHandle};
pub use types::{
    failure_for, ApiError, EngineEvent, FailureKind, ListingResponse, UploadRequest,
    UploadResponse,
};
