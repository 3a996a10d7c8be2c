//! Client for the cover generation backend.
//!
//! Submissions go to `POST /api/gen-cover` as multipart form data and the
//! session snapshot is refreshed through `POST /api/get-user-info`. Both
//! endpoints answer with a `{code, message, data}` envelope.

mod client;
mod request;

pub use client::{
    ApiError, GenClient, GenerationResponse, UserInfoResponse, GEN_COVER_PATH, USER_INFO_PATH,
};
pub use request::GenerationRequest;
