//! Generation forms.
//!
//! Each form owns a draft (text, file slots, drop zones) and runs the same
//! submission pipeline: local validation, session precheck, multipart
//! request, then a reset of the draft on success. Side effects go through
//! the injected `FormServices`.

mod image_to_video;
mod submit;
mod text_to_image;
mod video_handling;

use std::sync::Arc;

pub use image_to_video::ImageToVideoForm;
pub use submit::{SubmitGate, SubmitPermit};
pub use text_to_image::TextToImageForm;
pub use video_handling::VideoHandlingForm;

use crate::api::GenClient;
use crate::context::AppContext;
use crate::models::Cover;
use crate::navigation::{Navigator, Route};
use crate::notify::Notifier;
use crate::preview::PreviewStore;

pub const MSG_SIGN_IN_REQUIRED: &str = "Please sign in first";
pub const MSG_INSUFFICIENT_CREDITS: &str = "Insufficient balance, please top up";
pub const MSG_GENERATED: &str = "Generated successfully";
pub const MSG_REQUEST_FAILED: &str = "Request failed, please try again";

/// Collaborators injected into every form.
#[derive(Clone)]
pub struct FormServices {
    pub context: Arc<dyn AppContext>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub client: GenClient,
    pub previews: PreviewStore,
}

impl FormServices {
    pub fn new(
        context: Arc<dyn AppContext>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        client: GenClient,
    ) -> Self {
        Self {
            context,
            notifier,
            navigator,
            client,
            previews: PreviewStore::new(),
        }
    }
}

/// Input that failed local validation before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a cover description")]
    EmptyDescription,
    #[error("Please upload a reference image")]
    MissingImage,
    #[error("Please upload a reference video")]
    MissingVideo,
    #[error("Please upload a video")]
    MissingSourceVideo,
}

/// What a submit trigger ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A previous submission is still in flight.
    Busy,
    Invalid(ValidationError),
    /// Not signed in, out of credits, or a 401 from the backend.
    Redirected(Route),
    /// The backend answered with a non-zero code.
    Rejected { code: i64, message: String },
    Generated(Option<Cover>),
    /// Transport or response decoding failure.
    Failed,
}

impl SubmitOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, SubmitOutcome::Generated(_))
    }
}

/// Focusable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
}

/// Which upload input of a multi-file form an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    Other,
}

/// A key press in the description field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub shift: bool,
    /// True while an input method editor is composing.
    pub composing: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self {
            code: KeyCode::Enter,
            shift: false,
            composing: false,
        }
    }

    /// Enter without Shift outside IME composition.
    pub fn submits(&self) -> bool {
        self.code == KeyCode::Enter && !self.shift && !self.composing
    }
}
