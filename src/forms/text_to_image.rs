//! Text-to-image form: a required description plus an optional reference image.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::submit::{self, SubmitGate};
use super::{Field, FormServices, KeyPress, SubmitOutcome, ValidationError};
use crate::api::GenerationRequest;
use crate::media::{Accept, MediaFile};
use crate::selection::{DropZone, FileSlot, SelectionError};

/// How long the missing-description toast stays up.
const DESCRIPTION_ERROR_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug)]
struct Draft {
    description: String,
    image: FileSlot,
    drop_zone: DropZone,
    focus: Option<Field>,
}

pub struct TextToImageForm {
    services: FormServices,
    gate: SubmitGate,
    draft: Mutex<Draft>,
}

impl TextToImageForm {
    pub fn new(services: FormServices) -> Self {
        let image = FileSlot::new(Accept::IMAGE, services.previews.clone());
        Self {
            services,
            gate: SubmitGate::new(),
            draft: Mutex::new(Draft {
                description: String::new(),
                image,
                drop_zone: DropZone::default(),
                focus: None,
            }),
        }
    }

    fn draft(&self) -> MutexGuard<'_, Draft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.draft().description = description.into();
    }

    pub fn description(&self) -> String {
        self.draft().description.clone()
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.draft().focus
    }

    pub fn image(&self) -> Option<MediaFile> {
        self.draft().image.file().cloned()
    }

    pub fn image_preview(&self) -> Option<String> {
        self.draft().image.preview_url().map(str::to_string)
    }

    pub fn image_hint(&self) -> String {
        Accept::IMAGE.hint()
    }

    pub fn is_drag_active(&self) -> bool {
        self.draft().drop_zone.is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Generating..."
        } else {
            "Generate image"
        }
    }

    /// File picker change.
    pub fn select_image(&self, file: MediaFile) -> Result<(), SelectionError> {
        let result = self.draft().image.select(file);
        submit::report_selection(&self.services, result)
    }

    pub fn drag_enter(&self, file_count: usize) {
        self.draft().drop_zone.drag_enter(file_count);
    }

    pub fn drag_over(&self, file_count: usize) {
        self.draft().drop_zone.drag_over(file_count);
    }

    pub fn drag_leave(&self) {
        self.draft().drop_zone.drag_leave();
    }

    /// Drop onto the image zone. Only the first file is considered.
    pub fn drop_files(&self, files: Vec<MediaFile>) -> Result<(), SelectionError> {
        let result = {
            let mut draft = self.draft();
            match draft.drop_zone.drop_files(files) {
                Some(file) => draft.image.select(file),
                None => Ok(()),
            }
        };
        submit::report_selection(&self.services, result)
    }

    /// Enter submits; Shift+Enter and IME composition do not.
    pub async fn handle_keydown(&self, key: KeyPress) -> Option<SubmitOutcome> {
        if key.submits() {
            Some(self.submit().await)
        } else {
            None
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_permit) = self.gate.try_enter() else {
            log::debug!("Ignoring submit while a generation is in flight");
            return SubmitOutcome::Busy;
        };

        let description = {
            let mut draft = self.draft();
            if draft.description.trim().is_empty() {
                draft.focus = Some(Field::Description);
                None
            } else {
                Some(draft.description.clone())
            }
        };
        let Some(description) = description else {
            return submit::invalid(
                &self.services,
                ValidationError::EmptyDescription,
                Some(DESCRIPTION_ERROR_DURATION),
            );
        };
        if let Err(outcome) = submit::check_session(&self.services) {
            return outcome;
        }

        let mut request = GenerationRequest::new().with_description(description);
        if let Some(image) = self.image() {
            request = request.with_image(image);
        }

        let outcome = submit::dispatch(&self.services, &request).await;
        if let SubmitOutcome::Generated(cover) = &outcome {
            {
                let mut draft = self.draft();
                draft.description.clear();
                draft.image.clear();
            }
            submit::announce(&self.services, cover.clone());
        }
        outcome
    }
}
