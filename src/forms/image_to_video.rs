//! Image-to-video form: a reference image and a reference video, both required.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::submit::{self, SubmitGate};
use super::{FormServices, MediaSlot, SubmitOutcome, ValidationError};
use crate::api::GenerationRequest;
use crate::media::{Accept, MediaFile};
use crate::selection::{DropZone, FileSlot, SelectionError};

#[derive(Debug)]
struct Upload {
    slot: FileSlot,
    zone: DropZone,
}

impl Upload {
    fn new(slot: FileSlot) -> Self {
        Self {
            slot,
            zone: DropZone::default(),
        }
    }
}

#[derive(Debug)]
struct Draft {
    image: Upload,
    video: Upload,
}

impl Draft {
    fn upload(&mut self, slot: MediaSlot) -> &mut Upload {
        match slot {
            MediaSlot::Image => &mut self.image,
            MediaSlot::Video => &mut self.video,
        }
    }

    fn upload_ref(&self, slot: MediaSlot) -> &Upload {
        match slot {
            MediaSlot::Image => &self.image,
            MediaSlot::Video => &self.video,
        }
    }
}

pub struct ImageToVideoForm {
    services: FormServices,
    gate: SubmitGate,
    draft: Mutex<Draft>,
}

impl ImageToVideoForm {
    pub fn new(services: FormServices) -> Self {
        let image = FileSlot::new(Accept::IMAGE, services.previews.clone());
        let video = FileSlot::new(Accept::VIDEO, services.previews.clone());
        Self {
            services,
            gate: SubmitGate::new(),
            draft: Mutex::new(Draft {
                image: Upload::new(image),
                video: Upload::new(video),
            }),
        }
    }

    fn draft(&self) -> MutexGuard<'_, Draft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn file(&self, slot: MediaSlot) -> Option<MediaFile> {
        self.draft().upload_ref(slot).slot.file().cloned()
    }

    pub fn preview(&self, slot: MediaSlot) -> Option<String> {
        self.draft()
            .upload_ref(slot)
            .slot
            .preview_url()
            .map(str::to_string)
    }

    pub fn hint(&self, slot: MediaSlot) -> String {
        self.draft().upload_ref(slot).slot.accept().hint()
    }

    pub fn is_drag_active(&self, slot: MediaSlot) -> bool {
        self.draft().upload_ref(slot).zone.is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Generating..."
        } else {
            "Generate video"
        }
    }

    pub fn select_image(&self, file: MediaFile) -> Result<(), SelectionError> {
        self.select(MediaSlot::Image, file)
    }

    pub fn select_video(&self, file: MediaFile) -> Result<(), SelectionError> {
        self.select(MediaSlot::Video, file)
    }

    fn select(&self, slot: MediaSlot, file: MediaFile) -> Result<(), SelectionError> {
        let result = self.draft().upload(slot).slot.select(file);
        submit::report_selection(&self.services, result)
    }

    pub fn drag_enter(&self, slot: MediaSlot, file_count: usize) {
        self.draft().upload(slot).zone.drag_enter(file_count);
    }

    pub fn drag_over(&self, slot: MediaSlot, file_count: usize) {
        self.draft().upload(slot).zone.drag_over(file_count);
    }

    pub fn drag_leave(&self, slot: MediaSlot) {
        self.draft().upload(slot).zone.drag_leave();
    }

    /// Drop onto the zone for `slot`; the file lands in that slot.
    pub fn drop_files(&self, slot: MediaSlot, files: Vec<MediaFile>) -> Result<(), SelectionError> {
        let result = {
            let mut draft = self.draft();
            let upload = draft.upload(slot);
            match upload.zone.drop_files(files) {
                Some(file) => upload.slot.select(file),
                None => Ok(()),
            }
        };
        submit::report_selection(&self.services, result)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_permit) = self.gate.try_enter() else {
            log::debug!("Ignoring submit while a generation is in flight");
            return SubmitOutcome::Busy;
        };

        if let Err(outcome) = submit::check_session(&self.services) {
            return outcome;
        }

        let prepared = {
            let draft = self.draft();
            match (draft.image.slot.file(), draft.video.slot.file()) {
                (None, _) => Err(ValidationError::MissingImage),
                (Some(_), None) => Err(ValidationError::MissingVideo),
                (Some(image), Some(video)) => Ok(GenerationRequest::new()
                    .with_image(image.clone())
                    .with_video(video.clone())),
            }
        };
        let request = match prepared {
            Ok(request) => request,
            Err(error) => return submit::invalid(&self.services, error, None),
        };

        let outcome = submit::dispatch(&self.services, &request).await;
        if let SubmitOutcome::Generated(cover) = &outcome {
            {
                let mut draft = self.draft();
                draft.image.slot.clear();
                draft.video.slot.clear();
            }
            submit::announce(&self.services, cover.clone());
        }
        outcome
    }
}
