//! Video-handling form: a single required source video.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::submit::{self, SubmitGate};
use super::{FormServices, SubmitOutcome, ValidationError};
use crate::api::GenerationRequest;
use crate::media::{Accept, MediaFile};
use crate::selection::{DropZone, FileSlot, SelectionError};

#[derive(Debug)]
struct Draft {
    video: FileSlot,
    drop_zone: DropZone,
}

pub struct VideoHandlingForm {
    services: FormServices,
    gate: SubmitGate,
    draft: Mutex<Draft>,
}

impl VideoHandlingForm {
    pub fn new(services: FormServices) -> Self {
        let video = FileSlot::new(Accept::VIDEO, services.previews.clone());
        Self {
            services,
            gate: SubmitGate::new(),
            draft: Mutex::new(Draft {
                video,
                drop_zone: DropZone::default(),
            }),
        }
    }

    fn draft(&self) -> MutexGuard<'_, Draft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn video(&self) -> Option<MediaFile> {
        self.draft().video.file().cloned()
    }

    pub fn video_preview(&self) -> Option<String> {
        self.draft().video.preview_url().map(str::to_string)
    }

    pub fn is_drag_active(&self) -> bool {
        self.draft().drop_zone.is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Processing..."
        } else {
            "Process video"
        }
    }

    pub fn select_video(&self, file: MediaFile) -> Result<(), SelectionError> {
        let result = self.draft().video.select(file);
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

    pub fn drop_files(&self, files: Vec<MediaFile>) -> Result<(), SelectionError> {
        let result = {
            let mut draft = self.draft();
            match draft.drop_zone.drop_files(files) {
                Some(file) => draft.video.select(file),
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

        let Some(video) = self.video() else {
            return submit::invalid(&self.services, ValidationError::MissingSourceVideo, None);
        };
        let request = GenerationRequest::new().with_video(video);

        let outcome = submit::dispatch(&self.services, &request).await;
        if let SubmitOutcome::Generated(cover) = &outcome {
            self.draft().video.clear();
            submit::announce(&self.services, cover.clone());
        }
        outcome
    }
}
