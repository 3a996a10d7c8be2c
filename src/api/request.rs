//! Multipart payload for a generation submission.

use reqwest::multipart::{Form, Part};

use crate::media::MediaFile;

pub const DESCRIPTION_FIELD: &str = "description";
pub const IMAGE_FIELD: &str = "image";
pub const VIDEO_FIELD: &str = "video";

/// Fields sent to `/api/gen-cover`. Absent fields are omitted from the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub description: Option<String>,
    pub image: Option<MediaFile>,
    pub video: Option<MediaFile>,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: MediaFile) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_video(mut self, video: MediaFile) -> Self {
        self.video = Some(video);
        self
    }

    /// Names of the fields that will be sent, in order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.description.is_some() {
            names.push(DESCRIPTION_FIELD);
        }
        if self.image.is_some() {
            names.push(IMAGE_FIELD);
        }
        if self.video.is_some() {
            names.push(VIDEO_FIELD);
        }
        names
    }

    pub(crate) fn to_form(&self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        if let Some(description) = &self.description {
            form = form.text(DESCRIPTION_FIELD, description.clone());
        }
        if let Some(image) = &self.image {
            form = form.part(IMAGE_FIELD, file_part(image)?);
        }
        if let Some(video) = &self.video {
            form = form.part(VIDEO_FIELD, file_part(video)?);
        }
        Ok(form)
    }
}

fn file_part(file: &MediaFile) -> Result<Part, reqwest::Error> {
    Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.mime)
}
