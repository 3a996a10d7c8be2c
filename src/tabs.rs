//! Tab container: exactly one form is mounted at a time.

use std::fmt;

use crate::forms::{FormServices, ImageToVideoForm, TextToImageForm, VideoHandlingForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    TextToImage,
    ImageToVideo,
    VideoHandling,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::TextToImage, Tab::ImageToVideo, Tab::VideoHandling];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::TextToImage => "Text to image",
            Tab::ImageToVideo => "Image to video",
            Tab::VideoHandling => "Video handling",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The mounted form.
pub enum ActiveForm {
    TextToImage(TextToImageForm),
    ImageToVideo(ImageToVideoForm),
    VideoHandling(VideoHandlingForm),
}

impl ActiveForm {
    fn mount(tab: Tab, services: FormServices) -> Self {
        match tab {
            Tab::TextToImage => ActiveForm::TextToImage(TextToImageForm::new(services)),
            Tab::ImageToVideo => ActiveForm::ImageToVideo(ImageToVideoForm::new(services)),
            Tab::VideoHandling => ActiveForm::VideoHandling(VideoHandlingForm::new(services)),
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            ActiveForm::TextToImage(_) => Tab::TextToImage,
            ActiveForm::ImageToVideo(_) => Tab::ImageToVideo,
            ActiveForm::VideoHandling(_) => Tab::VideoHandling,
        }
    }
}

pub struct TabContainer {
    services: FormServices,
    form: ActiveForm,
}

impl TabContainer {
    pub fn new(services: FormServices) -> Self {
        let form = ActiveForm::mount(Tab::default(), services.clone());
        Self { services, form }
    }

    pub fn active_tab(&self) -> Tab {
        self.form.tab()
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active_tab() == tab
    }

    /// Switch tabs. The previous form is unmounted and its previews released.
    pub fn click(&mut self, tab: Tab) {
        if self.is_active(tab) {
            return;
        }
        log::debug!("Switching tab {} -> {}", self.active_tab(), tab);
        self.form = ActiveForm::mount(tab, self.services.clone());
    }

    pub fn active_form(&self) -> &ActiveForm {
        &self.form
    }

    pub fn text_to_image(&self) -> Option<&TextToImageForm> {
        match &self.form {
            ActiveForm::TextToImage(form) => Some(form),
            _ => None,
        }
    }

    pub fn image_to_video(&self) -> Option<&ImageToVideoForm> {
        match &self.form {
            ActiveForm::ImageToVideo(form) => Some(form),
            _ => None,
        }
    }

    pub fn video_handling(&self) -> Option<&VideoHandlingForm> {
        match &self.form {
            ActiveForm::VideoHandling(form) => Some(form),
            _ => None,
        }
    }
}
