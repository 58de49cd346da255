use std::path::PathBuf;

use crate::view_model::AppViewModel;

/// Confirmation used when the endpoint accepts an upload without a message.
pub const DEFAULT_UPLOAD_MESSAGE: &str = "File uploaded successfully.";

/// A user-chosen file. Only the handle is held; bytes are read at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Listing,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Upload requested without a selection. No request was made.
    NoFileSelected,
    /// The endpoint answered the POST with a non-success status.
    UploadRejected { status: u16, reason: String },
    /// The endpoint answered the GET with a non-success status.
    FetchRejected { status: u16, reason: String },
    /// Transport failure, unreadable file or malformed response body.
    NetworkOrParse { operation: Operation, detail: String },
}

impl Failure {
    pub fn operation(&self) -> Operation {
        match self {
            Failure::NoFileSelected | Failure::UploadRejected { .. } => Operation::Upload,
            Failure::FetchRejected { .. } => Operation::Listing,
            Failure::NetworkOrParse { operation, .. } => *operation,
        }
    }

    /// Message shown to the user. One per category; details go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            Failure::NoFileSelected => "Please select a file to upload.",
            _ => match self.operation() {
                Operation::Upload => "An error occurred while uploading the file.",
                Operation::Listing => "Could not load the file list.",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    /// A request is outstanding. `notice` keeps an upload confirmation visible
    /// while the follow-up listing runs.
    Loading {
        operation: Operation,
        notice: Option<String>,
    },
    Succeeded(String),
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    files: Vec<String>,
    selected: Option<SelectedFile>,
    uploading: Option<SelectedFile>,
    status: Status,
    listing_fetched_utc: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let (error, success) = match &self.status {
            Status::Failed(failure) => (Some(failure.user_message().to_string()), None),
            Status::Succeeded(message) => (None, Some(message.clone())),
            Status::Loading { notice, .. } => (None, notice.clone()),
            Status::Idle => (None, None),
        };
        let loading = self.is_loading();
        AppViewModel {
            loading,
            error,
            success,
            selected_name: self.selected.as_ref().map(|file| file.name.clone()),
            upload_enabled: !loading && self.selected.is_some(),
            files: self.files.clone(),
            listing_fetched_utc: self.listing_fetched_utc.clone(),
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading { .. })
    }

    pub fn outstanding(&self) -> Option<Operation> {
        match self.status {
            Status::Loading { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select(&mut self, file: SelectedFile) {
        self.selected = Some(file);
        self.status = match std::mem::take(&mut self.status) {
            Status::Loading { operation, .. } => Status::Loading {
                operation,
                notice: None,
            },
            Status::Idle | Status::Succeeded(_) | Status::Failed(_) => Status::Idle,
        };
        self.mark_dirty();
    }

    pub(crate) fn begin(&mut self, operation: Operation, notice: Option<String>) {
        self.status = Status::Loading { operation, notice };
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, failure: Failure) {
        self.status = Status::Failed(failure);
        self.mark_dirty();
    }

    pub(crate) fn begin_upload(&mut self, file: SelectedFile) {
        self.uploading = Some(file);
        self.begin(Operation::Upload, None);
    }

    /// Ends the upload in flight. On success the selection is dropped if it is
    /// still the file that was sent.
    pub(crate) fn finish_upload(&mut self, succeeded: bool) {
        let uploaded = self.uploading.take();
        if succeeded && uploaded.is_some() && self.selected == uploaded {
            self.selected = None;
        }
    }

    pub(crate) fn replace_listing(&mut self, files: Vec<String>, fetched_utc: Option<String>) {
        self.files = files;
        self.listing_fetched_utc = fetched_utc;
        self.status = match std::mem::take(&mut self.status) {
            Status::Loading {
                notice: Some(notice),
                ..
            } => Status::Succeeded(notice),
            _ => Status::Idle,
        };
        self.mark_dirty();
    }
}
