use crate::{Failure, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view came up; triggers the initial listing.
    Mounted,
    /// User picked a file. `None` means the picker was cancelled.
    FileSelected(Option<SelectedFile>),
    /// User clicked Send.
    UploadClicked,
    /// Engine completion for an upload, carrying the confirmation message.
    UploadFinished(Result<String, Failure>),
    /// Engine completion for a listing request.
    ListingFinished {
        result: Result<Vec<String>, Failure>,
        fetched_utc: Option<String>,
    },
    /// Input that maps to nothing (blank line, unknown command).
    NoOp,
}
