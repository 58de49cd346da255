use crate::SelectedFile;

/// IO requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the endpoint and report back with `Msg::ListingFinished`.
    FetchListing,
    /// Read, encode and POST the file, then report back with `Msg::UploadFinished`.
    UploadFile { file: SelectedFile },
}
