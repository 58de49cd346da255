use crate::{AppState, Effect, Failure, Msg, Operation};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            // A listing or upload already in flight will refresh the view on its own.
            if state.is_loading() {
                return (state, Vec::new());
            }
            state.begin(Operation::Listing, None);
            vec![Effect::FetchListing]
        }
        Msg::FileSelected(Some(file)) => {
            state.select(file);
            Vec::new()
        }
        Msg::FileSelected(None) => Vec::new(),
        Msg::UploadClicked => {
            // Overlapping operations are refused here, not only by the disabled button.
            if state.is_loading() {
                return (state, Vec::new());
            }
            match state.selected().cloned() {
                Some(file) => {
                    state.begin_upload(file.clone());
                    vec![Effect::UploadFile { file }]
                }
                None => {
                    state.fail(Failure::NoFileSelected);
                    Vec::new()
                }
            }
        }
        Msg::UploadFinished(result) => {
            if state.outstanding() != Some(Operation::Upload) {
                return (state, Vec::new());
            }
            match result {
                Ok(message) => {
                    state.finish_upload(true);
                    state.begin(Operation::Listing, Some(message));
                    vec![Effect::FetchListing]
                }
                Err(failure) => {
                    state.finish_upload(false);
                    state.fail(failure);
                    Vec::new()
                }
            }
        }
        Msg::ListingFinished {
            result,
            fetched_utc,
        } => {
            if state.outstanding() != Some(Operation::Listing) {
                return (state, Vec::new());
            }
            match result {
                Ok(files) => state.replace_listing(files, fetched_utc),
                // The previous listing stays on screen.
                Err(failure) => state.fail(failure),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
