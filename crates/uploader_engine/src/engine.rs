use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use uploader_logging::{client_debug, client_warn};

use crate::{encode_file, BucketApi, EngineEvent, UploadRequest};

/// Produces the timestamp attached to each completed listing.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

enum EngineCommand {
    ListFiles,
    Upload { filename: String, path: PathBuf },
}

/// Handle to the worker thread that performs all endpoint IO.
///
/// Commands run one at a time in submission order, so a refresh queued after
/// an upload's completion is never interleaved with that upload.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        api: Arc<dyn BucketApi>,
        clock: Clock,
    ) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("uploader-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event = runtime.block_on(handle_command(api.as_ref(), &clock, command));
                    if event_tx.send(event).is_err() {
                        client_debug!("Event receiver dropped; engine stopping");
                        break;
                    }
                }
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn list_files(&self) {
        self.send(EngineCommand::ListFiles);
    }

    pub fn upload(&self, filename: impl Into<String>, path: impl Into<PathBuf>) {
        self.send(EngineCommand::Upload {
            filename: filename.into(),
            path: path.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            client_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(api: &dyn BucketApi, clock: &Clock, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::ListFiles => {
            let result = api.list_files().await;
            EngineEvent::ListingCompleted {
                result,
                fetched_utc: clock(),
            }
        }
        EngineCommand::Upload { filename, path } => {
            let result = upload_file(api, &filename, path).await;
            EngineEvent::UploadCompleted { filename, result }
        }
    }
}

async fn upload_file(
    api: &dyn BucketApi,
    filename: &str,
    path: PathBuf,
) -> Result<String, crate::ApiError> {
    let encoded = encode_file(&path).await?;
    client_debug!(
        "Encoded {} ({} bytes -> {} base64 chars)",
        filename,
        encoded.byte_len,
        encoded.content.len()
    );
    let request = UploadRequest {
        filename: filename.to_string(),
        file_content: encoded.content,
    };
    api.upload(&request).await
}
