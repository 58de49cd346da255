use std::sync::mpsc;
use std::thread;

use uploader_core::Effect;
use uploader_engine::{EngineEvent, EngineHandle};
use uploader_logging::{client_error, client_info};

use super::app::Input;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: mpsc::Receiver<EngineEvent>,
        input_tx: mpsc::Sender<Input>,
    ) -> Self {
        Self::spawn_event_loop(events, input_tx);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchListing => {
                    client_info!("FetchListing");
                    self.engine.list_files();
                }
                Effect::UploadFile { file } => {
                    client_info!("UploadFile name={} path={:?}", file.name, file.path);
                    self.engine.upload(file.name, file.path);
                }
            }
        }
    }

    fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, input_tx: mpsc::Sender<Input>) {
        thread::spawn(move || {
            for event in events {
                match &event {
                    EngineEvent::ListingCompleted { result: Err(err), .. } => {
                        client_error!("Listing failed: {}", err);
                    }
                    EngineEvent::UploadCompleted {
                        filename,
                        result: Err(err),
                    } => {
                        client_error!("Upload of {} failed: {}", filename, err);
                    }
                    _ => {}
                }
                if input_tx.send(Input::Msg(event.into_msg())).is_err() {
                    break;
                }
            }
        });
    }
}
