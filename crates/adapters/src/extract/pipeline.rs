use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use swatchbook_application::{
    ApplicationError, ColorExtractor, ExtractionJob, ExtractionOutcome, ExtractionPipeline,
};
use swatchbook_domain::ExtractedColor;
use tracing::{debug, error};

/// Runs extractions on a single worker thread. Jobs still queued when a newer
/// one arrives are skipped; a running extraction always finishes and its
/// outcome is delivered, leaving staleness to the caller. A panicking
/// extractor is reported as a failed outcome and the worker keeps serving.
pub struct BackgroundExtractionPipeline {
    latest_sequence: Arc<AtomicU64>,
    submit_tx: mpsc::Sender<ExtractionJob>,
    result_rx: Mutex<mpsc::Receiver<ExtractionOutcome>>,
}

impl BackgroundExtractionPipeline {
    pub fn new(extractor: Arc<dyn ColorExtractor>) -> Self {
        let (submit_tx, submit_rx) = mpsc::channel::<ExtractionJob>();
        let (result_tx, result_rx) = mpsc::channel::<ExtractionOutcome>();
        let latest_sequence = Arc::new(AtomicU64::new(0));

        spawn_worker(submit_rx, result_tx, Arc::clone(&latest_sequence), extractor);

        Self {
            latest_sequence,
            submit_tx,
            result_rx: Mutex::new(result_rx),
        }
    }
}

impl ExtractionPipeline for BackgroundExtractionPipeline {
    fn submit(&self, job: ExtractionJob) -> Result<(), ApplicationError> {
        self.latest_sequence.fetch_max(job.sequence, Ordering::SeqCst);
        self.submit_tx.send(job).map_err(|error| {
            ApplicationError::Io(format!("failed to enqueue extraction job: {error}"))
        })
    }

    fn try_receive(&self) -> Result<Option<ExtractionOutcome>, ApplicationError> {
        let receiver = self
            .result_rx
            .lock()
            .map_err(|_| ApplicationError::Io("extraction result lock poisoned".to_string()))?;

        match receiver.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(ApplicationError::Io(
                "extraction result channel disconnected".to_string(),
            )),
        }
    }
}

fn spawn_worker(
    submit_rx: mpsc::Receiver<ExtractionJob>,
    result_tx: mpsc::Sender<ExtractionOutcome>,
    latest_sequence: Arc<AtomicU64>,
    extractor: Arc<dyn ColorExtractor>,
) {
    thread::spawn(move || {
        while let Ok(mut job) = submit_rx.recv() {
            while let Ok(next) = submit_rx.try_recv() {
                debug!(sequence = job.sequence, "queued extraction superseded");
                job = next;
            }

            if job.sequence < latest_sequence.load(Ordering::SeqCst) {
                debug!(sequence = job.sequence, "queued extraction superseded");
                continue;
            }

            let started = Instant::now();
            let result = run_extraction(extractor.as_ref(), &job);
            debug!(
                sequence = job.sequence,
                elapsed_ms = started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "extraction finished"
            );

            let outcome = ExtractionOutcome {
                sequence: job.sequence,
                result,
            };
            if result_tx.send(outcome).is_err() {
                return;
            }
        }
    });
}

fn run_extraction(
    extractor: &dyn ColorExtractor,
    job: &ExtractionJob,
) -> Result<Vec<ExtractedColor>, ApplicationError> {
    match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(&job.bytes))) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(sequence = job.sequence, %message, "extractor panicked");
            Err(ApplicationError::Extraction(format!("extractor panicked: {message}")))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
