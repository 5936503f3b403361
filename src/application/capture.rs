//! Capture recording use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::time::{interval, Duration as TokioDuration, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::audio::ContentType;
use crate::domain::recording::Duration;

use super::ports::{AudioSource, DeliveryError, SourceError, WavSink};
use super::recorder::SharedRecorder;

/// How often the wait loop checks the clock and the stop flag
const TICK_MS: u64 = 100;

/// Errors from the capture use case
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture failed: {0}")]
    Source(#[from] SourceError),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Progress callback type for reporting capture progress.
/// Parameters: (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Input parameters for the capture use case
#[derive(Debug, Clone, Default)]
pub struct CaptureInput {
    /// Maximum capture length
    pub duration: Duration,
    /// Label attached to the exported document
    pub content_type: ContentType,
}

/// Output from the capture use case
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    pub total_samples: usize,
    pub sample_rate: u32,
    /// Exported document length in bytes (0 when nothing was captured)
    pub bytes: usize,
    /// Exported document size in human-readable format
    pub size: String,
    /// Sink receipt; `None` when the recording was empty and nothing was delivered
    pub receipt: Option<String>,
    /// Whether the stop flag ended the capture before the duration elapsed
    pub stopped_early: bool,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct CaptureCallbacks {
    /// Called while capturing with (elapsed_ms, total_ms)
    pub on_progress: Option<ProgressCallback>,
    /// Called once the source is delivering, with the sample rate
    pub on_recording_start: Option<Box<dyn Fn(u32) + Send + Sync>>,
    /// Called after export with the human-readable document size
    pub on_recording_end: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called before a non-empty document is handed to the sink
    pub on_delivery_start: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Records from a source for a bounded time, exports WAV and delivers it
pub struct CaptureRecordingUseCase<S, K>
where
    S: AudioSource,
    K: WavSink,
{
    source: S,
    sink: K,
    stop_flag: Arc<AtomicBool>,
}

impl<S, K> CaptureRecordingUseCase<S, K>
where
    S: AudioSource,
    K: WavSink,
{
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Signal to stop capturing early; what was captured is still exported
    pub fn stop_early(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Run one capture: record, wait, stop, export, deliver
    pub async fn execute(
        &mut self,
        input: CaptureInput,
        callbacks: CaptureCallbacks,
    ) -> Result<CaptureOutput, CaptureError> {
        self.stop_flag.store(false, Ordering::SeqCst);

        let sample_rate = self.source.sample_rate();
        let recorder = SharedRecorder::new(sample_rate);
        recorder.record();

        if let Err(e) = self.source.start(recorder.block_callback()) {
            recorder.stop();
            return Err(e.into());
        }
        info!(
            sample_rate,
            buffer_len = self.source.buffer_len(),
            duration = %input.duration,
            "capture started"
        );

        if let Some(ref cb) = callbacks.on_recording_start {
            cb(sample_rate);
        }

        let stopped_early = self
            .wait(input.duration, callbacks.on_progress.as_ref())
            .await;

        // Stop the source before the recorder so the flushed tail block is kept
        let stopped = self.source.stop();
        recorder.stop();
        stopped?;

        let document = recorder.export(Some(input.content_type.as_str()));
        let total_samples = recorder.total_samples();
        let size = document.human_readable_size();
        debug!(total_samples, bytes = document.len(), stopped_early, "capture finished");

        if let Some(ref cb) = callbacks.on_recording_end {
            cb(&size);
        }

        let receipt = if document.is_empty() {
            None
        } else {
            if let Some(ref cb) = callbacks.on_delivery_start {
                cb();
            }
            Some(self.sink.deliver(&document).await?)
        };

        Ok(CaptureOutput {
            total_samples,
            sample_rate,
            bytes: document.len(),
            size,
            receipt,
            stopped_early,
        })
    }

    /// Wait for the duration to elapse or the stop flag; returns whether the flag ended it
    async fn wait(&self, duration: Duration, on_progress: Option<&ProgressCallback>) -> bool {
        let total_ms = duration.as_millis();
        let start = Instant::now();
        let mut ticker = interval(TokioDuration::from_millis(TICK_MS.min(total_ms.max(1))));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let elapsed = start.elapsed().as_millis() as u64;

            if elapsed >= total_ms {
                if let Some(progress) = on_progress {
                    progress(total_ms, total_ms);
                }
                return false;
            }
            if self.stop_flag.load(Ordering::SeqCst) {
                return true;
            }
            if let Some(progress) = on_progress {
                progress(elapsed, total_ms);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::BlockCallback;
    use crate::domain::audio::WavDocument;
    use crate::domain::recording::SampleBlock;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU64;
    use std::sync::Mutex;

    /// Delivers `blocks` on start and `tail` on stop
    struct MockSource {
        blocks: Vec<SampleBlock>,
        tail: Option<SampleBlock>,
        callback: Option<BlockCallback>,
        fail_start: bool,
    }

    impl MockSource {
        fn with_blocks(blocks: Vec<SampleBlock>) -> Self {
            Self {
                blocks,
                tail: None,
                callback: None,
                fail_start: false,
            }
        }
    }

    impl AudioSource for MockSource {
        fn sample_rate(&self) -> u32 {
            44_100
        }

        fn buffer_len(&self) -> usize {
            4096
        }

        fn start(&mut self, mut on_block: BlockCallback) -> Result<(), SourceError> {
            if self.fail_start {
                return Err(SourceError::NoInputDevice);
            }
            for block in self.blocks.drain(..) {
                on_block(block);
            }
            self.callback = Some(on_block);
            Ok(())
        }

        fn stop(&mut self) -> Result<(), SourceError> {
            if let (Some(cb), Some(tail)) = (self.callback.as_mut(), self.tail.take()) {
                cb(tail);
            }
            self.callback = None;
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockSink {
        delivered: Arc<Mutex<Vec<WavDocument>>>,
    }

    #[async_trait]
    impl WavSink for MockSink {
        async fn deliver(&self, document: &WavDocument) -> Result<String, DeliveryError> {
            self.delivered.lock().unwrap().push(document.clone());
            Ok("delivered".to_string())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl WavSink for FailingSink {
        async fn deliver(&self, _document: &WavDocument) -> Result<String, DeliveryError> {
            Err(DeliveryError::WriteFailed("disk full".to_string()))
        }
    }

    fn short_input() -> CaptureInput {
        CaptureInput {
            duration: Duration::from_millis(30),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn captures_and_delivers_wav() {
        let sink = MockSink::default();
        let source = MockSource::with_blocks(vec![SampleBlock::silence(4096)]);
        let mut use_case = CaptureRecordingUseCase::new(source, sink.clone());

        let output = use_case
            .execute(short_input(), CaptureCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.total_samples, 4096);
        assert_eq!(output.sample_rate, 44_100);
        assert_eq!(output.bytes, 44 + 8192);
        assert_eq!(output.receipt.as_deref(), Some("delivered"));
        assert!(!output.stopped_early);

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].content_type().as_str(), "audio/wav");
    }

    #[tokio::test]
    async fn tail_block_flushed_on_stop_is_kept() {
        let sink = MockSink::default();
        let mut source = MockSource::with_blocks(vec![SampleBlock::silence(4096)]);
        source.tail = Some(SampleBlock::silence(100));
        let mut use_case = CaptureRecordingUseCase::new(source, sink);

        let output = use_case
            .execute(short_input(), CaptureCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.total_samples, 4196);
    }

    #[tokio::test]
    async fn empty_capture_is_not_delivered() {
        let sink = MockSink::default();
        let source = MockSource::with_blocks(Vec::new());
        let mut use_case = CaptureRecordingUseCase::new(source, sink.clone());

        let output = use_case
            .execute(short_input(), CaptureCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.bytes, 0);
        assert!(output.receipt.is_none());
        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn custom_content_type_is_passed_to_sink() {
        let sink = MockSink::default();
        let source = MockSource::with_blocks(vec![SampleBlock::silence(8)]);
        let mut use_case = CaptureRecordingUseCase::new(source, sink.clone());

        let input = CaptureInput {
            content_type: ContentType::new("audio/x-wav"),
            ..short_input()
        };
        use_case
            .execute(input, CaptureCallbacks::default())
            .await
            .unwrap();

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered[0].content_type().as_str(), "audio/x-wav");
    }

    #[tokio::test]
    async fn start_failure_is_reported() {
        let mut source = MockSource::with_blocks(Vec::new());
        source.fail_start = true;
        let mut use_case = CaptureRecordingUseCase::new(source, MockSink::default());

        let result = use_case
            .execute(short_input(), CaptureCallbacks::default())
            .await;

        assert!(matches!(
            result,
            Err(CaptureError::Source(SourceError::NoInputDevice))
        ));
    }

    #[tokio::test]
    async fn delivery_failure_is_reported() {
        let source = MockSource::with_blocks(vec![SampleBlock::silence(8)]);
        let mut use_case = CaptureRecordingUseCase::new(source, FailingSink);

        let result = use_case
            .execute(short_input(), CaptureCallbacks::default())
            .await;

        assert!(matches!(result, Err(CaptureError::Delivery(_))));
    }

    #[tokio::test]
    async fn stop_flag_ends_capture_early() {
        let source = MockSource::with_blocks(vec![SampleBlock::silence(16)]);
        let mut use_case = CaptureRecordingUseCase::new(source, MockSink::default());
        let flag = use_case.stop_flag();

        tokio::spawn(async move {
            tokio::time::sleep(TokioDuration::from_millis(150)).await;
            flag.store(true, Ordering::SeqCst);
        });

        let input = CaptureInput {
            duration: Duration::from_secs(30),
            ..Default::default()
        };
        let started = Instant::now();
        let output = use_case
            .execute(input, CaptureCallbacks::default())
            .await
            .unwrap();

        assert!(output.stopped_early);
        assert_eq!(output.total_samples, 16);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[tokio::test]
    async fn progress_reaches_total() {
        let last = Arc::new(AtomicU64::new(0));
        let last_clone = Arc::clone(&last);
        let callbacks = CaptureCallbacks {
            on_progress: Some(Arc::new(move |elapsed, _total| {
                last_clone.store(elapsed, Ordering::SeqCst);
            })),
            ..Default::default()
        };

        let source = MockSource::with_blocks(vec![SampleBlock::silence(16)]);
        let mut use_case = CaptureRecordingUseCase::new(source, MockSink::default());
        use_case.execute(short_input(), callbacks).await.unwrap();

        assert_eq!(last.load(Ordering::SeqCst), 30);
    }
}
