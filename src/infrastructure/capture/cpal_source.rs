//! Microphone source using cpal
//!
//! The cpal stream is not `Send`, so it is created, played and dropped on a
//! dedicated thread. The struct only keeps the stream configuration, the stop
//! flag and the thread handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use tracing::{debug, warn};

use super::block_assembler::BlockAssembler;
use crate::application::ports::{AudioSource, BlockCallback, SourceError};

/// How often the capture thread checks the stop flag
const STOP_POLL: Duration = Duration::from_millis(20);

/// Default input device, default input config, channel 0 only
pub struct CpalSource {
    config: StreamConfig,
    sample_format: SampleFormat,
    buffer_len: usize,
    stop_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CpalSource {
    /// Probe the default input device and prepare to capture blocks of `buffer_len` samples
    pub fn open(buffer_len: usize) -> Result<Self, SourceError> {
        let device = Self::input_device()?;
        let supported = device
            .default_input_config()
            .map_err(|e| SourceError::StartFailed(format!("Failed to get input config: {}", e)))?;

        let sample_format = supported.sample_format();
        if !Self::is_supported(sample_format) {
            return Err(SourceError::UnsupportedFormat(format!("{:?}", sample_format)));
        }

        let config = supported.config();
        debug!(
            device = %device.name().unwrap_or_default(),
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            format = ?sample_format,
            "opened input device"
        );

        Ok(Self {
            config,
            sample_format,
            buffer_len: buffer_len.max(1),
            stop_flag: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }

    fn input_device() -> Result<cpal::Device, SourceError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(SourceError::NoInputDevice)
    }

    fn is_supported(format: SampleFormat) -> bool {
        matches!(
            format,
            SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16 | SampleFormat::I32
        )
    }

    fn open_stream(
        config: &StreamConfig,
        sample_format: SampleFormat,
        assembler: Arc<Mutex<BlockAssembler>>,
    ) -> Result<cpal::Stream, SourceError> {
        let device = Self::input_device()?;
        match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, config, assembler),
            SampleFormat::I16 => Self::build_stream::<i16>(&device, config, assembler),
            SampleFormat::U16 => Self::build_stream::<u16>(&device, config, assembler),
            SampleFormat::I32 => Self::build_stream::<i32>(&device, config, assembler),
            other => Err(SourceError::UnsupportedFormat(format!("{:?}", other))),
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        assembler: Arc<Mutex<BlockAssembler>>,
    ) -> Result<cpal::Stream, SourceError>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let channels = usize::from(config.channels);
        device
            .build_input_stream(
                config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut assembler) = assembler.lock() {
                        assembler.push_interleaved(data, channels, |s| f32::from_sample(s));
                    }
                },
                |err| warn!(error = %err, "audio stream error"),
                None,
            )
            .map_err(|e| SourceError::StartFailed(e.to_string()))
    }
}

impl AudioSource for CpalSource {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    fn start(&mut self, on_block: BlockCallback) -> Result<(), SourceError> {
        if self.worker.is_some() {
            return Err(SourceError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }
        self.stop_flag.store(false, Ordering::SeqCst);

        let config = self.config.clone();
        let sample_format = self.sample_format;
        let buffer_len = self.buffer_len;
        let stop_flag = Arc::clone(&self.stop_flag);
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), SourceError>>();

        let handle = std::thread::spawn(move || {
            let assembler = Arc::new(Mutex::new(BlockAssembler::new(buffer_len, on_block)));

            let stream = match Self::open_stream(&config, sample_format, Arc::clone(&assembler)) {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            if let Err(e) = stream.play() {
                let _ = ready_tx.send(Err(SourceError::StartFailed(e.to_string())));
                return;
            }
            let _ = ready_tx.send(Ok(()));

            while !stop_flag.load(Ordering::SeqCst) {
                std::thread::sleep(STOP_POLL);
            }

            // No callback can run once the stream is gone, so the tail is final
            drop(stream);
            assembler
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush();
        });

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.worker = Some(handle);
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(SourceError::StartFailed(
                    "Capture thread exited before starting".to_string(),
                ))
            }
        }
    }

    fn stop(&mut self) -> Result<(), SourceError> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            handle
                .join()
                .map_err(|_| SourceError::StreamFailed("Capture thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for CpalSource {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
