//! Audio device output.
//!
//! The stream callback only calls [`AudioRenderer::render`] and converts the
//! result to the device sample format. No locks, no logging.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use handpiano::AudioRenderer;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("no default output device")]
    NoOutputDevice,
    #[error(transparent)]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error(transparent)]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error(transparent)]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error(transparent)]
    PauseStream(#[from] cpal::PauseStreamError),
    #[error("unsupported sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
}

/// The default output device and its preferred configuration.
pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl OutputDevice {
    pub fn open_default() -> Result<Self, OutputError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(OutputError::NoOutputDevice)?;
        let config = device.default_output_config()?;
        log::info!(
            "[audio] {} @ {} Hz, {} ch, {:?}",
            device.name().unwrap_or_else(|_| "unknown device".into()),
            config.sample_rate().0,
            config.channels(),
            config.sample_format()
        );
        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    /// Start streaming. The renderer moves into the callback.
    pub fn start(self, renderer: AudioRenderer) -> Result<Output, OutputError> {
        let channels = self.config.channels() as usize;
        let config: cpal::StreamConfig = self.config.config();
        let stream = match self.config.sample_format() {
            cpal::SampleFormat::F32 => build::<f32>(&self.device, &config, channels, renderer)?,
            cpal::SampleFormat::I16 => build::<i16>(&self.device, &config, channels, renderer)?,
            cpal::SampleFormat::U16 => build::<u16>(&self.device, &config, channels, renderer)?,
            other => return Err(OutputError::UnsupportedSampleFormat(other)),
        };
        stream.play()?;
        Ok(Output { stream })
    }
}

/// A playing stream. Dropping it also stops playback.
pub struct Output {
    stream: cpal::Stream,
}

impl Output {
    pub fn stop(self) -> Result<(), OutputError> {
        self.stream.pause()?;
        log::info!("[audio] stopped");
        Ok(())
    }
}

fn build<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut renderer: AudioRenderer,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    // grows to the largest block once, then reused
    let mut scratch: Vec<f32> = Vec::with_capacity(4096);
    let err_fn = |err| log::error!("[audio] stream error: {err}");
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            scratch.resize(data.len(), 0.0);
            renderer.render(&mut scratch, channels);
            for (dst, src) in data.iter_mut().zip(&scratch) {
                *dst = T::from_sample(*src);
            }
        },
        err_fn,
        None,
    )
}
