// Tests for the ffmpeg-backed capturer's failure handling. These use stand-in
// binaries (`true`, `false`, a missing path) so no real transcoder or network
// is needed.

use std::time::Duration;

use tempfile::TempDir;
use vedika::{AudioCapturer, FfmpegCapturer, PipelineError};

#[tokio::test]
async fn test_missing_binary_is_a_capture_error() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("chunk.wav");

    let capturer = FfmpegCapturer::new("/nonexistent/ffmpeg");
    let err = capturer
        .capture("https://cdn.example/live.m3u8", &dest, Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Capture { .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_nonzero_exit_is_a_capture_error() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("chunk.wav");

    // `false` exits 1 without writing anything, like ffmpeg on a dead stream
    let capturer = FfmpegCapturer::new("false");
    let err = capturer
        .capture("https://cdn.example/live.m3u8", &dest, Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Capture { .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_clean_exit_without_output_is_a_capture_error() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("chunk.wav");

    // `true` exits 0 but produces no file
    let capturer = FfmpegCapturer::new("true");
    let err = capturer
        .capture("https://cdn.example/live.m3u8", &dest, Duration::from_secs(1))
        .await
        .unwrap_err();

    match err {
        PipelineError::Capture { message } => {
            assert!(message.contains("no output file"), "got: {}", message);
        }
        other => panic!("expected Capture error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_wav_is_rejected() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("chunk.wav");

    // A header-only WAV: what ffmpeg leaves behind when the stream drops
    // before the first audio packet
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    hound::WavWriter::create(&dest, spec)
        .unwrap()
        .finalize()
        .unwrap();

    // `true` exits 0 and leaves the pre-existing file in place
    let capturer = FfmpegCapturer::new("true");
    let err = capturer
        .capture("https://cdn.example/live.m3u8", &dest, Duration::from_secs(1))
        .await
        .unwrap_err();

    match err {
        PipelineError::Capture { message } => {
            assert!(message.contains("empty"), "got: {}", message);
        }
        other => panic!("expected Capture error, got {:?}", other),
    }
    assert!(!dest.exists(), "degenerate file must be discarded");
}
