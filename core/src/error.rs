use thiserror::Error;

#[derive(Debug, Error)]
pub enum DtmfError {
    #[error("Sample rate {0} Hz is too low for the 650-1700 Hz tone band")]
    SampleRateTooLow(u32),

    #[error("No tone pair detected in analysis frame")]
    NoToneDetected,

    #[error("FFT error: {0}")]
    FftError(String),

    #[error("Invalid audio format: {0}")]
    InvalidAudioFormat(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),
}

pub type Result<T> = std::result::Result<T, DtmfError>;
