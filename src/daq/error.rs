use thiserror::Error;
#[derive(Debug, Error)]
pub enum DaqError {
    #[error("{0:?} is not a valid matriculation number (expected 's' followed by 7 digits)")]
    InvalidIdentity(String),
    #[error("unknown instrument {0:?}; expected one of: constant, ramp up, ramp down, coursework")]
    UnknownInstrument(String),
    #[error("no instrument connected; call connect first")]
    NotConnected,
    #[error("instrument not triggered; call trigger before requesting readings")]
    NotTriggered,
    #[error("failed to fit spline: {0}")]
    SplineFit(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for DaqError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        DaqError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for DaqError {
    fn from(value: image::ImageError) -> Self {
        DaqError::Plot(value.to_string())
    }
}
