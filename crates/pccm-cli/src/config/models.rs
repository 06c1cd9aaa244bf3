use pccm::core::io::geometry::GeometryCsvOptions;
use pccm::engine::config::DescriptorConfig;

/// Fully resolved settings for one `generate` run.
pub struct AppConfig {
    pub descriptor: DescriptorConfig,
    pub input: GeometryCsvOptions,
}
