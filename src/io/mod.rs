pub(crate) mod logging;
pub(crate) mod settings;

pub use settings::KuboConfig;
