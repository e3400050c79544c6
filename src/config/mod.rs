pub mod settings;
pub mod deployments;

pub use settings::Settings;
pub use deployments::DeploymentInfo;
