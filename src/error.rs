use jnd_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Unknown colormap: {0} (run 'cmap2d list' for the catalog)")]
    UnknownColormap(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_config() {
        let error = AppError::Config("threshold must be positive".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: threshold must be positive"
        );
    }

    #[test]
    fn test_app_error_unknown_colormap() {
        let error = AppError::UnknownColormap("viridis2d".to_string());
        assert_eq!(
            error.to_string(),
            "Unknown colormap: viridis2d (run 'cmap2d list' for the catalog)"
        );
    }

    #[test]
    fn test_app_error_from_engine_error() {
        let engine_error = EngineError::CoordinateOutOfRange { x: 2.0, y: 0.0 };
        let app_error: AppError = engine_error.into();
        match app_error {
            AppError::Engine(_) => {}
            _ => panic!("Expected Engine variant"),
        }
    }

    #[test]
    fn test_app_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<u32>("[").unwrap_err();
        let app_error: AppError = yaml_error.into();
        assert!(app_error.to_string().starts_with("YAML error: "));
    }
}
