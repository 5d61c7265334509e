#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    /// Development switch: when false, 500 bodies carry a generic
    /// message and the detail stays in the server log only.
    pub expose_internal_errors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            expose_internal_errors: false,
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_validation_rejects_zero_body_limit() {
        let api = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config(&api).expect_err("zero body limit");
        assert!(err.contains("max_body_bytes"));
    }

    #[test]
    fn default_config_passes_validation() {
        validate_startup_config(&ApiConfig::default()).expect("default config is valid");
    }
}
