//! Typed reads over a [`ConfigProvider`]

use super::{ConfigError, ConfigProvider, TenantId};

/// Reads typed values for one tenant; blank values count as absent
#[derive(Debug)]
pub struct TypedReader<'a, P> {
    provider: &'a P,
    tenant_id: TenantId,
}

impl<'a, P: ConfigProvider> TypedReader<'a, P> {
    /// Creates a reader scoped to `tenant_id`
    pub fn new(provider: &'a P, tenant_id: TenantId) -> Self {
        Self {
            provider,
            tenant_id,
        }
    }

    /// A trimmed, non-empty string
    pub async fn string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = self.provider.get(key, self.tenant_id).await?;

        Ok(value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    /// A boolean flag, `default` when absent
    pub async fn bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(value) = self.string(key).await? else {
            return Ok(default);
        };

        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(key, value, "a boolean")),
        }
    }

    /// A port number; `0` counts as absent
    pub async fn port(&self, key: &str) -> Result<Option<u16>, ConfigError> {
        let Some(value) = self.string(key).await? else {
            return Ok(None);
        };

        match value.parse::<u16>() {
            Ok(0) => Ok(None),
            Ok(port) => Ok(Some(port)),
            Err(_) => Err(invalid(key, value, "a port number")),
        }
    }
}

fn invalid(key: &str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::config::tests::MockConfigProvider;

    use super::*;

    fn provider(value: &'static str) -> MockConfigProvider {
        let mut provider = MockConfigProvider::new();

        provider
            .expect_get()
            .returning(move |_, _| Ok(Some(value.to_string())));

        provider
    }

    #[tokio::test]
    async fn test_blank_string_is_absent() -> TestResult {
        let provider = provider("   ");
        let reader = TypedReader::new(&provider, TenantId(1));

        assert_eq!(reader.string("KEY").await?, None);
        assert!(reader.bool("KEY", true).await?);
        assert_eq!(reader.port("KEY").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_bool_spellings() -> TestResult {
        for (raw, expected) in [("1", true), ("ON", true), ("no", false), ("0", false)] {
            let provider = provider(raw);
            let reader = TypedReader::new(&provider, TenantId(1));

            assert_eq!(reader.bool("KEY", !expected).await?, expected, "{raw}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_port_out_of_range_is_invalid() {
        let provider = provider("70000");
        let reader = TypedReader::new(&provider, TenantId(1));

        let result = reader.port("PORT").await;

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { expected: "a port number", .. })
        ));
    }
}
