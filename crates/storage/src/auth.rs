use aws_config::sts::AssumeRoleProvider;
use aws_config::{ConfigLoader, Region, SdkConfig};
use tracing::{debug, info};

use crate::config::AwsBaseConfig;

const DEFAULT_SESSION_NAME: &str = "ingest-gateway";

/// Load the SDK configuration used by the S3 object store.
///
/// Credentials come from the default provider chain. When `role_arn` is set,
/// those base credentials are exchanged through STS for the role's and
/// refreshed before they expire. The endpoint override (MinIO, LocalStack)
/// applies to both the STS call and the final configuration.
pub async fn build_sdk_config(config: &AwsBaseConfig) -> SdkConfig {
    let base = loader(config).load().await;

    let Some(role_arn) = &config.role_arn else {
        return base;
    };

    let session_name = config
        .session_name
        .as_deref()
        .unwrap_or(DEFAULT_SESSION_NAME);
    info!(%role_arn, %session_name, "storage credentials assume IAM role");

    let mut role = AssumeRoleProvider::builder(role_arn)
        .session_name(session_name)
        .region(Region::new(config.region.clone()));
    if let Some(external_id) = &config.external_id {
        role = role.external_id(external_id);
    }
    let credentials = role.configure(&base).build().await;

    loader(config)
        .credentials_provider(credentials)
        .load()
        .await
}

fn loader(config: &AwsBaseConfig) -> ConfigLoader {
    let loader = aws_config::from_env().region(Region::new(config.region.clone()));
    match &config.endpoint_url {
        Some(endpoint) => {
            debug!(%endpoint, "storage endpoint override");
            loader.endpoint_url(endpoint)
        }
        None => loader,
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;

    #[tokio::test]
    async fn region_and_endpoint_reach_sdk_config() {
        let mut config = AwsBaseConfig::new("sa-east-1");
        config.endpoint_url = Some("http://localhost:9000".into());

        let sdk_config = build_sdk_config(&config).await;
        assert_eq!(sdk_config.region().map(AsRef::as_ref), Some("sa-east-1"));
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:9000"));
    }
}
