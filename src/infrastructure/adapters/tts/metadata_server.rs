//! GCE Metadata Server - 运行在 GCE / Cloud Run / GKE 上时的凭证来源
//!
//! 没有凭证文件时，Application Default Credentials 的最后一步：
//! 探测元数据服务器，存在则用实例默认服务账号的 token

use reqwest::Client;
use std::time::Duration;

/// 元数据服务器默认地址
pub const DEFAULT_METADATA_ENDPOINT: &str = "http://metadata.google.internal";

/// 元数据服务器要求并回传的 header
pub const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";
pub const METADATA_FLAVOR_VALUE: &str = "Google";

const METADATA_ROOT_PATH: &str = "/computeMetadata/v1/";
const DEFAULT_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// 启动探测的超时，不在 GCP 上时尽快放弃
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// 元数据服务器
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataServer {
    endpoint: String,
    token_url: String,
}

impl MetadataServer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let token_url = format!("{}{}", endpoint, DEFAULT_TOKEN_PATH);
        Self {
            endpoint,
            token_url,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 默认服务账号的 token 地址
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// 探测元数据服务器是否可用
    ///
    /// 只有响应带回 `Metadata-Flavor: Google` 才算可用
    pub async fn probe(&self, client: &Client) -> bool {
        let url = format!("{}{}", self.endpoint, METADATA_ROOT_PATH);
        let response = client
            .get(&url)
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(response) => {
                let flavor_ok = response
                    .headers()
                    .get(METADATA_FLAVOR_HEADER)
                    .is_some_and(|value| value == METADATA_FLAVOR_VALUE);
                tracing::debug!(
                    url = %url,
                    status = %response.status(),
                    flavor_ok,
                    "Metadata server probe answered"
                );
                flavor_ok
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Metadata server not reachable");
                false
            }
        }
    }
}

impl Default for MetadataServer {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_ENDPOINT)
    }
}
