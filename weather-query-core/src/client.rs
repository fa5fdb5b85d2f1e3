use crate::{
    Config,
    model::{Query, QueryResult},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod remote;

pub use remote::RemoteQueryClient;

/// Anything that can answer a weather query.
///
/// Implementations never fail: transport problems come back as
/// [`QueryResult::Failure`] with a displayable message.
#[async_trait]
pub trait QueryService: Send + Sync + Debug {
    async fn submit(&self, query: &Query) -> QueryResult;
}

/// Construct the remote client from config, honouring the usual overrides.
pub fn client_from_config(
    config: &Config,
    endpoint_flag: Option<&str>,
    endpoint_env: Option<&str>,
) -> anyhow::Result<Box<dyn QueryService>> {
    let endpoint = config.resolve_endpoint(endpoint_flag, endpoint_env)?;
    Ok(Box::new(RemoteQueryClient::new(&endpoint)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let client = client_from_config(&Config::default(), None, None);
        assert!(client.is_ok());
    }

    #[test]
    fn client_from_config_rejects_bad_override() {
        let err = client_from_config(&Config::default(), Some("nope"), None).unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint URL"));
    }
}
