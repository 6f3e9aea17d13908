//! Configuration
//!
//! 環境変数から実行設定を読み込む

use std::fmt;

use crate::domain::errors::PipelineError;

pub const QUAY_TOKEN: &str = "QUAY_TOKEN";
pub const AZURE_STORAGE_ACCOUNT: &str = "AZURE_STORAGE_ACCOUNT";
pub const AZURE_STORAGE_ACCESS_KEY: &str = "AZURE_STORAGE_ACCESS_KEY";
pub const AZURE_CONTAINER: &str = "AZURE_CONTAINER";
pub const QUAY_REPOSITORY: &str = "QUAY_REPOSITORY";

/// 取得対象のリポジトリ（`QUAY_REPOSITORY` 未設定時）
pub const DEFAULT_REPOSITORY: &str = "helmpack/chart-testing";

/// 実行設定
///
/// `Debug` ではトークンとアクセスキーを伏せる。
#[derive(Clone)]
pub struct Config {
    pub quay_token: String,
    pub quay_repository: String,
    pub storage_account: String,
    pub storage_access_key: String,
    pub container: String,
}

impl Config {
    /// プロセスの環境変数から読み込む
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から読み込む
    ///
    /// 必須変数は `QUAY_TOKEN`, `AZURE_STORAGE_ACCOUNT`,
    /// `AZURE_STORAGE_ACCESS_KEY`, `AZURE_CONTAINER` の順に確認し、
    /// 最初に見つからなかった（または空の）変数でエラーにする。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| PipelineError::MissingVariable(name.to_string()))
        };

        let quay_token = required(QUAY_TOKEN)?;
        let storage_account = required(AZURE_STORAGE_ACCOUNT)?;
        let storage_access_key = required(AZURE_STORAGE_ACCESS_KEY)?;
        let container = required(AZURE_CONTAINER)?;

        let quay_repository = lookup(QUAY_REPOSITORY)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());

        Ok(Self {
            quay_token,
            quay_repository,
            storage_account,
            storage_access_key,
            container,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("quay_token", &"<redacted>")
            .field("quay_repository", &self.quay_repository)
            .field("storage_account", &self.storage_account)
            .field("storage_access_key", &"<redacted>")
            .field("container", &self.container)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (QUAY_TOKEN, "quay-secret".to_string()),
            (AZURE_STORAGE_ACCOUNT, "helmlogs".to_string()),
            (AZURE_STORAGE_ACCESS_KEY, "a2V5LXNlY3JldA==".to_string()),
            (AZURE_CONTAINER, "quay-logs".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Config, PipelineError> {
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_load_complete_environment() {
        let config = load(&full_env()).unwrap();

        assert_eq!(config.quay_token, "quay-secret");
        assert_eq!(config.storage_account, "helmlogs");
        assert_eq!(config.storage_access_key, "a2V5LXNlY3JldA==");
        assert_eq!(config.container, "quay-logs");
        assert_eq!(config.quay_repository, DEFAULT_REPOSITORY);
    }

    #[test]
    fn test_each_missing_variable_is_named() {
        for name in [
            QUAY_TOKEN,
            AZURE_STORAGE_ACCOUNT,
            AZURE_STORAGE_ACCESS_KEY,
            AZURE_CONTAINER,
        ] {
            let mut env = full_env();
            env.remove(name);

            match load(&env) {
                Err(PipelineError::MissingVariable(missing)) => assert_eq!(missing, name),
                other => panic!("expected missing {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_empty_variable_counts_as_missing() {
        for name in [
            QUAY_TOKEN,
            AZURE_STORAGE_ACCOUNT,
            AZURE_STORAGE_ACCESS_KEY,
            AZURE_CONTAINER,
        ] {
            let mut env = full_env();
            env.insert(name, String::new());

            let err = load(&env).unwrap_err();
            assert_eq!(err.to_string(), format!("Missing {:?}", name));
        }
    }

    #[test]
    fn test_first_missing_variable_wins() {
        let env = HashMap::new();
        match load(&env) {
            Err(PipelineError::MissingVariable(missing)) => assert_eq!(missing, QUAY_TOKEN),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_repository_override() {
        let mut env = full_env();
        env.insert(QUAY_REPOSITORY, "helmpack/other".to_string());
        assert_eq!(load(&env).unwrap().quay_repository, "helmpack/other");

        env.insert(QUAY_REPOSITORY, String::new());
        assert_eq!(load(&env).unwrap().quay_repository, DEFAULT_REPOSITORY);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = load(&full_env()).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("quay-secret"));
        assert!(!debug.contains("a2V5LXNlY3JldA=="));
        assert!(debug.contains("helmlogs"));
    }
}
