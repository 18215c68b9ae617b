// =========================================================
// 运行时配置 (Client Configuration)
// =========================================================

/// 这些是默认值，如果构建环境 / 进程环境中没有定义对应变量，则使用这些值
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SESSION_STORAGE_KEY: &str = "auth-storage";

pub const VAR_API_BASE_URL: &str = "COURSEREG_API_URL";
pub const VAR_SESSION_STORAGE_KEY: &str = "COURSEREG_SESSION_KEY";

/// 客户端配置
///
/// 负责从变量表中读取配置，实现配置与代码解耦
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 所有 API 路径的前缀，不带结尾的 `/`
    pub api_base_url: String,
    /// 持久化会话使用的存储键
    pub session_storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_storage_key: DEFAULT_SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// 通过查找函数构建配置，读不到或为空就用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: read(VAR_API_BASE_URL, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            session_storage_key: read(VAR_SESSION_STORAGE_KEY, DEFAULT_SESSION_STORAGE_KEY),
        }
    }

    /// 从进程环境变量读取（原生环境使用）
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从编译期环境变量读取（浏览器里没有进程环境）
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| match name {
            VAR_API_BASE_URL => option_env!("COURSEREG_API_URL").map(str::to_string),
            VAR_SESSION_STORAGE_KEY => option_env!("COURSEREG_SESSION_KEY").map(str::to_string),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_vars_missing() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_lookup_overrides_and_trims_slash() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (VAR_API_BASE_URL, "https://registrar.example.edu/api/"),
            (VAR_SESSION_STORAGE_KEY, "  "),
        ]);
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://registrar.example.edu/api");
        assert_eq!(config.session_storage_key, DEFAULT_SESSION_STORAGE_KEY);
    }
}
