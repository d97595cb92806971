//! 登录令牌存储
//!
//! 真正的持久化由外部的键值存储负责，这里只定义能力边界

use parking_lot::RwLock;

/// 令牌存储能力
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// 进程内的令牌存储
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.is_empty())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn save(&self, token: &str) {
        *self.token.write() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}

/// 启动时进入的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Assessment,
}

/// 进程启动时读取一次令牌，决定初始页面
pub fn initial_route(store: &dyn TokenStore) -> Route {
    match store.load() {
        Some(_) => Route::Assessment,
        None => Route::Login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_follows_token() {
        let store = MemoryTokenStore::default();
        assert_eq!(initial_route(&store), Route::Login);

        store.save("jwt");
        assert_eq!(store.load().as_deref(), Some("jwt"));
        assert_eq!(initial_route(&store), Route::Assessment);

        store.clear();
        assert_eq!(initial_route(&store), Route::Login);
    }

    #[test]
    fn test_empty_initial_token_is_ignored() {
        let store = MemoryTokenStore::with_token(Some(String::new()));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_after_panicking_writer() {
        let store = std::sync::Arc::new(MemoryTokenStore::with_token(Some("jwt-old".to_string())));

        let held = store.clone();
        let joined = std::thread::spawn(move || {
            let _guard = held.token.write();
            panic!("writer panicked while holding the lock");
        })
        .join();
        assert!(joined.is_err());

        store.save("jwt-new");
        assert_eq!(store.load().as_deref(), Some("jwt-new"));
        assert_eq!(initial_route(store.as_ref()), Route::Assessment);
    }
}
