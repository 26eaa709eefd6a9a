use std::{
    env,
    error::Error,
    fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use model::post::PostMarker;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "./resources/www";

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub address: SocketAddr,
    pub static_dir: PathBuf,
    /// Served by `/api/posts` whenever the database has nothing to offer.
    pub fallback_posts: Vec<PostMarker>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            fallback_posts: default_fallback_posts(),
        }
    }
}

impl WebConfig {
    /// Reads `BIND_ADDRESS`, `PORT`, `STATIC_DIR` and `FALLBACK_POSTS_FILE`.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mut config = Self::default();

        if let Some(address) = var("BIND_ADDRESS") {
            config.address.set_ip(address.parse()?);
        }
        if let Some(port) = var("PORT") {
            config.address.set_port(port.parse()?);
        }
        if let Some(static_dir) = var("STATIC_DIR") {
            config.static_dir = PathBuf::from(static_dir);
        }
        if let Some(path) = var("FALLBACK_POSTS_FILE") {
            let fallback_posts: Vec<PostMarker> =
                serde_json::from_str(&fs::read_to_string(&path)?)?;
            log::info!("loaded {} fallback posts from {}", fallback_posts.len(), path);
            config = config.with_fallback_posts(fallback_posts);
        }

        Ok(config)
    }

    pub fn with_fallback_posts(mut self, fallback_posts: Vec<PostMarker>) -> Self {
        self.fallback_posts = fallback_posts;
        self
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn default_fallback_posts() -> Vec<PostMarker> {
    vec![
        PostMarker {
            id: 1,
            name: "Pole A".to_owned(),
            lat: 40.7128,
            lng: -74.0060,
            status: Some("active".to_owned()),
        },
        PostMarker {
            id: 2,
            name: "Pole B".to_owned(),
            lat: 40.7138,
            lng: -74.0050,
            status: Some("maintenance".to_owned()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = WebConfig::default();
        assert_eq!(config.address.to_string(), "0.0.0.0:5000");
        assert_eq!(config.static_dir, PathBuf::from("./resources/www"));
        assert_eq!(config.fallback_posts.len(), 2);
    }

    #[test]
    fn fallback_posts_parse_from_json() {
        let posts: Vec<PostMarker> = serde_json::from_str(
            r#"[{"id": 3, "name": "Pole C", "lat": 14.6, "lng": 121.0, "status": null}]"#,
        )
        .unwrap();
        assert_eq!(posts[0].name, "Pole C");
        assert_eq!(posts[0].status, None);
    }
}
